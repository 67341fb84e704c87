//! Provider orchestration module.
//!
//! This module turns resolved symbols into validated quotes:
//! - Provider ordering by preference and priority
//! - Race or sequential fetching with per-provider deadlines
//! - Quote validation
//! - TTL caching of the final result

mod cache;
mod orchestrator;
mod validator;

pub use cache::{CacheKey, QuoteCache};
pub use orchestrator::{FetchStrategy, QuoteOrchestrator};
pub use validator::QuoteValidator;

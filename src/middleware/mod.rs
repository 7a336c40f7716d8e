pub mod auth;
pub mod rate_limit;
pub mod request_log;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{auth_middleware, query_token_auth_middleware};
pub use rate_limit::{client_identifier, tts_rate_limit_middleware, voices_rate_limit_middleware};
pub use request_log::request_log_middleware;

pub mod rate_limiter;
pub mod ssml;
pub mod state;
pub mod tts;
pub mod validation;

// Re-export commonly used types for convenience
pub use rate_limiter::{RateLimitDecision, RateLimiter};
pub use ssml::{SsmlBuilder, Utterance, build_utterance, is_ssml};
pub use tts::{SpeechSynthesizer, SynthesizedAudio, TTSError, TTSResult, Voice};
pub use validation::{ValidationError, validate_bounded_number, validate_required_string};

pub use state::CoreState;

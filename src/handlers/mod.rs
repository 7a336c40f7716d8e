//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `speak` - Text-to-speech from query parameters
//! - `ssml` - Speech from caller-written SSML
//! - `voices` - Voice catalog pass-through
//! - `legado` - Reader app import records
//! - `params` - First-value query parameter parsing

pub mod api;
pub mod legado;
pub mod params;
pub mod speak;
pub mod ssml;
pub mod voices;

pub use api::health_check;
pub use legado::legado_import_handler;
pub use speak::text_to_speech_handler;
pub use ssml::ssml_handler;
pub use voices::list_voices;

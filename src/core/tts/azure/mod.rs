//! Microsoft Azure Text-to-Speech connector.
//!
//! - **config**: region, subscription key, output format and endpoint URLs.
//! - **provider**: [`AzureSynthesizer`], which posts SSML to the REST API and
//!   fetches the voice list.
//!
//! # Azure TTS API Reference
//!
//! - Synthesis: `POST https://{region}.tts.speech.microsoft.com/cognitiveservices/v1`
//! - Voices: `GET https://{region}.tts.speech.microsoft.com/cognitiveservices/voices/list`
//! - Authentication: `Ocp-Apim-Subscription-Key` header

mod config;
mod provider;

pub use config::{
    AZURE_OUTPUT_FORMAT_HEADER, AZURE_SUBSCRIPTION_KEY_HEADER, AzureTTSConfig,
    DEFAULT_OUTPUT_FORMAT, DEFAULT_REGION, content_type_for_format,
};
pub use provider::AzureSynthesizer;

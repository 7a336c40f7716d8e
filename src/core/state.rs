use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::core::rate_limiter::RateLimiter;
use crate::core::tts::{AzureSynthesizer, AzureTTSConfig, SpeechSynthesizer};

/// Core-layer shared state: the two admission budgets and the upstream
/// connector.
pub struct CoreState {
    /// Budget for the synthesis endpoints (`/api/text-to-speech`, `/api/ssml`).
    pub tts_limiter: Arc<RateLimiter>,
    /// Stricter budget for `/api/voices`.
    pub voices_limiter: Arc<RateLimiter>,
    /// `None` when no upstream credentials are configured.
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
}

impl CoreState {
    /// Builds the limiters from `config` and the Azure connector when a
    /// subscription key is configured.
    pub fn new(config: &ServerConfig) -> Self {
        let synthesizer = match AzureTTSConfig::from_server_config(config) {
            Some(azure_config) => match AzureSynthesizer::new(azure_config) {
                Ok(synthesizer) => {
                    info!(
                        region = %config.azure_speech_region,
                        "Azure speech upstream configured"
                    );
                    Some(Arc::new(synthesizer) as Arc<dyn SpeechSynthesizer>)
                }
                Err(e) => {
                    warn!("Failed to initialize Azure speech upstream: {}", e);
                    None
                }
            },
            None => {
                warn!("AZURE_SPEECH_SUBSCRIPTION_KEY not set; synthesis endpoints will fail");
                None
            }
        };

        Self::with_synthesizer(config, synthesizer)
    }

    /// Builds the limiters from `config` around an explicit connector.
    pub fn with_synthesizer(
        config: &ServerConfig,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> Self {
        let tts_limiter = Arc::new(RateLimiter::new(
            config.tts_rate_limit.window(),
            config.tts_rate_limit.max_requests,
        ));
        let voices_limiter = Arc::new(RateLimiter::new(
            config.voices_rate_limit.window(),
            config.voices_rate_limit.max_requests,
        ));

        Self {
            tts_limiter,
            voices_limiter,
            synthesizer,
        }
    }

    /// Starts the periodic sweep of both limiters.
    pub fn spawn_maintenance(&self, every: Duration) -> Vec<JoinHandle<()>> {
        vec![
            self.tts_limiter.spawn_cleanup(every),
            self.voices_limiter.spawn_cleanup(every),
        ]
    }
}

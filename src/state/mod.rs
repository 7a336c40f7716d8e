use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::{CoreState, SpeechSynthesizer};
use crate::errors::app_error::{AppError, AppResult};

/// Application state that can be shared across handlers
pub struct AppState {
    pub config: ServerConfig,
    /// Core layer state: rate limiters and the speech upstream
    pub core_state: Arc<CoreState>,
}

impl AppState {
    /// Builds state with the upstream connector derived from `config`.
    pub fn new(config: ServerConfig) -> Arc<Self> {
        let core_state = Arc::new(CoreState::new(&config));
        Arc::new(Self { config, core_state })
    }

    /// Builds state around an explicit connector, or none at all.
    pub fn with_synthesizer(
        config: ServerConfig,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> Arc<Self> {
        let core_state = Arc::new(CoreState::with_synthesizer(&config, synthesizer));
        Arc::new(Self { config, core_state })
    }

    /// The configured speech upstream, if any.
    pub fn synthesizer(&self) -> Option<&Arc<dyn SpeechSynthesizer>> {
        self.core_state.synthesizer.as_ref()
    }

    /// The speech upstream, or a 500 when the deployment has none.
    pub fn require_synthesizer(&self) -> AppResult<&Arc<dyn SpeechSynthesizer>> {
        self.synthesizer()
            .ok_or_else(|| AppError::Internal("speech upstream not configured".to_string()))
    }
}

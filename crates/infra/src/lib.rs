mod config;
mod services;

pub use config::{BackendConfig, Config, GeminiConfig};
pub use services::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct AdminContext {
    pub config: Config,
    pub services: Services,
}

impl AdminContext {
    pub fn new(config: Config) -> Self {
        let services = Services::from_config(&config);
        Self { config, services }
    }

    /// Context with the backend replaced by inmemory services and no
    /// generative api configured
    pub fn create_inmemory(backend: &InMemoryBackend) -> Self {
        let mut config = Config::from_lookup(|_| None);
        config.port = 0;
        Self {
            config,
            services: Services {
                backend: Some(backend.services()),
                insights: None,
            },
        }
    }

    pub fn with_insights(mut self, insights: Arc<dyn IInsightGenerator>) -> Self {
        self.services.insights = Some(insights);
        self
    }

    pub fn without_backend(mut self) -> Self {
        self.services.backend = None;
        self
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> AdminContext {
    AdminContext::new(Config::new())
}

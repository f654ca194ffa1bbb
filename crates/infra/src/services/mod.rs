mod gemini;
mod inmemory;
mod supabase;

use crate::config::Config;
use seller_admin_domain::{Account, AccountCreation, NewAccount, Profile, Role, ID};
use std::sync::Arc;
use thiserror::Error;

pub use gemini::GeminiInsightGenerator;
pub use inmemory::{InMemoryAccountService, InMemoryBackend, InMemoryInsightGenerator, InMemoryProfileStore};
pub use supabase::{SupabaseAuthAdmin, SupabaseProfileStore};

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The upstream service answered with a non success status. The status
    /// and the raw body are handed to the caller as they are.
    #[error("Upstream service responded with status {status}: {detail}")]
    Upstream { status: u16, detail: String },
    #[error("Request to upstream service failed: {0}")]
    Transport(String),
    #[error("Unexpected response from upstream service: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::MalformedResponse(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Admin access to the auth service that owns the `Account`s
#[async_trait::async_trait]
pub trait IAccountService: Send + Sync {
    async fn create(&self, account: &NewAccount) -> Result<AccountCreation, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ServiceError>;
    async fn find(&self, account_id: &ID) -> Result<Account, ServiceError>;
    async fn update_password(&self, account_id: &ID, password: &str) -> Result<(), ServiceError>;
    /// Removing the account also removes its `Profile` record, the
    /// backend cascades the delete.
    async fn delete(&self, account_id: &ID) -> Result<(), ServiceError>;
}

/// Row-store holding the `Profile` records
#[async_trait::async_trait]
pub trait IProfileStore: Send + Sync {
    /// Insert, or overwrite the record with the same id
    async fn upsert(&self, profile: &Profile) -> Result<(), ServiceError>;
    async fn find_by_role(&self, role: &Role) -> Result<Vec<Profile>, ServiceError>;
}

#[async_trait::async_trait]
pub trait IInsightGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}

#[derive(Clone)]
pub struct BackendServices {
    pub accounts: Arc<dyn IAccountService>,
    pub profiles: Arc<dyn IProfileStore>,
}

#[derive(Clone, Default)]
pub struct Services {
    /// Missing when the backend credentials are not configured
    pub backend: Option<BackendServices>,
    /// Missing when no generative api key is configured
    pub insights: Option<Arc<dyn IInsightGenerator>>,
}

impl Services {
    pub fn from_config(config: &Config) -> Self {
        let backend = config.backend.as_ref().map(|backend| {
            let client = reqwest::Client::new();
            BackendServices {
                accounts: Arc::new(SupabaseAuthAdmin::new(client.clone(), backend)),
                profiles: Arc::new(SupabaseProfileStore::new(client, backend)),
            }
        });
        let insights = config.gemini.as_ref().map(|gemini| {
            Arc::new(GeminiInsightGenerator::new(reqwest::Client::new(), gemini))
                as Arc<dyn IInsightGenerator>
        });

        Self { backend, insights }
    }
}

/// Passes successful responses through and turns every other status into
/// `ServiceError::Upstream` carrying the raw body
pub(crate) async fn ensure_success(
    res: reqwest::Response,
) -> Result<reqwest::Response, ServiceError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let detail = res.text().await.unwrap_or_default();
    Err(ServiceError::Upstream {
        status: status.as_u16(),
        detail,
    })
}

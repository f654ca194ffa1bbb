use tracing::{info, warn};
use url::Url;

const DEFAULT_PORT: usize = 5000;
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Credentials for the backend-as-a-service that owns the accounts and
/// the profile records
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base url of the project, e.g. `https://xyz.supabase.co`
    pub url: Url,
    /// Service role key. Grants admin access to the auth and rest apis,
    /// so it must never reach a browser.
    pub service_role_key: String,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: Url,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// `None` when the backend credentials are not configured. Requests that
    /// need the backend are then answered with a configuration error.
    pub backend: Option<BackendConfig>,
    /// `None` when no generative api key is configured, in which case
    /// insights are produced in mock mode
    pub gemini: Option<GeminiConfig>,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key value source. `Config::new` uses the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match read("PORT") {
            Some(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, DEFAULT_PORT
                    );
                    DEFAULT_PORT
                }
            },
            None => DEFAULT_PORT,
        };

        let backend = match (read("SUPABASE_URL"), read("SUPABASE_SERVICE_ROLE_KEY")) {
            (Some(url), Some(service_role_key)) => match Url::parse(&url) {
                Ok(url) => Some(BackendConfig {
                    url,
                    service_role_key,
                }),
                Err(e) => {
                    warn!("SUPABASE_URL: {} is not a valid url: {}", url, e);
                    None
                }
            },
            _ => {
                warn!("SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY is missing. Seller endpoints will answer with a configuration error.");
                None
            }
        };

        let gemini = match read("GEMINI_API_KEY") {
            Some(api_key) => {
                let api_url = read("GEMINI_API_URL")
                    .and_then(|url| Url::parse(&url).ok())
                    .or_else(|| Url::parse(DEFAULT_GEMINI_API_URL).ok());
                api_url.map(|api_url| GeminiConfig {
                    api_key,
                    model: read("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into()),
                    api_url,
                })
            }
            None => {
                info!("GEMINI_API_KEY is not set. Insights will be generated in mock mode.");
                None
            }
        };

        Self {
            port,
            backend,
            gemini,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

mod auth_admin;
mod rest;

pub use auth_admin::SupabaseAuthAdmin;
pub use rest::SupabaseProfileStore;

use reqwest::RequestBuilder;
use url::Url;

/// Shared bits of the two supabase apis: the project url and the service
/// role key sent as both `apikey` and bearer token
#[derive(Debug, Clone)]
struct SupabaseProject {
    base_url: Url,
    service_role_key: String,
}

impl SupabaseProject {
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }
}

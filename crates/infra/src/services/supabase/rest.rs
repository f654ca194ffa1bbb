use super::SupabaseProject;
use crate::config::BackendConfig;
use crate::services::{ensure_success, IProfileStore, ServiceError};
use reqwest::Client;
use seller_admin_domain::{Profile, Role};

const PROFILES_TABLE: &str = "profiles";

/// `IProfileStore` backed by the supabase rest (PostgREST) api
pub struct SupabaseProfileStore {
    client: Client,
    project: SupabaseProject,
}

impl SupabaseProfileStore {
    pub fn new(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            project: SupabaseProject {
                base_url: config.url.clone(),
                service_role_key: config.service_role_key.clone(),
            },
        }
    }

    fn table_endpoint(&self) -> String {
        self.project.endpoint(&format!("rest/v1/{}", PROFILES_TABLE))
    }
}

#[async_trait::async_trait]
impl IProfileStore for SupabaseProfileStore {
    async fn upsert(&self, profile: &Profile) -> Result<(), ServiceError> {
        let res = self
            .project
            .authorize(self.client.post(self.table_endpoint()))
            .query(&[("on_conflict", "id")])
            // Overwrite the existing row instead of failing on the primary key
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[profile])
            .send()
            .await?;
        ensure_success(res).await.map(|_| ())
    }

    async fn find_by_role(&self, role: &Role) -> Result<Vec<Profile>, ServiceError> {
        let role_filter = format!("eq.{}", role);
        let res = self
            .project
            .authorize(self.client.get(self.table_endpoint()))
            .query(&[("select", "id,role"), ("role", role_filter.as_str())])
            .send()
            .await?;
        let res = ensure_success(res).await?;

        Ok(res.json::<Vec<Profile>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{
        Method::{GET, POST},
        MockServer,
    };
    use serde_json::json;
    use url::Url;

    fn store_for(server: &MockServer) -> SupabaseProfileStore {
        let config = BackendConfig {
            url: Url::parse(&server.base_url()).unwrap(),
            service_role_key: "service-key".into(),
        };
        SupabaseProfileStore::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn upsert_merges_on_id_conflict() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/profiles")
                    .query_param("on_conflict", "id")
                    .header("prefer", "resolution=merge-duplicates,return=minimal")
                    .header("apikey", "service-key")
                    .json_body(json!([{ "id": "u1", "role": "seller" }]));
                then.status(201);
            })
            .await;

        store_for(&server)
            .upsert(&Profile::seller("u1".parse().unwrap()))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failed_upsert_keeps_detail() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/profiles");
                then.status(403)
                    .body(r#"{"message":"new row violates row-level security policy"}"#);
            })
            .await;

        let err = store_for(&server)
            .upsert(&Profile::seller("u1".parse().unwrap()))
            .await
            .unwrap_err();
        match err {
            ServiceError::Upstream { status, detail } => {
                assert_eq!(status, 403);
                assert!(detail.contains("row-level security"));
            }
            e => panic!("Expected upstream error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn filters_profiles_by_role() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/profiles")
                    .query_param("select", "id,role")
                    .query_param("role", "eq.seller");
                then.status(200).json_body(json!([
                    { "id": "u1", "role": "seller" },
                    { "id": "u2", "role": "seller" }
                ]));
            })
            .await;

        let profiles = store_for(&server).find_by_role(&Role::Seller).await.unwrap();
        assert_eq!(
            profiles,
            vec![
                Profile::seller("u1".parse().unwrap()),
                Profile::seller("u2".parse().unwrap())
            ]
        );
    }
}

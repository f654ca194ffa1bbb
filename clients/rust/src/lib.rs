mod base;
mod insight;
mod seller;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use insight::InsightClient;
pub use insight::GenerateInsightInput;
pub use reqwest::{Method, StatusCode};
pub use seller::{CreateSellerInput, SellerList, UpdateSellerPasswordInput};
use seller::SellerClient;
pub use seller_admin_api_structs::dtos::SellerDTO as Seller;
pub use seller_admin_api_structs::ErrorResponse;
pub use seller_admin_domain::{InsightMode, ID};
use status::StatusClient;
use std::sync::Arc;

/// Seller Admin Server SDK
///
/// The SDK contains methods for interacting with the Seller Admin server
/// API.
#[derive(Clone)]
pub struct SellerAdminSDK {
    base: Arc<BaseClient>,
    pub insight: InsightClient,
    pub seller: SellerClient,
    pub status: StatusClient,
}

impl SellerAdminSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let insight = InsightClient::new(base.clone());
        let seller = SellerClient::new(base.clone());
        let status = StatusClient::new(base.clone());

        Self {
            base,
            insight,
            seller,
            status,
        }
    }

    /// Sends a request without any body to a path relative to the server
    /// root and returns the response as is
    pub async fn raw(&self, method: Method, path: &str) -> APIResponse<reqwest::Response> {
        self.base.raw(method, path).await
    }

    /// The offline cache script served to browsers
    pub async fn service_worker(&self) -> APIResponse<String> {
        let res = self.base.raw(Method::GET, "sw.js").await?;
        if res.status() != StatusCode::OK {
            return Err(APIError::UnexpectedStatusCode {
                status: res.status(),
                error: None,
            });
        }
        res.text().await.map_err(|_| APIError::MalformedResponse)
    }
}

use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use seller_admin_api_structs::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct SellerClient {
    base: Arc<BaseClient>,
}

pub struct CreateSellerInput {
    pub email: String,
    pub password: String,
}

pub struct UpdateSellerPasswordInput {
    pub seller_id: ID,
    pub password: String,
}

/// Sellers returned by `SellerClient::list`
pub struct SellerList {
    pub sellers: list_sellers::APIResponse,
    /// Sellers the server could not resolve and left out
    pub omitted: usize,
}

impl SellerClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateSellerInput) -> APIResponse<create_seller::APIResponse> {
        let body = create_seller::RequestBody {
            email: Some(input.email),
            password: Some(input.password),
        };
        self.base
            .post(body, "create-seller", StatusCode::OK)
            .await
    }

    pub async fn list(&self) -> APIResponse<SellerList> {
        let (sellers, headers) = self
            .base
            .get_with_headers::<list_sellers::APIResponse>("manage-sellers", StatusCode::OK)
            .await?;
        let omitted = headers
            .get(list_sellers::OMITTED_SELLERS_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or(0);

        Ok(SellerList { sellers, omitted })
    }

    pub async fn update_password(
        &self,
        input: UpdateSellerPasswordInput,
    ) -> APIResponse<update_seller_password::APIResponse> {
        let body = update_seller_password::RequestBody {
            id: Some(input.seller_id.inner()),
            password: Some(input.password),
        };
        self.base
            .put(body, "manage-sellers", StatusCode::OK)
            .await
    }

    pub async fn delete(&self, seller_id: &ID) -> APIResponse<delete_seller::APIResponse> {
        self.base
            .delete(
                &format!("manage-sellers?id={}", seller_id),
                StatusCode::OK,
            )
            .await
    }
}

use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use seller_admin_api_structs::generate_insight;
use std::sync::Arc;

#[derive(Clone)]
pub struct InsightClient {
    base: Arc<BaseClient>,
}

pub type GenerateInsightInput = generate_insight::RequestBody;

impl InsightClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn generate(
        &self,
        input: GenerateInsightInput,
    ) -> APIResponse<generate_insight::APIResponse> {
        self.base
            .post(input, "generate-insight", StatusCode::OK)
            .await
    }
}

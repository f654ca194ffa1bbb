use seller_admin_domain::{InsightMode, SalesInsightInput};
use serde::{Deserialize, Serialize};

pub mod generate_insight {
    use super::*;

    #[derive(Debug, Clone, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub prompt: Option<String>,
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub sales_summary: Option<String>,
    }

    impl From<RequestBody> for SalesInsightInput {
        fn from(body: RequestBody) -> Self {
            Self {
                prompt: body.prompt,
                name: body.name,
                category: body.category,
                description: body.description,
                sales_summary: body.sales_summary,
            }
        }
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub analysis: String,
        pub mode: InsightMode,
    }
}

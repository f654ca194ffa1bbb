use crate::config::GeminiConfig;
use crate::services::{ensure_success, IInsightGenerator, ServiceError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

// https://ai.google.dev/api/generate-content

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

pub struct GeminiInsightGenerator {
    client: Client,
    api_url: Url,
    api_key: String,
    model: String,
}

impl GeminiInsightGenerator {
    pub fn new(client: Client, config: &GeminiConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn generate_endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.as_str().trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait::async_trait]
impl IInsightGenerator for GeminiInsightGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };
        let res = self
            .client
            .post(self.generate_endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;
        let res = ensure_success(res).await?;

        res.json::<GenerateContentResponse>()
            .await?
            .into_text()
            .ok_or_else(|| ServiceError::MalformedResponse("No candidate text in response".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    fn generator_for(server: &MockServer) -> GeminiInsightGenerator {
        let config = GeminiConfig {
            api_key: "gemini-key".into(),
            model: "gemini-1.5-flash".into(),
            api_url: Url::parse(&server.base_url()).unwrap(),
        };
        GeminiInsightGenerator::new(Client::new(), &config)
    }

    #[tokio::test]
    async fn returns_first_candidate_text() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-1.5-flash:generateContent")
                    .query_param("key", "gemini-key")
                    .json_body(json!({ "contents": [{ "parts": [{ "text": "hola" }] }] }));
                then.status(200).json_body(json!({
                    "candidates": [
                        { "content": { "parts": [{ "text": "Ventas al alza" }], "role": "model" } },
                        { "content": { "parts": [{ "text": "ignored" }] } }
                    ]
                }));
            })
            .await;

        let text = generator_for(&server).generate("hola").await.unwrap();
        mock.assert_async().await;
        assert_eq!(text, "Ventas al alza");
    }

    #[tokio::test]
    async fn relays_upstream_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(429).body("Resource has been exhausted");
            })
            .await;

        let err = generator_for(&server).generate("hola").await.unwrap_err();
        match err {
            ServiceError::Upstream { status, detail } => {
                assert_eq!(status, 429);
                assert_eq!(detail, "Resource has been exhausted");
            }
            e => panic!("Expected upstream error, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn empty_candidates_are_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({ "candidates": [] }));
            })
            .await;

        let err = generator_for(&server).generate("hola").await.unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
    }
}

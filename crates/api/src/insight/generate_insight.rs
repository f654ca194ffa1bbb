use crate::error::AdminApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{http::header, web, HttpResponse};
use seller_admin_api_structs::generate_insight::*;
use seller_admin_domain::{InsightMode, SalesInsightInput};
use seller_admin_infra::{AdminContext, ServiceError};

/// Answers CORS preflight requests, whatever the configuration
pub async fn generate_insight_preflight_controller() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .finish()
}

/// Every field is optional, so an empty body is read as an empty request
fn parse_body(body: &[u8]) -> Result<RequestBody, AdminApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RequestBody::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        AdminApiError::BadClientData(format!("Cuerpo de la solicitud inválido: {}", e))
    })
}

pub async fn generate_insight_controller(
    body: web::Bytes,
    ctx: web::Data<AdminContext>,
) -> Result<HttpResponse, AdminApiError> {
    let usecase = GenerateInsightUseCase {
        input: parse_body(&body)?.into(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok()
                .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
                .json(APIResponse {
                    analysis: res.analysis,
                    mode: res.mode,
                })
        })
        .map_err(AdminApiError::from)
}

#[derive(Debug)]
pub struct GenerateInsightUseCase {
    pub input: SalesInsightInput,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub analysis: String,
    pub mode: InsightMode,
}

#[derive(Debug)]
pub enum UseCaseError {
    Generate(ServiceError),
}

impl From<UseCaseError> for AdminApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Generate(e) => Self::from_service("Error al generar el análisis", e),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GenerateInsightUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "GenerateInsight";

    async fn execute(&mut self, ctx: &AdminContext) -> Result<Self::Response, Self::Error> {
        let generator = match &ctx.services.insights {
            Some(generator) => generator,
            None => {
                return Ok(UseCaseRes {
                    analysis: self.input.mock_analysis(),
                    mode: InsightMode::Mock,
                })
            }
        };

        let analysis = generator
            .generate(&self.input.prompt())
            .await
            .map_err(UseCaseError::Generate)?;

        Ok(UseCaseRes {
            analysis,
            mode: InsightMode::Gemini,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seller_admin_infra::{InMemoryBackend, InMemoryInsightGenerator};
    use std::sync::Arc;

    fn input() -> SalesInsightInput {
        SalesInsightInput {
            name: Some("Café de grano".into()),
            category: Some("Bebidas".into()),
            sales_summary: Some("120 unidades en marzo".into()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_body_is_an_empty_request() {
        let body = parse_body(b"").unwrap();
        assert_eq!(SalesInsightInput::from(body), SalesInsightInput::default());
        assert!(parse_body(b"  \n").is_ok());
        assert!(matches!(
            parse_body(b"{not json"),
            Err(AdminApiError::BadClientData(_))
        ));
    }

    #[actix_web::test]
    async fn mock_mode_without_api_key() {
        let backend = InMemoryBackend::new();
        let ctx = AdminContext::create_inmemory(&backend);

        let mut usecase = GenerateInsightUseCase { input: input() };
        let res = usecase.execute(&ctx).await.unwrap();

        assert_eq!(res.mode, InsightMode::Mock);
        assert_eq!(res.analysis, input().mock_analysis());
        assert_eq!(backend.call_count(), 0);
    }

    #[actix_web::test]
    async fn generated_text_is_returned() {
        let generator = Arc::new(InMemoryInsightGenerator::new("Las ventas suben"));
        let ctx = AdminContext::create_inmemory(&InMemoryBackend::new())
            .with_insights(generator.clone());

        let mut usecase = GenerateInsightUseCase { input: input() };
        let res = usecase.execute(&ctx).await.unwrap();

        assert_eq!(res.mode, InsightMode::Gemini);
        assert_eq!(res.analysis, "Las ventas suben");
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Producto: Café de grano"));
    }

    #[actix_web::test]
    async fn caller_prompt_is_forwarded() {
        let generator = Arc::new(InMemoryInsightGenerator::new("ok"));
        let ctx = AdminContext::create_inmemory(&InMemoryBackend::new())
            .with_insights(generator.clone());

        let mut usecase = GenerateInsightUseCase {
            input: SalesInsightInput {
                prompt: Some("¿Qué producto vende más?".into()),
                ..input()
            },
        };
        usecase.execute(&ctx).await.unwrap();

        assert_eq!(generator.prompts(), vec!["¿Qué producto vende más?".to_string()]);
    }

    #[actix_web::test]
    async fn upstream_failure_is_relayed() {
        let ctx = AdminContext::create_inmemory(&InMemoryBackend::new()).with_insights(Arc::new(
            InMemoryInsightGenerator::failing(429, "quota exceeded"),
        ));

        let mut usecase = GenerateInsightUseCase { input: input() };
        let res = usecase.execute(&ctx).await;

        assert!(matches!(
            res,
            Err(UseCaseError::Generate(ServiceError::Upstream { status: 429, .. }))
        ));
    }
}

use seller_admin_api::Application;
use seller_admin_infra::{AdminContext, IInsightGenerator, InMemoryBackend};
use seller_admin_sdk::SellerAdminSDK;
use std::sync::Arc;

pub struct TestApp {
    pub backend: Arc<InMemoryBackend>,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, SellerAdminSDK, String) {
    let backend = Arc::new(InMemoryBackend::new());
    let ctx = AdminContext::create_inmemory(&backend);
    spawn_app_with_context(backend, ctx).await
}

/// Application with a generative api behind `insights`
pub async fn spawn_app_with_insights(
    insights: Arc<dyn IInsightGenerator>,
) -> (TestApp, SellerAdminSDK, String) {
    let backend = Arc::new(InMemoryBackend::new());
    let ctx = AdminContext::create_inmemory(&backend).with_insights(insights);
    spawn_app_with_context(backend, ctx).await
}

/// Application started without backend credentials
pub async fn spawn_unconfigured_app() -> (TestApp, SellerAdminSDK, String) {
    let backend = Arc::new(InMemoryBackend::new());
    let ctx = AdminContext::create_inmemory(&backend).without_backend();
    spawn_app_with_context(backend, ctx).await
}

async fn spawn_app_with_context(
    backend: Arc<InMemoryBackend>,
    mut ctx: AdminContext,
) -> (TestApp, SellerAdminSDK, String) {
    ctx.config.port = 0; // Random port

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { backend };
    let sdk = SellerAdminSDK::new(address.clone());
    (app, sdk, address)
}

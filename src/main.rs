mod telemetry;

use seller_admin_api::Application;
use seller_admin_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("seller_admin_server".into(), "info".into());
    init_subscriber(subscriber)?;

    let context = setup_context();

    let app = Application::new(context).await?;
    info!("Listening on port {}", app.port());
    app.start().await?;
    Ok(())
}

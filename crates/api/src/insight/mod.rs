mod generate_insight;

use crate::error::method_not_allowed;
use actix_web::{http::Method, web};
use generate_insight::{generate_insight_controller, generate_insight_preflight_controller};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/generate-insight")
            .route(web::method(Method::OPTIONS).to(generate_insight_preflight_controller))
            .route(web::post().to(generate_insight_controller))
            .default_service(method_not_allowed("POST, OPTIONS")),
    );
}

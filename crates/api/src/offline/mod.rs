use actix_web::{http::header, web, HttpResponse};
use seller_admin_domain::OfflineCacheManifest;

async fn service_worker() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/javascript; charset=utf-8"))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .body(OfflineCacheManifest::default().render_service_worker())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sw.js", web::get().to(service_worker));
}

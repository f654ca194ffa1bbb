mod create_seller;
mod delete_seller;
mod list_sellers;
mod update_seller_password;

use crate::error::method_not_allowed;
use actix_web::web;
use create_seller::create_seller_controller;
use delete_seller::delete_seller_controller;
use list_sellers::list_sellers_controller;
use update_seller_password::update_seller_password_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/create-seller")
            .route(web::post().to(create_seller_controller))
            .default_service(method_not_allowed("POST")),
    );
    cfg.service(
        web::resource("/manage-sellers")
            .route(web::get().to(list_sellers_controller))
            .route(web::put().to(update_seller_password_controller))
            .route(web::patch().to(update_seller_password_controller))
            .route(web::delete().to(delete_seller_controller))
            .default_service(method_not_allowed("GET, PUT, PATCH, DELETE")),
    );
}

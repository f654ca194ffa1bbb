use crate::error::AdminApiError;
use crate::shared::{
    required_field,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use seller_admin_api_structs::update_seller_password::*;
use seller_admin_api_structs::MessageResponse;
use seller_admin_domain::ID;
use seller_admin_infra::{AdminContext, ServiceError};

pub async fn update_seller_password_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AdminContext>,
) -> Result<HttpResponse, AdminApiError> {
    let body = body.0;
    let id = required_field(body.id).and_then(|id| id.parse::<ID>().ok());
    let (seller_id, password) = match (id, required_field(body.password)) {
        (Some(seller_id), Some(password)) => (seller_id, password),
        _ => {
            return Err(AdminApiError::BadClientData(
                "id y password son obligatorios".into(),
            ))
        }
    };

    let usecase = UpdateSellerPasswordUseCase {
        seller_id,
        password,
    };
    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(MessageResponse::new(PASSWORD_UPDATED)))
        .map_err(AdminApiError::from)
}

#[derive(Debug)]
pub struct UpdateSellerPasswordUseCase {
    pub seller_id: ID,
    pub password: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    BackendNotConfigured,
    UpdatePassword(ServiceError),
}

impl From<UseCaseError> for AdminApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::BackendNotConfigured => Self::MissingConfiguration(
                "Faltan las variables de entorno SUPABASE_URL o SUPABASE_SERVICE_ROLE_KEY".into(),
            ),
            UseCaseError::UpdatePassword(e) => {
                Self::from_service("No se pudo actualizar la contraseña", e)
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateSellerPasswordUseCase {
    type Response = ();
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSellerPassword";

    async fn execute(&mut self, ctx: &AdminContext) -> Result<Self::Response, Self::Error> {
        let backend = ctx
            .services
            .backend
            .as_ref()
            .ok_or(UseCaseError::BackendNotConfigured)?;

        backend
            .accounts
            .update_password(&self.seller_id, &self.password)
            .await
            .map_err(UseCaseError::UpdatePassword)
    }
}

use crate::error::AdminApiError;
use crate::shared::{
    required_field,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use seller_admin_api_structs::delete_seller::*;
use seller_admin_api_structs::MessageResponse;
use seller_admin_domain::ID;
use seller_admin_infra::{AdminContext, ServiceError};

pub async fn delete_seller_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<AdminContext>,
) -> Result<HttpResponse, AdminApiError> {
    let seller_id = match required_field(query.0.id).and_then(|id| id.parse::<ID>().ok()) {
        Some(seller_id) => seller_id,
        None => {
            return Err(AdminApiError::BadClientData(
                "id es obligatorio para eliminar".into(),
            ))
        }
    };

    let usecase = DeleteSellerUseCase { seller_id };
    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(MessageResponse::new(SELLER_DELETED)))
        .map_err(AdminApiError::from)
}

/// Deletes the seller's account. The backend removes the profile record
/// together with the account.
#[derive(Debug)]
pub struct DeleteSellerUseCase {
    pub seller_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    BackendNotConfigured,
    DeleteAccount(ServiceError),
}

impl From<UseCaseError> for AdminApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::BackendNotConfigured => Self::MissingConfiguration(
                "Faltan las variables de entorno SUPABASE_URL o SUPABASE_SERVICE_ROLE_KEY".into(),
            ),
            UseCaseError::DeleteAccount(e) => {
                Self::from_service("No se pudo eliminar el vendedor", e)
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteSellerUseCase {
    type Response = ();
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteSeller";

    async fn execute(&mut self, ctx: &AdminContext) -> Result<Self::Response, Self::Error> {
        let backend = ctx
            .services
            .backend
            .as_ref()
            .ok_or(UseCaseError::BackendNotConfigured)?;

        backend
            .accounts
            .delete(&self.seller_id)
            .await
            .map_err(UseCaseError::DeleteAccount)
    }
}

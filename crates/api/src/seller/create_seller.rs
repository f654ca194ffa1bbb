use crate::error::AdminApiError;
use crate::shared::{
    required_field,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use seller_admin_api_structs::create_seller::*;
use seller_admin_domain::{IdentityResolution, NewAccount, Profile, ID};
use seller_admin_infra::{AdminContext, ServiceError};
use tracing::info;

pub async fn create_seller_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<AdminContext>,
) -> Result<HttpResponse, AdminApiError> {
    let body = body.0;
    let (email, password) = match (required_field(body.email), required_field(body.password)) {
        (Some(email), Some(password)) => (email.trim().to_string(), password),
        _ => {
            return Err(AdminApiError::BadClientData(
                "email y password son obligatorios".into(),
            ))
        }
    };

    let usecase = CreateSellerUseCase { email, password };
    execute(usecase, &ctx)
        .await
        .map(|usecase_res| HttpResponse::Ok().json(APIResponse::new(usecase_res.user_id)))
        .map_err(AdminApiError::from)
}

/// Makes sure an account exists for `email` and that its profile carries
/// the seller role
#[derive(Debug)]
pub struct CreateSellerUseCase {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub user_id: ID,
    pub resolution: IdentityResolution,
}

#[derive(Debug)]
pub enum UseCaseError {
    BackendNotConfigured,
    CreateAccount(ServiceError),
    LookupAccount(ServiceError),
    UnresolvableIdentity,
    AssignRole(ServiceError),
}

impl From<UseCaseError> for AdminApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::BackendNotConfigured => Self::MissingConfiguration(
                "Faltan las variables de entorno SUPABASE_URL o SUPABASE_SERVICE_ROLE_KEY".into(),
            ),
            UseCaseError::CreateAccount(e) => Self::from_service("No se pudo crear el usuario", e),
            UseCaseError::LookupAccount(e) => {
                Self::from_service("No se pudo buscar el usuario existente", e)
            }
            UseCaseError::UnresolvableIdentity => {
                Self::UnresolvableIdentity("No se pudo obtener el id del usuario".into())
            }
            UseCaseError::AssignRole(e) => {
                Self::from_failed_step("No se pudo asignar el rol de vendedor", e)
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateSellerUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateSeller";

    async fn execute(&mut self, ctx: &AdminContext) -> Result<Self::Response, Self::Error> {
        let backend = ctx
            .services
            .backend
            .as_ref()
            .ok_or(UseCaseError::BackendNotConfigured)?;

        let creation = backend
            .accounts
            .create(&NewAccount::confirmed(&self.email, &self.password))
            .await
            .map_err(UseCaseError::CreateAccount)?;

        let existing = if creation.needs_lookup() {
            backend
                .accounts
                .find_by_email(&self.email)
                .await
                .map_err(UseCaseError::LookupAccount)?
        } else {
            None
        };

        let resolution = IdentityResolution::resolve(creation, existing.as_ref());
        let user_id = resolution
            .id()
            .cloned()
            .ok_or(UseCaseError::UnresolvableIdentity)?;

        // No rollback of a freshly created account when this fails
        backend
            .profiles
            .upsert(&Profile::seller(user_id.clone()))
            .await
            .map_err(UseCaseError::AssignRole)?;

        info!("Seller {} provisioned: {:?}", self.email, resolution);
        Ok(UseCaseRes {
            user_id,
            resolution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seller_admin_domain::{Account, AccountCreation, Role};
    use seller_admin_infra::{BackendServices, IAccountService, InMemoryBackend};
    use std::sync::Arc;

    fn setup() -> (AdminContext, InMemoryBackend) {
        let backend = InMemoryBackend::new();
        (AdminContext::create_inmemory(&backend), backend)
    }

    fn usecase(email: &str) -> CreateSellerUseCase {
        CreateSellerUseCase {
            email: email.into(),
            password: "x12345".into(),
        }
    }

    #[actix_web::test]
    async fn creates_account_and_seller_profile() {
        let (ctx, backend) = setup();

        let res = usecase("a@b.com").execute(&ctx).await.unwrap();

        assert!(matches!(res.resolution, IdentityResolution::Created(_)));
        let accounts = backend.accounts.accounts();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id, res.user_id);
        assert_eq!(backend.accounts.password_of(&res.user_id).unwrap(), "x12345");
        assert_eq!(
            backend.profiles.profiles(),
            vec![Profile::seller(res.user_id)]
        );
    }

    #[actix_web::test]
    async fn repeated_runs_converge_on_one_seller() {
        let (ctx, backend) = setup();

        let first = usecase("a@b.com").execute(&ctx).await.unwrap();
        let second = usecase("a@b.com").execute(&ctx).await.unwrap();

        assert_eq!(first.user_id, second.user_id);
        assert!(matches!(second.resolution, IdentityResolution::FoundExisting(_)));
        assert_eq!(backend.accounts.accounts().len(), 1);
        assert_eq!(backend.profiles.profiles().len(), 1);
    }

    #[actix_web::test]
    async fn promotes_existing_account_with_default_role() {
        let (ctx, backend) = setup();
        let account = Account::new(ID::new(), "a@b.com");
        backend.accounts.insert(account.clone(), "old-password");
        backend.profiles.insert(Profile {
            id: account.id.clone(),
            role: Role::from("customer"),
        });

        let res = usecase("a@b.com").execute(&ctx).await.unwrap();

        assert_eq!(res.user_id, account.id);
        assert_eq!(
            backend.profiles.find(&account.id).unwrap().role,
            Role::Seller
        );
        assert_eq!(backend.profiles.profiles().len(), 1);
    }

    #[actix_web::test]
    async fn recovers_id_when_creation_returns_none() {
        let (ctx, backend) = setup();
        backend.accounts.hide_created_ids();

        let res = usecase("a@b.com").execute(&ctx).await.unwrap();

        assert!(matches!(res.resolution, IdentityResolution::FoundExisting(_)));
        assert_eq!(backend.accounts.accounts()[0].id, res.user_id);
    }

    #[actix_web::test]
    async fn missing_backend_is_reported_without_calls() {
        let (ctx, backend) = setup();
        let ctx = ctx.without_backend();

        let res = usecase("a@b.com").execute(&ctx).await;

        assert!(matches!(res, Err(UseCaseError::BackendNotConfigured)));
        assert_eq!(backend.call_count(), 0);
    }

    #[actix_web::test]
    async fn failed_upsert_leaves_account_in_place() {
        let (ctx, backend) = setup();
        backend.profiles.fail_upserts();

        let res = usecase("a@b.com").execute(&ctx).await;

        assert!(matches!(res, Err(UseCaseError::AssignRole(_))));
        assert_eq!(backend.accounts.accounts().len(), 1);
        assert!(backend.profiles.profiles().is_empty());
    }

    /// Accepts every account but never reports or stores an identifier
    struct ForgetfulAccounts;

    #[async_trait::async_trait]
    impl IAccountService for ForgetfulAccounts {
        async fn create(&self, _: &NewAccount) -> Result<AccountCreation, ServiceError> {
            Ok(AccountCreation::MissingIdentifier)
        }
        async fn find_by_email(&self, _: &str) -> Result<Option<Account>, ServiceError> {
            Ok(None)
        }
        async fn find(&self, id: &ID) -> Result<Account, ServiceError> {
            Err(ServiceError::Upstream {
                status: 404,
                detail: id.to_string(),
            })
        }
        async fn update_password(&self, _: &ID, _: &str) -> Result<(), ServiceError> {
            Ok(())
        }
        async fn delete(&self, _: &ID) -> Result<(), ServiceError> {
            Ok(())
        }
    }

    #[actix_web::test]
    async fn unresolvable_identity_skips_profile_upsert() {
        let (mut ctx, backend) = setup();
        ctx.services.backend = Some(BackendServices {
            accounts: Arc::new(ForgetfulAccounts),
            profiles: backend.profiles.clone(),
        });

        let res = usecase("a@b.com").execute(&ctx).await;

        assert!(matches!(res, Err(UseCaseError::UnresolvableIdentity)));
        assert_eq!(backend.profiles.call_count(), 0);
    }
}

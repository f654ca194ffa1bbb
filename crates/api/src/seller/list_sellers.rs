use crate::error::AdminApiError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use seller_admin_api_structs::dtos::SellerDTO;
use seller_admin_api_structs::list_sellers::*;
use seller_admin_domain::{Role, Seller, SellerListing};
use seller_admin_infra::{AdminContext, ServiceError};
use tracing::warn;

pub async fn list_sellers_controller(
    ctx: web::Data<AdminContext>,
) -> Result<HttpResponse, AdminApiError> {
    let usecase = ListSellersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|listing| {
            let omitted = listing.omitted;
            let sellers: APIResponse = listing.sellers.into_iter().map(SellerDTO::new).collect();
            HttpResponse::Ok()
                .insert_header((OMITTED_SELLERS_HEADER, omitted.to_string()))
                .json(sellers)
        })
        .map_err(AdminApiError::from)
}

#[derive(Debug)]
pub struct ListSellersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    BackendNotConfigured,
    FetchProfiles(ServiceError),
}

impl From<UseCaseError> for AdminApiError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::BackendNotConfigured => Self::MissingConfiguration(
                "Faltan las variables de entorno SUPABASE_URL o SUPABASE_SERVICE_ROLE_KEY".into(),
            ),
            UseCaseError::FetchProfiles(e) => {
                Self::from_service("No se pudieron obtener los vendedores", e)
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ListSellersUseCase {
    type Response = SellerListing;
    type Error = UseCaseError;

    const NAME: &'static str = "ListSellers";

    async fn execute(&mut self, ctx: &AdminContext) -> Result<Self::Response, Self::Error> {
        let backend = ctx
            .services
            .backend
            .as_ref()
            .ok_or(UseCaseError::BackendNotConfigured)?;

        let profiles = backend
            .profiles
            .find_by_role(&Role::Seller)
            .await
            .map_err(UseCaseError::FetchProfiles)?;

        let mut listing = SellerListing::default();
        for profile in profiles {
            match backend.accounts.find(&profile.id).await {
                Ok(account) => listing.push(Seller::from_parts(&profile, &account)),
                Err(e) => {
                    warn!("Leaving seller {} out of the listing: {}", profile.id, e);
                    listing.omit();
                }
            }
        }

        if listing.is_partial() {
            warn!(
                "Listed {} sellers, {} could not be resolved",
                listing.sellers.len(),
                listing.omitted
            );
        }
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seller_admin_domain::{Account, Profile, ID};
    use seller_admin_infra::InMemoryBackend;

    fn seed_seller(backend: &InMemoryBackend, email: &str) -> ID {
        let account = Account::new(ID::new(), email);
        backend.accounts.insert(account.clone(), "x12345");
        backend.profiles.insert(Profile::seller(account.id.clone()));
        account.id
    }

    #[actix_web::test]
    async fn no_sellers_gives_empty_listing() {
        let backend = InMemoryBackend::new();
        let ctx = AdminContext::create_inmemory(&backend);

        let listing = ListSellersUseCase {}.execute(&ctx).await.unwrap();

        assert!(listing.sellers.is_empty());
        assert_eq!(listing.omitted, 0);
    }

    #[actix_web::test]
    async fn joins_profiles_with_account_emails_in_order() {
        let backend = InMemoryBackend::new();
        let ctx = AdminContext::create_inmemory(&backend);
        let first = seed_seller(&backend, "uno@tienda.com");
        let second = seed_seller(&backend, "dos@tienda.com");
        let customer = Account::new(ID::new(), "cliente@tienda.com");
        backend.accounts.insert(customer.clone(), "x12345");
        backend.profiles.insert(Profile {
            id: customer.id,
            role: Role::from("customer"),
        });

        let listing = ListSellersUseCase {}.execute(&ctx).await.unwrap();

        assert_eq!(
            listing.sellers,
            vec![
                Seller {
                    id: first,
                    email: Some("uno@tienda.com".into())
                },
                Seller {
                    id: second,
                    email: Some("dos@tienda.com".into())
                },
            ]
        );
    }

    #[actix_web::test]
    async fn counts_sellers_whose_account_lookup_fails() {
        let backend = InMemoryBackend::new();
        let ctx = AdminContext::create_inmemory(&backend);
        let kept = seed_seller(&backend, "uno@tienda.com");
        let flaky = seed_seller(&backend, "dos@tienda.com");
        backend.accounts.make_unavailable(&flaky);
        // Profile left behind without an account
        backend.profiles.insert(Profile::seller(ID::new()));

        let listing = ListSellersUseCase {}.execute(&ctx).await.unwrap();

        assert_eq!(listing.sellers.len(), 1);
        assert_eq!(listing.sellers[0].id, kept);
        assert_eq!(listing.omitted, 2);
        assert!(listing.is_partial());
    }
}

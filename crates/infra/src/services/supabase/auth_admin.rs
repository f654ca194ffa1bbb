use super::SupabaseProject;
use crate::config::BackendConfig;
use crate::services::{ensure_success, IAccountService, ServiceError};
use reqwest::{Client, StatusCode};
use seller_admin_domain::{find_account_by_email, Account, AccountCreation, NewAccount, ID};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// https://supabase.com/docs/reference/api/auth-admin

const USERS_PAGE_SIZE: usize = 200;

#[derive(Debug, Serialize)]
struct CreateUserRequest<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
}

#[derive(Debug, Serialize)]
struct UpdatePasswordRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl AuthUser {
    fn into_account(self) -> Option<Account> {
        let id = self.id?.parse::<ID>().ok()?;
        Some(Account {
            id,
            email: self.email,
        })
    }
}

/// Error body of the auth api. Older versions only send `msg`.
#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl AuthErrorBody {
    fn is_email_taken(&self) -> bool {
        if let Some(code) = &self.error_code {
            return code == "email_exists" || code == "user_already_exists";
        }
        self.msg
            .as_deref()
            .map(|msg| msg.contains("already been registered"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
struct ListUsersResponse {
    #[serde(default)]
    users: Vec<AuthUser>,
}

/// `IAccountService` backed by the supabase auth admin api
pub struct SupabaseAuthAdmin {
    client: Client,
    project: SupabaseProject,
}

impl SupabaseAuthAdmin {
    pub fn new(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            project: SupabaseProject {
                base_url: config.url.clone(),
                service_role_key: config.service_role_key.clone(),
            },
        }
    }

    fn user_endpoint(&self, account_id: &ID) -> String {
        self.project
            .endpoint(&format!("auth/v1/admin/users/{}", account_id))
    }

    /// Accounts on the page and whether the page was full
    async fn list_users_page(&self, page: usize) -> Result<(Vec<Account>, bool), ServiceError> {
        let res = self
            .project
            .authorize(self.client.get(self.project.endpoint("auth/v1/admin/users")))
            .query(&[("page", page), ("per_page", USERS_PAGE_SIZE)])
            .send()
            .await?;
        let res = ensure_success(res).await?;
        let users = res.json::<ListUsersResponse>().await?.users;
        let full = users.len() >= USERS_PAGE_SIZE;

        Ok((
            users.into_iter().filter_map(AuthUser::into_account).collect(),
            full,
        ))
    }
}

#[async_trait::async_trait]
impl IAccountService for SupabaseAuthAdmin {
    async fn create(&self, account: &NewAccount) -> Result<AccountCreation, ServiceError> {
        let body = CreateUserRequest {
            email: &account.email,
            password: &account.password,
            email_confirm: account.email_confirmed,
        };
        let res = self
            .project
            .authorize(self.client.post(self.project.endpoint("auth/v1/admin/users")))
            .json(&body)
            .send()
            .await?;

        // The auth api reports an already registered email as 422 with
        // `email_exists`, older versions and proxies as 409. Any other 422
        // (weak password, invalid email) is a real failure.
        let status = res.status();
        if status == StatusCode::CONFLICT || status == StatusCode::UNPROCESSABLE_ENTITY {
            let detail = res.text().await.unwrap_or_default();
            let body: AuthErrorBody = serde_json::from_str(&detail).unwrap_or_default();
            if status == StatusCode::CONFLICT || body.is_email_taken() {
                warn!(
                    "Creating account for {} reported a conflict ({}): {}",
                    account.email, status, detail
                );
                return Ok(AccountCreation::Conflict);
            }
            return Err(ServiceError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let res = ensure_success(res).await?;
        let user = res.json::<AuthUser>().await?;
        Ok(match user.into_account() {
            Some(account) => AccountCreation::Created(account),
            None => AccountCreation::MissingIdentifier,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ServiceError> {
        let mut page = 1;
        loop {
            let (accounts, full) = self.list_users_page(page).await?;
            debug!("Looked through {} accounts on page {}", accounts.len(), page);
            if let Some(account) = find_account_by_email(&accounts, email) {
                return Ok(Some(account.clone()));
            }
            if !full {
                return Ok(None);
            }
            page += 1;
        }
    }

    async fn find(&self, account_id: &ID) -> Result<Account, ServiceError> {
        let res = self
            .project
            .authorize(self.client.get(self.user_endpoint(account_id)))
            .send()
            .await?;
        let res = ensure_success(res).await?;

        res.json::<AuthUser>()
            .await?
            .into_account()
            .ok_or_else(|| ServiceError::MalformedResponse("Account without an id".into()))
    }

    async fn update_password(&self, account_id: &ID, password: &str) -> Result<(), ServiceError> {
        let res = self
            .project
            .authorize(self.client.put(self.user_endpoint(account_id)))
            .json(&UpdatePasswordRequest { password })
            .send()
            .await?;
        ensure_success(res).await.map(|_| ())
    }

    async fn delete(&self, account_id: &ID) -> Result<(), ServiceError> {
        let res = self
            .project
            .authorize(self.client.delete(self.user_endpoint(account_id)))
            .send()
            .await?;
        ensure_success(res).await.map(|_| ())
    }
}

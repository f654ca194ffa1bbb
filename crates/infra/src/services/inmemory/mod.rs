//! Inmemory stand-ins for the external services. They are used by the tests
//! and behave like the real backend where it matters: emails are unique,
//! upserts merge on the id and deleting an account cascades to its profile.

mod collection;

use super::{BackendServices, IAccountService, IInsightGenerator, IProfileStore, ServiceError};
use collection::{delete, find, find_by, insert, update, upsert};
use seller_admin_domain::{Account, AccountCreation, Entity, NewAccount, Profile, Role, ID};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn not_found(account_id: &ID) -> ServiceError {
    ServiceError::Upstream {
        status: 404,
        detail: format!(r#"{{"msg":"User not found","id":"{}"}}"#, account_id),
    }
}

#[derive(Debug, Clone)]
struct StoredAccount {
    account: Account,
    password: String,
}

impl Entity for StoredAccount {
    fn id(&self) -> &ID {
        &self.account.id
    }
}

pub struct InMemoryAccountService {
    accounts: Mutex<Vec<StoredAccount>>,
    profiles: Arc<InMemoryProfileStore>,
    unavailable: Mutex<Vec<ID>>,
    hide_created_ids: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryAccountService {
    pub fn new(profiles: Arc<InMemoryProfileStore>) -> Self {
        Self {
            accounts: Mutex::new(vec![]),
            profiles,
            unavailable: Mutex::new(vec![]),
            hide_created_ids: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of calls made through `IAccountService`
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn accounts(&self) -> Vec<Account> {
        find_by(&self.accounts, |_| true)
            .into_iter()
            .map(|stored| stored.account)
            .collect()
    }

    pub fn password_of(&self, account_id: &ID) -> Option<String> {
        find(account_id, &self.accounts).map(|stored| stored.password)
    }

    /// Seeds an account without going through `create`
    pub fn insert(&self, account: Account, password: &str) {
        insert(
            &StoredAccount {
                account,
                password: password.into(),
            },
            &self.accounts,
        );
    }

    /// Makes `find` fail for this account, like a flaky upstream would
    pub fn make_unavailable(&self, account_id: &ID) {
        self.unavailable.lock().unwrap().push(account_id.clone());
    }

    /// Accounts are still created, but the response carries no identifier
    pub fn hide_created_ids(&self) {
        self.hide_created_ids.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl IAccountService for InMemoryAccountService {
    async fn create(&self, account: &NewAccount) -> Result<AccountCreation, ServiceError> {
        self.record_call();
        if !find_by(&self.accounts, |stored| stored.account.has_email(&account.email)).is_empty()
        {
            return Ok(AccountCreation::Conflict);
        }

        let created = Account::new(ID::new(), account.email.clone());
        self.insert(created.clone(), &account.password);

        if self.hide_created_ids.load(Ordering::SeqCst) {
            return Ok(AccountCreation::MissingIdentifier);
        }
        Ok(AccountCreation::Created(created))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, ServiceError> {
        self.record_call();
        Ok(find_by(&self.accounts, |stored| stored.account.has_email(email))
            .into_iter()
            .next()
            .map(|stored| stored.account))
    }

    async fn find(&self, account_id: &ID) -> Result<Account, ServiceError> {
        self.record_call();
        if self.unavailable.lock().unwrap().contains(account_id) {
            return Err(ServiceError::Upstream {
                status: 503,
                detail: "Service unavailable".into(),
            });
        }
        find(account_id, &self.accounts)
            .map(|stored| stored.account)
            .ok_or_else(|| not_found(account_id))
    }

    async fn update_password(&self, account_id: &ID, password: &str) -> Result<(), ServiceError> {
        self.record_call();
        if update(account_id, &self.accounts, |stored| {
            stored.password = password.to_string()
        }) {
            Ok(())
        } else {
            Err(not_found(account_id))
        }
    }

    async fn delete(&self, account_id: &ID) -> Result<(), ServiceError> {
        self.record_call();
        match delete(account_id, &self.accounts) {
            Some(_) => {
                self.profiles.remove(account_id);
                Ok(())
            }
            None => Err(not_found(account_id)),
        }
    }
}

pub struct InMemoryProfileStore {
    profiles: Mutex<Vec<Profile>>,
    fail_upserts: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(vec![]),
            fail_upserts: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn profiles(&self) -> Vec<Profile> {
        find_by(&self.profiles, |_| true)
    }

    pub fn find(&self, id: &ID) -> Option<Profile> {
        find(id, &self.profiles)
    }

    /// Seeds a profile without going through `upsert`
    pub fn insert(&self, profile: Profile) {
        insert(&profile, &self.profiles);
    }

    pub fn fail_upserts(&self) {
        self.fail_upserts.store(true, Ordering::SeqCst);
    }

    fn remove(&self, id: &ID) {
        delete(id, &self.profiles);
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IProfileStore for InMemoryProfileStore {
    async fn upsert(&self, profile: &Profile) -> Result<(), ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_upserts.load(Ordering::SeqCst) {
            return Err(ServiceError::Upstream {
                status: 403,
                detail: r#"{"message":"new row violates row-level security policy for table \"profiles\""}"#
                    .into(),
            });
        }
        upsert(profile, &self.profiles);
        Ok(())
    }

    async fn find_by_role(&self, role: &Role) -> Result<Vec<Profile>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(find_by(&self.profiles, |profile| profile.role == *role))
    }
}

/// Account service and profile store wired together so that deleting an
/// account removes its profile
#[derive(Clone)]
pub struct InMemoryBackend {
    pub accounts: Arc<InMemoryAccountService>,
    pub profiles: Arc<InMemoryProfileStore>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        let profiles = Arc::new(InMemoryProfileStore::new());
        let accounts = Arc::new(InMemoryAccountService::new(profiles.clone()));
        Self { accounts, profiles }
    }

    pub fn services(&self) -> BackendServices {
        BackendServices {
            accounts: self.accounts.clone(),
            profiles: self.profiles.clone(),
        }
    }

    /// Total number of calls made to the account service and profile store
    pub fn call_count(&self) -> usize {
        self.accounts.call_count() + self.profiles.call_count()
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

pub struct InMemoryInsightGenerator {
    response: Result<String, (u16, String)>,
    prompts: Mutex<Vec<String>>,
}

impl InMemoryInsightGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn failing(status: u16, detail: impl Into<String>) -> Self {
        Self {
            response: Err((status, detail.into())),
            prompts: Mutex::new(vec![]),
        }
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IInsightGenerator for InMemoryInsightGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err((status, detail)) => Err(ServiceError::Upstream {
                status: *status,
                detail: detail.clone(),
            }),
        }
    }
}

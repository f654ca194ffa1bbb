use crate::{Account, ID};

/// What the auth service answered when asked to create an `Account`
#[derive(Debug, Clone, PartialEq)]
pub enum AccountCreation {
    Created(Account),
    /// An account with the same email already exists
    Conflict,
    /// The service accepted the request but did not return an identifier
    MissingIdentifier,
}

impl AccountCreation {
    /// Whether the identifier has to be recovered by looking the email up
    pub fn needs_lookup(&self) -> bool {
        !matches!(self, Self::Created(_))
    }
}

/// Outcome of "create the account, or find the one that already exists".
///
/// Running the transition twice for the same email ends in the same
/// identifier: the first run is `Created`, later runs are `FoundExisting`.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentityResolution {
    Created(ID),
    FoundExisting(ID),
    Unresolvable,
}

impl IdentityResolution {
    /// `existing` is only consulted when the creation did not yield an id.
    pub fn resolve(creation: AccountCreation, existing: Option<&Account>) -> Self {
        match creation {
            AccountCreation::Created(account) => Self::Created(account.id),
            AccountCreation::Conflict | AccountCreation::MissingIdentifier => match existing {
                Some(account) => Self::FoundExisting(account.id.clone()),
                None => Self::Unresolvable,
            },
        }
    }

    pub fn id(&self) -> Option<&ID> {
        match self {
            Self::Created(id) | Self::FoundExisting(id) => Some(id),
            Self::Unresolvable => None,
        }
    }
}

/// Picks the account registered with `email` out of a page of accounts
pub fn find_account_by_email<'a>(accounts: &'a [Account], email: &str) -> Option<&'a Account> {
    accounts.iter().find(|account| account.has_email(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, email: &str) -> Account {
        Account::new(id.parse().unwrap(), email)
    }

    #[test]
    fn created_account_wins_over_lookup() {
        let created = account("new", "a@b.com");
        let other = account("old", "a@b.com");
        let res = IdentityResolution::resolve(AccountCreation::Created(created), Some(&other));
        assert_eq!(res, IdentityResolution::Created("new".parse().unwrap()));
    }

    #[test]
    fn conflict_recovers_existing_id() {
        let existing = account("old", "a@b.com");
        let res = IdentityResolution::resolve(AccountCreation::Conflict, Some(&existing));
        assert_eq!(res, IdentityResolution::FoundExisting("old".parse().unwrap()));
        assert_eq!(res.id().map(|id| id.as_str()), Some("old"));
    }

    #[test]
    fn missing_identifier_without_match_is_unresolvable() {
        let res = IdentityResolution::resolve(AccountCreation::MissingIdentifier, None);
        assert_eq!(res, IdentityResolution::Unresolvable);
        assert!(res.id().is_none());
    }

    #[test]
    fn only_non_created_outcomes_need_lookup() {
        assert!(AccountCreation::Conflict.needs_lookup());
        assert!(AccountCreation::MissingIdentifier.needs_lookup());
        assert!(!AccountCreation::Created(account("x", "x@y.z")).needs_lookup());
    }

    #[test]
    fn finds_account_by_email_case_insensitively() {
        let accounts = vec![account("1", "one@shop.com"), account("2", "Two@Shop.com")];
        let found = find_account_by_email(&accounts, "two@shop.com").unwrap();
        assert_eq!(found.id.as_str(), "2");
        assert!(find_account_by_email(&accounts, "three@shop.com").is_none());
    }
}

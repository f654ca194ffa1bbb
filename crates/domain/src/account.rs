use crate::shared::entity::{Entity, ID};

/// An `Account` lives in the external auth service. This system never owns
/// it, it only creates, looks up, changes the password of or deletes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: ID,
    pub email: Option<String>,
}

impl Account {
    pub fn new(id: ID, email: impl Into<String>) -> Self {
        Self {
            id,
            email: Some(email.into()),
        }
    }

    /// Emails are compared case-insensitively, the same way the auth service
    /// treats them when signing in.
    pub fn has_email(&self, email: &str) -> bool {
        match &self.email {
            Some(own) => own.trim().eq_ignore_ascii_case(email.trim()),
            None => false,
        }
    }
}

impl Entity for Account {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Credentials used when provisioning a new `Account`
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    /// Ask the auth service to mark the email as confirmed right away
    pub email_confirmed: bool,
}

impl NewAccount {
    pub fn confirmed(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            email_confirmed: true,
        }
    }
}

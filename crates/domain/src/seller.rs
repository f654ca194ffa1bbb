use crate::{Account, Profile, ID};
use serde::{Deserialize, Serialize};

/// A seller as shown to the administrator: the seller `Profile` joined
/// with the email of its `Account`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: ID,
    pub email: Option<String>,
}

impl Seller {
    pub fn from_parts(profile: &Profile, account: &Account) -> Self {
        Self {
            id: profile.id.clone(),
            email: account.email.clone(),
        }
    }
}

/// Result of joining seller profiles with their accounts. Profiles whose
/// account could not be fetched are counted in `omitted`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SellerListing {
    pub sellers: Vec<Seller>,
    pub omitted: usize,
}

impl SellerListing {
    pub fn push(&mut self, seller: Seller) {
        self.sellers.push(seller);
    }

    pub fn omit(&mut self) {
        self.omitted += 1;
    }

    pub fn is_partial(&self) -> bool {
        self.omitted > 0
    }
}

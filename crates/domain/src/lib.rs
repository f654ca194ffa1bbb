mod account;
mod identity;
mod insight;
pub mod offline_cache;
mod profile;
mod seller;
mod shared;

pub use account::{Account, NewAccount};
pub use identity::{find_account_by_email, AccountCreation, IdentityResolution};
pub use insight::{InsightMode, SalesInsightInput};
pub use offline_cache::OfflineCacheManifest;
pub use profile::{Profile, Role};
pub use seller::{Seller, SellerListing};
pub use shared::entity::{Entity, InvalidIDError, ID};

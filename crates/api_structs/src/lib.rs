mod insight;
mod seller;
mod shared;
mod status;

pub mod dtos {
    pub use crate::seller::dtos::*;
}

pub use crate::insight::api::*;
pub use crate::seller::api::*;
pub use crate::shared::api::*;
pub use crate::status::api::*;

use crate::dtos::SellerDTO;
use seller_admin_domain::ID;
use serde::{Deserialize, Serialize};

use crate::shared::api::MessageResponse;

pub mod create_seller {
    use super::*;

    pub const SELLER_CREATED: &str = "Vendedor creado";

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub password: Option<String>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub user_id: ID,
    }

    impl APIResponse {
        pub fn new(user_id: ID) -> Self {
            Self {
                message: SELLER_CREATED.into(),
                user_id,
            }
        }
    }
}

pub mod list_sellers {
    use super::*;

    /// Number of seller profiles left out of the listing because their
    /// account could not be fetched
    pub const OMITTED_SELLERS_HEADER: &str = "x-omitted-sellers";

    pub type APIResponse = Vec<SellerDTO>;
}

pub mod update_seller_password {
    use super::*;

    pub const PASSWORD_UPDATED: &str = "Contraseña actualizada";

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub id: Option<String>,
        #[serde(default)]
        pub password: Option<String>,
    }

    pub type APIResponse = MessageResponse;
}

pub mod delete_seller {
    use super::*;

    pub const SELLER_DELETED: &str = "Vendedor eliminado";

    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub id: Option<String>,
    }

    pub type APIResponse = MessageResponse;
}

use seller_admin_domain::{Seller, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerDTO {
    pub id: ID,
    pub email: Option<String>,
}

impl SellerDTO {
    pub fn new(seller: Seller) -> Self {
        Self {
            id: seller.id,
            email: seller.email,
        }
    }
}

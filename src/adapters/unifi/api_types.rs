//! UniFi Access developer API wire types.
//!
//! Only the fields this service reads or writes are modelled. Unknown fields
//! are ignored on input and omitted on output.

use serde::{Deserialize, Serialize};

/// `code` value of a successful response.
pub const SUCCESS_CODE: &str = "SUCCESS";

pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_DEACTIVATED: &str = "DEACTIVATED";

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page_num: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total: u32,
}

/// A directory user as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub employee_number: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub nfc_cards: Option<Vec<NfcCard>>,
}

impl UserRecord {
    pub fn has_nfc_card(&self) -> bool {
        self.nfc_cards.as_ref().is_some_and(|cards| !cards.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NfcCard {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub token: String,
}

/// Body of create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

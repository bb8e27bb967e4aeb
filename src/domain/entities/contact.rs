use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::entities::{json_field::decode_or_default, option_fields::OptionField};

/// Platform name → profile URL.
pub type Socials = BTreeMap<String, String>;

#[derive(Debug, sqlx::FromRow)]
pub struct ContactRow {
    pub id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub socials: Option<Value>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ContactInsert {
    pub id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub socials: Option<Socials>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub socials: Option<Socials>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            phone: row.phone,
            socials: decode_or_default("contact.socials", row.socials),
            address: row.address,
            created_at: row.created_at,
        }
    }
}

// The email is only required to be non-empty; its syntax is not checked.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewContact {
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub socials: Option<Socials>,

    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateContactRequest {
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    pub email: Option<String>,

    pub phone: OptionField<String>,
    pub socials: OptionField<Socials>,
    pub address: OptionField<String>,
}

impl UpdateContactRequest {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_unchanged()
            && self.socials.is_unchanged()
            && self.address.is_unchanged()
    }
}

impl NewContact {
    pub fn prepare_for_insert(self) -> ContactInsert {
        ContactInsert {
            id: Uuid::new_v4(),
            email: self.email,
            phone: self.phone,
            socials: self.socials,
            address: self.address,
            created_at: Utc::now(),
        }
    }
}

//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database, together with the intake payloads and response shapes
//! built from them. Stored rows never serialize directly; responses go through
//! the `Returned*` types so the password hash cannot leak.

use crate::utils::password::MAX_PASSWORD_BYTES;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, FromRow)]
pub struct Seller {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub e_mail: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload as received from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IncomingSeller {
    #[validate(length(
        min = 1,
        max = 255,
        message = "First name must be between 1-255 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Last name must be between 1-255 characters"
    ))]
    pub last_name: String,

    #[validate(custom(function = "validate_e_mail"))]
    pub e_mail: String,

    #[validate(
        length(min = 8, message = "Password is too short"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
}

/// Insert DTO handed to the repository once the password has been hashed.
#[derive(Debug, Clone)]
pub struct CreateSeller {
    pub first_name: String,
    pub last_name: String,
    pub e_mail: String,
    pub password_hash: String,
}

/// Partial update payload. Absent fields are left untouched; any other
/// keys in the body (`id`, `password`) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSeller {
    #[validate(length(
        min = 1,
        max = 255,
        message = "First name must be between 1-255 characters"
    ))]
    pub first_name: Option<String>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Last name must be between 1-255 characters"
    ))]
    pub last_name: Option<String>,

    #[validate(custom(function = "validate_e_mail"))]
    pub e_mail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnedSeller {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub e_mail: String,
}

impl From<Seller> for ReturnedSeller {
    fn from(seller: Seller) -> Self {
        Self {
            id: seller.id,
            first_name: seller.first_name,
            last_name: seller.last_name,
            e_mail: seller.e_mail,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReturnedAllSellers {
    pub sellers: Vec<ReturnedSeller>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReturnedSellerWithBooks {
    #[serde(flatten)]
    pub seller: ReturnedSeller,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub count_pages: i64,
    pub seller_id: i64,
}

/// Book creation payload. The page count arrives as `pages`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IncomingBook {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 255, message = "Author must be between 1-255 characters"))]
    pub author: String,

    pub year: i64,

    #[serde(rename = "pages", alias = "count_pages")]
    #[validate(range(min = 1, message = "Page count must be positive"))]
    pub count_pages: i64,

    pub seller_id: i64,
}

/// Accepts `local@domain.tld`: one `@`, a non-empty local part and a dotted
/// domain without empty labels. Whitespace is never allowed.
pub fn validate_e_mail(e_mail: &str) -> Result<(), ValidationError> {
    let invalid = || {
        ValidationError::new("e_mail").with_message(Cow::Borrowed("Must be a valid e-mail"))
    };

    if e_mail.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = e_mail.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// Rejects passwords bcrypt would have to truncate.
pub fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_bytes").with_message(Cow::Owned(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        ))));
    }
    Ok(())
}

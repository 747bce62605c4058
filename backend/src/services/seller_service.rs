//! Seller business logic service.
//!
//! Handles registration, listing, the seller-with-books view, updates and
//! deletion. Responses are shaped here so the password hash never leaves the
//! service layer.

use crate::database::models::{
    CreateSeller, IncomingSeller, ReturnedAllSellers, ReturnedSeller, ReturnedSellerWithBooks,
    UpdateSeller,
};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::book_repository::BookRepository;
use crate::repositories::seller_repository::{SellerRepository, is_duplicate_e_mail};
use crate::utils::password::CredentialStore;
use sqlx::SqlitePool;
use validator::Validate;

pub struct SellerService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    credentials: CredentialStore,
}

impl<'a> SellerService<'a> {
    /// Creates a new SellerService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `credentials` - Password hasher used at registration
    pub fn new(pool: &'a SqlitePool, credentials: CredentialStore) -> Self {
        Self { pool, credentials }
    }

    /// Registers a new seller.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Malformed e-mail or a password shorter than 8 characters
    /// - An e-mail that is already registered
    pub async fn register_seller(&self, incoming: IncomingSeller) -> ServiceResult<ReturnedSeller> {
        incoming.validate()?;

        let password_hash = self.credentials.hash(&incoming.password).await?;
        let e_mail = incoming.e_mail.clone();

        let seller = SellerRepository::new(self.pool)
            .create_seller(CreateSeller {
                first_name: incoming.first_name,
                last_name: incoming.last_name,
                e_mail: incoming.e_mail,
                password_hash,
            })
            .await
            .map_err(|e| e_mail_conflict(e, &e_mail))?;

        tracing::info!("Seller {} registered at {}", seller.id, seller.created_at);
        Ok(seller.into())
    }

    pub async fn list_sellers(&self) -> ServiceResult<ReturnedAllSellers> {
        let repo = SellerRepository::new(self.pool);
        let sellers = repo
            .list_sellers()
            .await?
            .into_iter()
            .map(ReturnedSeller::from)
            .collect();

        Ok(ReturnedAllSellers { sellers })
    }

    /// Retrieves a seller together with the books they own.
    ///
    /// Books are loaded with a second query, only for this view.
    pub async fn get_seller_with_books(&self, id: i64) -> ServiceResult<ReturnedSellerWithBooks> {
        let seller = SellerRepository::new(self.pool)
            .get_seller_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Seller", id))?;

        let books = BookRepository::new(self.pool)
            .list_books_by_seller(seller.id)
            .await?;

        Ok(ReturnedSellerWithBooks {
            seller: seller.into(),
            books,
        })
    }

    /// Updates first name, last name and e-mail. The password is out of reach.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if the seller doesn't exist and
    /// `ServiceError::AlreadyExists` if the new e-mail belongs to another seller
    pub async fn update_seller(&self, id: i64, update: UpdateSeller) -> ServiceResult<ReturnedSeller> {
        update.validate()?;

        let e_mail = update.e_mail.clone().unwrap_or_default();

        let seller = SellerRepository::new(self.pool)
            .update_seller(id, update)
            .await
            .map_err(|e| e_mail_conflict(e, &e_mail))?
            .ok_or_else(|| ServiceError::not_found("Seller", id))?;

        tracing::info!("Seller {} updated at {}", seller.id, seller.updated_at);
        Ok(seller.into())
    }

    /// Deletes a seller and, through the foreign key, their books.
    /// Unknown ids succeed as well.
    pub async fn delete_seller(&self, id: i64) -> ServiceResult<()> {
        let removed = SellerRepository::new(self.pool).delete_seller(id).await?;
        if removed {
            tracing::info!("Seller {} deleted", id);
        } else {
            tracing::debug!("Delete of unknown seller {} ignored", id);
        }
        Ok(())
    }
}

/// Turns a violated e-mail uniqueness constraint into a conflict.
fn e_mail_conflict(error: anyhow::Error, e_mail: &str) -> ServiceError {
    if is_duplicate_e_mail(&error) {
        ServiceError::already_exists("Seller", e_mail)
    } else {
        error.into()
    }
}

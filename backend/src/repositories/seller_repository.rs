//! Database repository for seller management operations.
//!
//! Provides CRUD operations for sellers. Books belonging to a seller are
//! removed by the `ON DELETE CASCADE` foreign key when the seller is deleted.

use crate::database::models::{CreateSeller, Seller, UpdateSeller};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

/// True when `error` is the UNIQUE constraint on `sellers.e_mail` firing.
///
/// The constraint is the only duplicate check, so concurrent registrations
/// cannot both get through.
pub fn is_duplicate_e_mail(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(e)) if e.is_unique_violation()
    )
}

/// Repository for seller database operations.
pub struct SellerRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> SellerRepository<'a> {
    /// Creates a new SellerRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new seller in the database.
    ///
    /// # Arguments
    /// * `seller` - CreateSeller DTO carrying the already hashed password
    ///
    /// # Returns
    /// The newly created Seller including its generated id
    pub async fn create_seller(&self, seller: CreateSeller) -> Result<Seller> {
        let now = Utc::now();
        let seller = sqlx::query_as::<_, Seller>(
            r#"
            INSERT INTO sellers (first_name, last_name, e_mail, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, first_name, last_name, e_mail, password_hash, created_at, updated_at
            "#,
        )
        .bind(seller.first_name)
        .bind(seller.last_name)
        .bind(seller.e_mail)
        .bind(seller.password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(seller)
    }

    /// Lists every seller in creation order.
    pub async fn list_sellers(&self) -> Result<Vec<Seller>> {
        let sellers = sqlx::query_as::<_, Seller>(
            r#"
            SELECT id, first_name, last_name, e_mail, password_hash, created_at, updated_at
            FROM sellers
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(sellers)
    }

    /// Retrieves a seller by their unique identifier.
    ///
    /// # Returns
    /// `Some(Seller)` if found, `None` otherwise
    pub async fn get_seller_by_id(&self, id: i64) -> Result<Option<Seller>> {
        let seller = sqlx::query_as::<_, Seller>(
            r#"
            SELECT id, first_name, last_name, e_mail, password_hash, created_at, updated_at
            FROM sellers WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(seller)
    }

    /// Retrieves a seller by e-mail. Used by the login flow.
    pub async fn get_seller_by_email(&self, e_mail: &str) -> Result<Option<Seller>> {
        let seller = sqlx::query_as::<_, Seller>(
            r#"
            SELECT id, first_name, last_name, e_mail, password_hash, created_at, updated_at
            FROM sellers WHERE e_mail = ?
            "#,
        )
        .bind(e_mail)
        .fetch_optional(self.pool)
        .await?;

        Ok(seller)
    }

    /// Applies a partial update to names and e-mail.
    ///
    /// The password hash is never touched here.
    ///
    /// # Returns
    /// `Some(Seller)` with the new values, `None` if the seller does not exist
    pub async fn update_seller(&self, id: i64, update: UpdateSeller) -> Result<Option<Seller>> {
        let seller = sqlx::query_as::<_, Seller>(
            r#"
            UPDATE sellers SET
            first_name = COALESCE(?, first_name),
            last_name = COALESCE(?, last_name),
            e_mail = COALESCE(?, e_mail),
            updated_at = ?
            WHERE id = ?
            RETURNING id, first_name, last_name, e_mail, password_hash, created_at, updated_at
            "#,
        )
        .bind(update.first_name)
        .bind(update.last_name)
        .bind(update.e_mail)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(seller)
    }

    /// Deletes a seller together with their books.
    ///
    /// # Returns
    /// `true` if a row was removed. Deleting an unknown id is not an error.
    pub async fn delete_seller(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sellers WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

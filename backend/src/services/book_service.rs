//! Book business logic service.

use crate::database::models::{Book, IncomingBook};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::book_repository::BookRepository;
use crate::repositories::seller_repository::SellerRepository;
use sqlx::SqlitePool;
use validator::Validate;

pub struct BookService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Adds a book to an existing seller's catalogue.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if `seller_id` does not match a seller
    pub async fn create_book(&self, incoming: IncomingBook) -> ServiceResult<Book> {
        incoming.validate()?;

        if SellerRepository::new(self.pool)
            .get_seller_by_id(incoming.seller_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Seller", incoming.seller_id));
        }

        let book = BookRepository::new(self.pool).create_book(incoming).await?;
        tracing::info!("Book {} added for seller {}", book.id, book.seller_id);
        Ok(book)
    }

    pub async fn get_book_required(&self, id: i64) -> ServiceResult<Book> {
        BookRepository::new(self.pool)
            .get_book_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Book", id))
    }
}

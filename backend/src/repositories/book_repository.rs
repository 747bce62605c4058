//! Database repository for books.
//!
//! Only the operations the seller views need: insert, single lookup and the
//! explicit per-seller listing.

use crate::database::models::{Book, IncomingBook};
use anyhow::Result;
use sqlx::SqlitePool;

pub struct BookRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BookRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a book. The caller is expected to have checked the seller exists.
    pub async fn create_book(&self, book: IncomingBook) -> Result<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, year, count_pages, seller_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, author, year, count_pages, seller_id
            "#,
        )
        .bind(book.title)
        .bind(book.author)
        .bind(book.year)
        .bind(book.count_pages)
        .bind(book.seller_id)
        .fetch_one(self.pool)
        .await?;

        Ok(book)
    }

    pub async fn get_book_by_id(&self, id: i64) -> Result<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, year, count_pages, seller_id FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(book)
    }

    /// Books owned by one seller, oldest first.
    pub async fn list_books_by_seller(&self, seller_id: i64) -> Result<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, year, count_pages, seller_id
            FROM books
            WHERE seller_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(seller_id)
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }
}

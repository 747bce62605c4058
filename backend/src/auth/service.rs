//! Core business logic for the authentication system.

use crate::auth::models::*;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::seller_repository::SellerRepository;
use crate::utils::jwt::TokenService;
use crate::utils::password::CredentialStore;
use sqlx::SqlitePool;
use validator::Validate;

/// Shared by both failure paths so the response never tells whether the
/// e-mail exists.
pub const INVALID_CREDENTIALS: &str = "Incorrect e_mail or password";

/// Authentication service exchanging seller credentials for a token
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    tokens: &'a TokenService,
    credentials: CredentialStore,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(
        pool: &'a SqlitePool,
        tokens: &'a TokenService,
        credentials: CredentialStore,
    ) -> Self {
        AuthService {
            pool,
            tokens,
            credentials,
        }
    }

    /// Authenticate a seller and issue a token for their e-mail
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<TokenResponse> {
        login_request.validate()?;

        let seller = SellerRepository::new(self.pool)
            .get_seller_by_email(&login_request.e_mail)
            .await?;

        // Unknown e-mails still pay for one bcrypt run.
        let seller = match seller {
            Some(seller) => self
                .credentials
                .verify(&login_request.password, &seller.password_hash)
                .await
                .then_some(seller),
            None => {
                self.credentials.reject(&login_request.password).await;
                None
            }
        };

        let Some(seller) = seller else {
            tracing::info!("Rejected login attempt");
            return Err(ServiceError::unauthorized(INVALID_CREDENTIALS));
        };

        let token = self.tokens.issue(&seller.e_mail)?;
        tracing::info!("Issued token for seller {}", seller.id);

        Ok(TokenResponse { token })
    }
}

//! Authentication service - Staff sign-in and sign-out.
//!
//! Tokens are stateless JWTs; signing out records the token id in an
//! in-memory revocation list until the token would have expired anyway.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Account, Password};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    /// Token id, the key used for revocation
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 43200)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Provision a sign-in account
    async fn create_account(&self, email: String, password: String, name: String)
        -> AppResult<Account>;

    /// Sign in and return a bearer token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Revoke a token so it no longer authenticates
    fn logout(&self, token: &str) -> AppResult<()>;

    /// Verify a token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// The signed-in account, if it still exists
    async fn current_account(&self, id: Uuid) -> AppResult<Account>;
}

fn generate_token(account: &Account, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: account.id,
        email: account.email.clone(),
        name: account.name.clone(),
        jti: Uuid::new_v4(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn decode_token(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
    /// jti -> exp of signed-out tokens
    revoked: Mutex<HashMap<Uuid, i64>>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self {
            uow,
            config,
            revoked: Mutex::new(HashMap::new()),
        }
    }

    fn revoked(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, i64>> {
        self.revoked
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn create_account(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> AppResult<Account> {
        if self.uow.accounts().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Account"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let account = self.uow.accounts().create(email, password_hash, name).await?;
        tracing::info!(account_id = %account.id, "account created");
        Ok(account)
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let account = self.uow.accounts().find_by_email(&email).await?;

        // Verify against a dummy hash when the account is missing so
        // response time does not reveal which emails exist.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";
        let stored = match &account {
            Some(account) => Password::from_hash(account.password_hash.clone()),
            None => Password::from_hash(dummy_hash.to_string()),
        };
        let password_valid = stored.verify(&password);

        match account {
            Some(account) if password_valid => {
                tracing::info!(account_id = %account.id, "signed in");
                generate_token(&account, &self.config)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn logout(&self, token: &str) -> AppResult<()> {
        let claims = self.verify_token(token)?;
        let now = Utc::now().timestamp();

        let mut revoked = self.revoked();
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(claims.jti, claims.exp);

        tracing::info!(account_id = %claims.sub, "signed out");
        Ok(())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let claims = decode_token(token, &self.config)?;
        if self.revoked().contains_key(&claims.jti) {
            return Err(AppError::Unauthorized);
        }
        Ok(claims)
    }

    async fn current_account(&self, id: Uuid) -> AppResult<Account> {
        self.uow
            .accounts()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Account")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockAccountRepository;
    use crate::services::test_support::TestUnitOfWork;

    fn config() -> Config {
        Config::local("sqlite::memory:")
    }

    fn account(password: &str) -> Account {
        let now = Utc::now();
        Account {
            id: Uuid::new_v4(),
            email: "coordenacao@abrigo.org".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            name: "Coordenação".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn authenticator(repo: MockAccountRepository) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(Arc::new(TestUnitOfWork::with_accounts(repo)), config())
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let stored = account("Abrigo#2024");
        let id = stored.id;
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let auth = authenticator(repo);
        let token = auth
            .login("coordenacao@abrigo.org".to_string(), "Abrigo#2024".to_string())
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.name, "Coordenação");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let stored = account("Abrigo#2024");
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let result = authenticator(repo)
            .login("coordenacao@abrigo.org".to_string(), "wrong-password".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let result = authenticator(repo)
            .login("ninguem@abrigo.org".to_string(), "Abrigo#2024".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let stored = account("Abrigo#2024");
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let auth = authenticator(repo);
        let first = auth
            .login("coordenacao@abrigo.org".to_string(), "Abrigo#2024".to_string())
            .await
            .unwrap();
        let second = auth
            .login("coordenacao@abrigo.org".to_string(), "Abrigo#2024".to_string())
            .await
            .unwrap();

        auth.logout(&first.access_token).unwrap();

        assert!(matches!(
            auth.verify_token(&first.access_token),
            Err(AppError::Unauthorized)
        ));
        // other sessions of the same account stay signed in
        assert!(auth.verify_token(&second.access_token).is_ok());
    }

    #[tokio::test]
    async fn test_create_account_duplicate_email() {
        let stored = account("Abrigo#2024");
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_create().never();

        let result = authenticator(repo)
            .create_account(
                "coordenacao@abrigo.org".to_string(),
                "Abrigo#2024".to_string(),
                "Outra".to_string(),
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_account_short_password() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().never();

        let result = authenticator(repo)
            .create_account(
                "nova@abrigo.org".to_string(),
                "curta".to_string(),
                "Nova".to_string(),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let auth = authenticator(MockAccountRepository::new());
        assert!(matches!(auth.verify_token("not-a-jwt"), Err(AppError::Jwt(_))));
    }
}

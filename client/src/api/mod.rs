//! Backend-facing gateway.
//!
//! The domain layer talks to the REST backend exclusively through the
//! [`BankGateway`] trait, so services stay independent of the transport.
//! [`http::HttpGateway`] is the real implementation; [`mock::MockGateway`]
//! is the in-memory double used by the service tests.

use async_trait::async_trait;
use shared::{Account, Money, NewTransaction, TransactionRecord};
use thiserror::Error;

pub mod http;
pub mod mock;

pub use http::HttpGateway;
pub use mock::MockGateway;

/// Balance a freshly registered account starts with: R$ 10.000,00.
pub const INITIAL_BALANCE: Money = Money::from_cents(1_000_000);

/// A failed call to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("email or password did not match any account")]
    InvalidLogin,
    #[error("no account with id {0}")]
    UnknownAccount(String),
}

/// Operations the client needs from the backend store.
///
/// The backend is opaque: users and transactions live behind these calls and
/// nowhere else. Implementations must not retry on their own; failure
/// handling belongs to the calling service.
#[async_trait]
pub trait BankGateway: Send + Sync {
    /// Authenticate by email and password, returning the matching account.
    async fn login(&self, email: &str, password: &str) -> Result<Account, ApiError>;

    /// Create a new account with the initial balance.
    async fn register(&self, name: &str, email: &str, password: &str)
        -> Result<Account, ApiError>;

    /// Fetch the stored account document, including the transaction
    /// password used to authorize transfers.
    async fn fetch_account(&self, user_id: &str) -> Result<Account, ApiError>;

    /// Read the persisted balance for an account.
    async fn fetch_balance(&self, user_id: &str) -> Result<Money, ApiError>;

    /// Persist a transfer; the backend assigns the protocol id.
    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<TransactionRecord, ApiError>;

    /// Overwrite the persisted balance for an account.
    async fn update_balance(&self, user_id: &str, new_balance: Money) -> Result<(), ApiError>;

    /// All transactions of an account, most recent first.
    async fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionRecord>, ApiError>;
}

//! Authenticated session lifecycle.
//!
//! A [`Session`] is an explicit value: created on successful login or
//! registration, handed to whatever needs the authenticated account, and
//! destroyed on logout. Nothing in the crate keeps ambient authentication
//! state.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::info;
use shared::{Account, Money};

use crate::api::{ApiError, BankGateway};

/// An authenticated account plus its session token.
///
/// `account.balance` is the single in-memory source of truth for the user's
/// balance; only the transfer workflow writes to it, after the backend has
/// acknowledged the debit.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub account: Account,
    pub token: String,
}

impl Session {
    /// Wrap a freshly authenticated account.
    pub fn new(account: Account) -> Self {
        let token = BASE64.encode(format!("{}:{}", account.id, account.email));
        Session { account, token }
    }

    pub fn balance(&self) -> Money {
        self.account.balance
    }

    /// Overwrite the in-memory balance with a backend-acknowledged value.
    pub fn set_balance(&mut self, balance: Money) {
        self.account.balance = balance;
    }
}

/// Login, registration and logout against the backend.
pub struct AuthService<G> {
    gateway: Arc<G>,
}

impl<G: BankGateway> AuthService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        AuthService { gateway }
    }

    /// Authenticate and open a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let account = self.gateway.login(email, password).await?;
        info!("account {} logged in", account.id);
        Ok(Session::new(account))
    }

    /// Create an account with the initial balance and open a session for it.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let account = self.gateway.register(name, email, password).await?;
        info!("account {} registered", account.id);
        Ok(Session::new(account))
    }

    /// End a session. Consumes the value; there is nothing to revoke on the
    /// demo backend.
    pub fn logout(&self, session: Session) {
        info!("account {} logged out", session.account.id);
        drop(session);
    }

    /// Re-read the persisted balance into the session.
    pub async fn refresh_balance(&self, session: &mut Session) -> Result<Money, ApiError> {
        let balance = self.gateway.fetch_balance(&session.account.id).await?;
        session.set_balance(balance);
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockGateway, INITIAL_BALANCE};
    use assert_matches::assert_matches;

    fn seeded_gateway() -> Arc<MockGateway> {
        let gateway = MockGateway::new();
        gateway.add_account(Account {
            id: "u1".into(),
            name: "Ana".into(),
            email: "ana@magnum.com".into(),
            balance: Money::from_cents(1_000_000),
            password: Some("123456".into()),
        });
        Arc::new(gateway)
    }

    #[tokio::test]
    async fn login_opens_a_session_with_token() {
        let auth = AuthService::new(seeded_gateway());
        let session = auth.login("ana@magnum.com", "123456").await.unwrap();
        assert_eq!(session.account.id, "u1");
        // base64("u1:ana@magnum.com")
        assert_eq!(session.token, "dTE6YW5hQG1hZ251bS5jb20=");
    }

    #[tokio::test]
    async fn wrong_password_does_not_open_a_session() {
        let auth = AuthService::new(seeded_gateway());
        let result = auth.login("ana@magnum.com", "999999").await;
        assert_matches!(result, Err(ApiError::InvalidLogin));
    }

    #[tokio::test]
    async fn registration_starts_with_the_initial_balance() {
        let auth = AuthService::new(Arc::new(MockGateway::new()));
        let session = auth
            .register("Bruno", "bruno@magnum.com", "654321")
            .await
            .unwrap();
        assert_eq!(session.balance(), INITIAL_BALANCE);

        // The new account can log straight back in.
        let again = auth.login("bruno@magnum.com", "654321").await.unwrap();
        assert_eq!(again.account.id, session.account.id);
    }

    #[tokio::test]
    async fn refresh_balance_overwrites_the_session_copy() {
        let gateway = seeded_gateway();
        let auth = AuthService::new(Arc::clone(&gateway));
        let mut session = auth.login("ana@magnum.com", "123456").await.unwrap();

        session.set_balance(Money::ZERO);
        let refreshed = auth.refresh_balance(&mut session).await.unwrap();
        assert_eq!(refreshed, Money::from_cents(1_000_000));
        assert_eq!(session.balance(), refreshed);
    }
}

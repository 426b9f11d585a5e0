//! Secondary-credential authorization of transfers.

use std::sync::Arc;

use log::warn;
use shared::Account;

use crate::api::BankGateway;
use crate::domain::currency::MoneyInput;
use crate::error::TransferError;

/// Decides whether a proposed transfer may proceed.
///
/// Purely evaluative: it reads the stored credential and the proposed
/// amount, and never touches balances or transactions. The amount is
/// deliberately not compared against the account balance, so an authorized
/// transfer can overdraw.
pub struct TransferAuthorizer<G> {
    gateway: Arc<G>,
}

impl<G: BankGateway> TransferAuthorizer<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        TransferAuthorizer { gateway }
    }

    /// Check the supplied transaction password and the proposed amount.
    ///
    /// The credential is re-read from the backend on every attempt rather
    /// than trusted from the session, and is compared by exact string
    /// equality (the demo backend stores it as plaintext). The credential is
    /// verified before the amount, so a wrong password is reported even when
    /// the amount is also bad.
    pub async fn authorize(
        &self,
        account: &Account,
        credential: &str,
        amount: &MoneyInput,
    ) -> Result<(), TransferError> {
        let stored = self
            .gateway
            .fetch_account(&account.id)
            .await
            .map_err(|err| {
                warn!("credential lookup for account {} failed: {err}", account.id);
                TransferError::LookupFailed
            })?;

        match stored.password.as_deref() {
            Some(stored) if stored == credential => {}
            _ => return Err(TransferError::WrongCredential),
        }

        if !amount.is_positive() {
            return Err(TransferError::InvalidAmount);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockGateway;
    use assert_matches::assert_matches;
    use shared::Money;

    fn account() -> Account {
        Account {
            id: "u1".into(),
            name: "Ana".into(),
            email: "ana@magnum.com".into(),
            balance: Money::from_cents(1_000_000),
            password: Some("123456".into()),
        }
    }

    fn amount(raw: &str) -> MoneyInput {
        let mut input = MoneyInput::new();
        input.apply_keystrokes(raw);
        input
    }

    fn authorizer_for(stored: Account) -> TransferAuthorizer<MockGateway> {
        let gateway = MockGateway::new();
        gateway.add_account(stored);
        TransferAuthorizer::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn matching_credential_and_positive_amount_pass() {
        let authorizer = authorizer_for(account());
        let result = authorizer
            .authorize(&account(), "123456", &amount("10000"))
            .await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn mismatched_credential_is_rejected() {
        let authorizer = authorizer_for(account());
        let result = authorizer
            .authorize(&account(), "000000", &amount("10000"))
            .await;
        assert_matches!(result, Err(TransferError::WrongCredential));
    }

    #[tokio::test]
    async fn missing_stored_credential_is_rejected() {
        let mut stored = account();
        stored.password = None;
        let authorizer = authorizer_for(stored);
        let result = authorizer
            .authorize(&account(), "123456", &amount("10000"))
            .await;
        assert_matches!(result, Err(TransferError::WrongCredential));
    }

    #[tokio::test]
    async fn zero_amount_is_rejected() {
        let authorizer = authorizer_for(account());
        let result = authorizer
            .authorize(&account(), "123456", &amount("000"))
            .await;
        assert_matches!(result, Err(TransferError::InvalidAmount));
    }

    #[tokio::test]
    async fn credential_is_checked_before_the_amount() {
        let authorizer = authorizer_for(account());
        let result = authorizer.authorize(&account(), "000000", &amount("")).await;
        assert_matches!(result, Err(TransferError::WrongCredential));
    }

    #[tokio::test]
    async fn unreachable_lookup_is_a_lookup_failure() {
        let gateway = MockGateway::new();
        gateway.add_account(account());
        gateway.fail_account_lookup();
        let authorizer = TransferAuthorizer::new(Arc::new(gateway));

        let result = authorizer
            .authorize(&account(), "123456", &amount("10000"))
            .await;
        assert_matches!(result, Err(TransferError::LookupFailed));
    }

    #[tokio::test]
    async fn stale_session_credential_is_not_trusted() {
        // The stored password changed after login; the fresh value wins.
        let mut stored = account();
        stored.password = Some("999999".into());
        let authorizer = authorizer_for(stored);

        let result = authorizer
            .authorize(&account(), "123456", &amount("10000"))
            .await;
        assert_matches!(result, Err(TransferError::WrongCredential));
    }
}

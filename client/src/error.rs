//! Failure taxonomy of the transfer workflow.

use thiserror::Error;

use crate::domain::currency::InvalidAmount;

/// Why a transfer attempt ended without completing.
///
/// Every variant is terminal for the attempt it occurred in; nothing is
/// retried by the client. The user resubmits the form to try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The amount field was empty, malformed, or not strictly positive.
    #[error("transfer amount is missing or not positive")]
    InvalidAmount,
    /// The supplied transaction password did not match the stored one, or no
    /// password is stored for the account.
    #[error("transaction password does not match")]
    WrongCredential,
    /// The account document could not be fetched to verify the credential.
    #[error("account lookup failed")]
    LookupFailed,
    /// The backend rejected the transaction creation or the balance update.
    #[error("the backend rejected the transaction")]
    SubmissionError,
}

impl TransferError {
    /// The message shown to the user for this failure class.
    ///
    /// Lookup and submission failures are indistinguishable on screen; only
    /// credential and amount problems get specific wording.
    pub fn user_message(&self) -> &'static str {
        match self {
            TransferError::WrongCredential => "Incorrect transaction password",
            TransferError::InvalidAmount => "Invalid amount for this transfer",
            TransferError::LookupFailed | TransferError::SubmissionError => {
                "The transaction could not be completed"
            }
        }
    }
}

impl From<InvalidAmount> for TransferError {
    fn from(_: InvalidAmount) -> Self {
        TransferError::InvalidAmount
    }
}

//! Transfer submission workflow.
//!
//! Drives a single transfer attempt from the filled-in form to the backend:
//! authorize with the transaction password, persist the transaction, debit
//! the balance, then surface the summary and schedule the redirect to the
//! history view. Each attempt runs to completion or to a terminal failure;
//! nothing is retried.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{error, info, warn};
use shared::{Channel, Destination, NewTransaction, TransactionRecord};
use tokio::sync::mpsc::UnboundedSender;

use crate::api::BankGateway;
use crate::domain::authorization::TransferAuthorizer;
use crate::domain::currency::MoneyInput;
use crate::domain::redirect::{DeferredRedirect, Route, REDIRECT_DELAY};
use crate::domain::session::Session;
use crate::error::TransferError;

/// The transfer form as the user filled it in.
///
/// Destination fields for both rails are kept while the user edits; only the
/// active channel's fields make it into the submitted transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferForm {
    pub channel: Channel,
    pub payee_tax_id: String,
    pub payee_name: String,
    pub bank: String,
    pub agency: String,
    pub account: String,
    pub pix_key: String,
    pub amount: MoneyInput,
    pub date: NaiveDate,
    pub credential: String,
}

impl TransferForm {
    /// Project the destination of the active channel, dropping the other
    /// rail's fields.
    fn destination(&self) -> Destination {
        match self.channel {
            Channel::Pix => Destination::Pix {
                pix_key: self.pix_key.clone(),
            },
            Channel::Ted => Destination::Ted {
                bank: self.bank.clone(),
                agency: self.agency.clone(),
                account: self.account.clone(),
            },
        }
    }
}

/// Where a transfer attempt currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferState {
    Idle,
    Validating,
    Authorizing,
    Submitting,
    Debiting,
    Confirmed,
    Failed(TransferError),
}

/// Orchestrates one transfer attempt at a time.
///
/// `submit` holds `&mut self` for the whole attempt, so a workflow instance
/// can never have two submissions in flight. Dropping the workflow cancels a
/// pending redirect.
pub struct TransferWorkflow<G: BankGateway> {
    gateway: Arc<G>,
    authorizer: TransferAuthorizer<G>,
    routes: UnboundedSender<Route>,
    state: TransferState,
    summary: Option<TransactionRecord>,
    redirect: Option<DeferredRedirect>,
}

impl<G: BankGateway> TransferWorkflow<G> {
    pub fn new(gateway: Arc<G>, routes: UnboundedSender<Route>) -> Self {
        TransferWorkflow {
            authorizer: TransferAuthorizer::new(Arc::clone(&gateway)),
            gateway,
            routes,
            state: TransferState::Idle,
            summary: None,
            redirect: None,
        }
    }

    pub fn state(&self) -> &TransferState {
        &self.state
    }

    /// The confirmed transaction of the last successful attempt.
    pub fn summary(&self) -> Option<&TransactionRecord> {
        self.summary.as_ref()
    }

    /// The user-facing message for a failed attempt.
    pub fn error_message(&self) -> Option<&'static str> {
        match &self.state {
            TransferState::Failed(err) => Some(err.user_message()),
            _ => None,
        }
    }

    /// Run one transfer attempt for the authenticated session.
    ///
    /// On success the session balance is updated to the value the backend
    /// acknowledged and the redirect to the history view is scheduled.
    pub async fn submit(
        &mut self,
        session: &mut Session,
        form: &TransferForm,
    ) -> Result<TransactionRecord, TransferError> {
        self.state = TransferState::Validating;
        self.summary = None;
        // A redirect left over from an earlier attempt must not fire now.
        self.redirect = None;

        let destination = form.destination();
        info!(
            "transfer attempt: account {} via {}",
            session.account.id, form.channel
        );

        self.state = TransferState::Authorizing;
        if let Err(err) = self
            .authorizer
            .authorize(&session.account, &form.credential, &form.amount)
            .await
        {
            return Err(self.fail(err));
        }

        self.state = TransferState::Submitting;
        let amount = match form.amount.amount() {
            Ok(amount) => amount,
            Err(err) => return Err(self.fail(err.into())),
        };
        let request = NewTransaction {
            user_id: session.account.id.clone(),
            channel: form.channel,
            payee_tax_id: form.payee_tax_id.clone(),
            payee_name: form.payee_name.clone(),
            destination,
            amount,
            date: form.date,
        };
        let record = match self.gateway.create_transaction(&request).await {
            Ok(record) => record,
            Err(err) => {
                error!("transaction submission failed: {err}");
                return Err(self.fail(TransferError::SubmissionError));
            }
        };

        self.state = TransferState::Debiting;
        let new_balance = session.balance() - amount;
        if let Err(err) = self
            .gateway
            .update_balance(&session.account.id, new_balance)
            .await
        {
            error!("balance update after transaction {} failed: {err}", record.id);
            return Err(self.fail(TransferError::SubmissionError));
        }

        self.state = TransferState::Confirmed;
        session.set_balance(new_balance);
        info!(
            "transfer {} confirmed, new balance {}",
            record.id, new_balance
        );
        self.redirect = Some(DeferredRedirect::schedule(
            Route::History,
            self.routes.clone(),
            REDIRECT_DELAY,
        ));
        self.summary = Some(record.clone());
        Ok(record)
    }

    fn fail(&mut self, err: TransferError) -> TransferError {
        warn!("transfer failed: {err}");
        self.state = TransferState::Failed(err.clone());
        err
    }
}

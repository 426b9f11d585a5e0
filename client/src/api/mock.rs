//! In-memory gateway double for service tests.
//!
//! Holds accounts and transactions behind a mutex, records every write it
//! receives, and can be told to fail individual operations so the services'
//! failure paths can be exercised without a backend.

use std::sync::Mutex;

use async_trait::async_trait;
use shared::{Account, Money, NewTransaction, TransactionRecord};
use uuid::Uuid;

use super::{ApiError, BankGateway, INITIAL_BALANCE};

#[derive(Default)]
struct MockState {
    accounts: Vec<Account>,
    transactions: Vec<TransactionRecord>,
    submissions: Vec<NewTransaction>,
    fetch_account_calls: usize,
    create_calls: usize,
    update_calls: usize,
    fail_lookup: bool,
    fail_create: bool,
    fail_update: bool,
}

/// In-memory [`BankGateway`] implementation.
#[derive(Default)]
pub struct MockGateway {
    state: Mutex<MockState>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored account document.
    pub fn add_account(&self, account: Account) {
        self.lock().accounts.push(account);
    }

    /// Seed a persisted transaction.
    pub fn add_transaction(&self, record: TransactionRecord) {
        self.lock().transactions.push(record);
    }

    /// Make every `fetch_account` call fail.
    pub fn fail_account_lookup(&self) {
        self.lock().fail_lookup = true;
    }

    /// Make every `create_transaction` call fail.
    pub fn fail_transaction_creation(&self) {
        self.lock().fail_create = true;
    }

    /// Make every `update_balance` call fail.
    pub fn fail_balance_update(&self) {
        self.lock().fail_update = true;
    }

    pub fn fetch_account_calls(&self) -> usize {
        self.lock().fetch_account_calls
    }

    pub fn create_calls(&self) -> usize {
        self.lock().create_calls
    }

    pub fn update_calls(&self) -> usize {
        self.lock().update_calls
    }

    /// The balance as the backend currently stores it.
    pub fn stored_balance(&self, user_id: &str) -> Option<Money> {
        self.lock()
            .accounts
            .iter()
            .find(|a| a.id == user_id)
            .map(|a| a.balance)
    }

    /// The most recent transaction submitted through the gateway.
    pub fn last_submission(&self) -> Option<NewTransaction> {
        self.lock().submissions.last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock gateway state poisoned")
    }
}

#[async_trait]
impl BankGateway for MockGateway {
    async fn login(&self, email: &str, password: &str) -> Result<Account, ApiError> {
        let state = self.lock();
        let matches: Vec<&Account> = state
            .accounts
            .iter()
            .filter(|a| a.email == email && a.password.as_deref() == Some(password))
            .collect();
        match matches.as_slice() {
            [account] => Ok((*account).clone()),
            _ => Err(ApiError::InvalidLogin),
        }
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, ApiError> {
        let account = Account {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            balance: INITIAL_BALANCE,
            password: Some(password.to_string()),
        };
        self.lock().accounts.push(account.clone());
        Ok(account)
    }

    async fn fetch_account(&self, user_id: &str) -> Result<Account, ApiError> {
        let mut state = self.lock();
        state.fetch_account_calls += 1;
        if state.fail_lookup {
            return Err(ApiError::Status(500));
        }
        state
            .accounts
            .iter()
            .find(|a| a.id == user_id)
            .cloned()
            .ok_or_else(|| ApiError::UnknownAccount(user_id.to_string()))
    }

    async fn fetch_balance(&self, user_id: &str) -> Result<Money, ApiError> {
        Ok(self.fetch_account(user_id).await?.balance)
    }

    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<TransactionRecord, ApiError> {
        let mut state = self.lock();
        state.create_calls += 1;
        if state.fail_create {
            return Err(ApiError::Status(500));
        }
        state.submissions.push(transaction.clone());
        let record = TransactionRecord {
            id: Uuid::new_v4().to_string(),
            user_id: transaction.user_id.clone(),
            channel: transaction.channel,
            payee_tax_id: transaction.payee_tax_id.clone(),
            payee_name: transaction.payee_name.clone(),
            destination: transaction.destination.clone(),
            amount: transaction.amount,
            date: transaction.date,
        };
        state.transactions.push(record.clone());
        Ok(record)
    }

    async fn update_balance(&self, user_id: &str, new_balance: Money) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.update_calls += 1;
        if state.fail_update {
            return Err(ApiError::Status(500));
        }
        match state.accounts.iter_mut().find(|a| a.id == user_id) {
            Some(account) => {
                account.balance = new_balance;
                Ok(())
            }
            None => Err(ApiError::UnknownAccount(user_id.to_string())),
        }
    }

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionRecord>, ApiError> {
        let mut records: Vec<TransactionRecord> = self
            .lock()
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        // The backend serves history newest first.
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }
}

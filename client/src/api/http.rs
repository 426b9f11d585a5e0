//! HTTP implementation of the gateway against the demo REST backend.
//!
//! The backend is a json-server style store: `/users` and `/transactions`
//! collections, query-string filtering, `_sort`/`_order` parameters and
//! PATCH for partial updates.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde_json::json;
use shared::{Account, Money, NewTransaction, TransactionRecord};

use super::{ApiError, BankGateway, INITIAL_BALANCE};

const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Gateway talking to the REST backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    http: Client,
}

impl HttpGateway {
    /// Gateway against the default local backend.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Gateway against a custom base URL (no trailing slash).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn expect_ok(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status(status.as_u16()))
        }
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BankGateway for HttpGateway {
    async fn login(&self, email: &str, password: &str) -> Result<Account, ApiError> {
        let response = self
            .http
            .get(self.url("/users"))
            .query(&[("email", email), ("password", password)])
            .send()
            .await?;
        let mut matches: Vec<Account> = Self::expect_ok(response)?.json().await?;
        // Exactly one account may match the pair; anything else is a miss.
        if matches.len() == 1 {
            Ok(matches.remove(0))
        } else {
            Err(ApiError::InvalidLogin)
        }
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, ApiError> {
        let response = self
            .http
            .post(self.url("/users"))
            .json(&json!({
                "name": name,
                "email": email,
                "password": password,
                "balance": INITIAL_BALANCE,
            }))
            .send()
            .await?;
        Ok(Self::expect_ok(response)?.json().await?)
    }

    async fn fetch_account(&self, user_id: &str) -> Result<Account, ApiError> {
        let response = self
            .http
            .get(self.url(&format!("/users/{user_id}")))
            .send()
            .await?;
        Ok(Self::expect_ok(response)?.json().await?)
    }

    async fn fetch_balance(&self, user_id: &str) -> Result<Money, ApiError> {
        Ok(self.fetch_account(user_id).await?.balance)
    }

    async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<TransactionRecord, ApiError> {
        debug!("submitting {} transfer", transaction.channel);
        let response = self
            .http
            .post(self.url("/transactions"))
            .json(transaction)
            .send()
            .await?;
        Ok(Self::expect_ok(response)?.json().await?)
    }

    async fn update_balance(&self, user_id: &str, new_balance: Money) -> Result<(), ApiError> {
        let response = self
            .http
            .patch(self.url(&format!("/users/{user_id}")))
            .json(&json!({ "balance": new_balance }))
            .send()
            .await?;
        Self::expect_ok(response)?;
        Ok(())
    }

    async fn list_transactions(&self, user_id: &str) -> Result<Vec<TransactionRecord>, ApiError> {
        let response = self
            .http
            .get(self.url("/transactions"))
            .query(&[
                ("userId", user_id),
                ("_sort", "date"),
                ("_order", "desc"),
            ])
            .send()
            .await?;
        Ok(Self::expect_ok(response)?.json().await?)
    }
}

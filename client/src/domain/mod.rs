//! Domain services of the banking client.

pub mod authorization;
pub mod currency;
pub mod history_service;
pub mod redirect;
pub mod session;
pub mod transaction_table;
pub mod transfer_service;

pub use authorization::TransferAuthorizer;
pub use currency::MoneyInput;
pub use history_service::{HistoryFilter, HistoryService, HistorySort, SortDirection, SortKey};
pub use redirect::{DeferredRedirect, Route};
pub use session::{AuthService, Session};
pub use transaction_table::{HistoryRow, TransferSummary};
pub use transfer_service::{TransferForm, TransferState, TransferWorkflow};

//! Core of the Magnum Bank demo client.
//!
//! Everything with an invariant to protect lives here: currency input
//! normalization ([`domain::currency`]), transfer authorization and the
//! submit/debit workflow ([`domain::transfer_service`]), and history
//! filtering and ordering ([`domain::history_service`]). The REST backend is
//! reached only through the [`api::BankGateway`] trait; screens, routing and
//! layout are thin glue on top of this crate and live elsewhere.

pub mod api;
pub mod domain;
pub mod error;

pub use error::TransferError;

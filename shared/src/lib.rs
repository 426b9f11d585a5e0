//! Data model shared between the Magnum Bank client and its REST backend.
//!
//! Everything here mirrors the wire format of the backend store: JSON field
//! names follow the backend's camelCase convention (`cpfCnpj`, `pixKey`,
//! `userId`), and the transfer channel serializes as the uppercase rail name
//! (`"PIX"` / `"TED"`).

use std::fmt;
use std::ops::{Add, Sub};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An exact monetary value in minor units (centavos).
///
/// All arithmetic and comparisons happen on the underlying integer; a value
/// is never converted through a binary float. Balances may go negative (the
/// backend does not block overdrafts), amounts entered by a user are always
/// non-negative.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl fmt::Display for Money {
    /// Plain decimal form (`1234.56`), without symbol or grouping. The
    /// user-facing currency rendering lives in the client's currency module.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Transfer rail: instant key-based payment or traditional bank routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    #[default]
    #[serde(rename = "PIX")]
    Pix,
    #[serde(rename = "TED")]
    Ted,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Pix => write!(f, "PIX"),
            Channel::Ted => write!(f, "TED"),
        }
    }
}

/// Channel-specific destination of a transfer.
///
/// Serialized flattened into the owning transaction, so a PIX transfer
/// carries only `pixKey` and a TED transfer only its routing fields. The
/// variants make mixing fields from both rails unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Destination {
    Ted {
        bank: String,
        agency: String,
        account: String,
    },
    Pix {
        #[serde(rename = "pixKey")]
        pix_key: String,
    },
}

impl Destination {
    pub fn channel(&self) -> Channel {
        match self {
            Destination::Ted { .. } => Channel::Ted,
            Destination::Pix { .. } => Channel::Pix,
        }
    }

    /// Single-line description for summary and history rendering.
    pub fn descriptor(&self) -> String {
        match self {
            Destination::Ted {
                bank,
                agency,
                account,
            } => format!("{} / ag. {} / acc. {}", bank, agency, account),
            Destination::Pix { pix_key } => format!("PIX key {}", pix_key),
        }
    }
}

/// A stored user document.
///
/// `password` is the transaction-time secondary credential, held by the demo
/// backend as plaintext and compared by string equality. It is absent from
/// responses that do not include it and never serialized when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A transfer as submitted to the backend, before an id is assigned.
///
/// Built once per form submission and consumed exactly once by the transfer
/// workflow; never persisted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub user_id: String,
    #[serde(rename = "type")]
    pub channel: Channel,
    #[serde(rename = "cpfCnpj")]
    pub payee_tax_id: String,
    #[serde(rename = "name")]
    pub payee_name: String,
    #[serde(flatten)]
    pub destination: Destination,
    pub amount: Money,
    pub date: NaiveDate,
}

/// A persisted transaction, as returned by the backend.
///
/// The backend assigns `id` (the protocol number shown on the transfer
/// summary). Records are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub channel: Channel,
    #[serde(rename = "cpfCnpj")]
    pub payee_tax_id: String,
    #[serde(rename = "name")]
    pub payee_name: String,
    #[serde(flatten)]
    pub destination: Destination,
    pub amount: Money,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn money_arithmetic_is_exact() {
        let balance = Money::from_cents(1_000_000);
        let amount = Money::from_cents(10_000);
        assert_eq!(balance - amount, Money::from_cents(990_000));
        assert_eq!(amount + amount, Money::from_cents(20_000));
    }

    #[test]
    fn money_subtraction_can_go_negative() {
        let new_balance = Money::from_cents(5_000) - Money::from_cents(10_000);
        assert_eq!(new_balance, Money::from_cents(-5_000));
        assert!(new_balance.is_negative());
        assert!(!new_balance.is_positive());
    }

    #[test]
    fn money_serializes_as_minor_unit_integer() {
        let json = serde_json::to_value(Money::from_cents(123_456)).unwrap();
        assert_eq!(json, serde_json::json!(123_456));
        let back: Money = serde_json::from_value(json).unwrap();
        assert_eq!(back, Money::from_cents(123_456));
    }

    #[test]
    fn money_displays_as_plain_decimal() {
        assert_eq!(Money::from_cents(123_456).to_string(), "1234.56");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn channel_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Channel::Pix).unwrap(), "\"PIX\"");
        assert_eq!(serde_json::to_string(&Channel::Ted).unwrap(), "\"TED\"");
    }

    #[test]
    fn pix_transaction_omits_ted_fields() {
        let transaction = NewTransaction {
            user_id: "u1".into(),
            channel: Channel::Pix,
            payee_tax_id: "123.456.789-00".into(),
            payee_name: "Ana".into(),
            destination: Destination::Pix {
                pix_key: "ana@example.com".into(),
            },
            amount: Money::from_cents(10_000),
            date: date("2025-07-01"),
        };

        let json = serde_json::to_value(&transaction).unwrap();
        assert_eq!(json["type"], "PIX");
        assert_eq!(json["pixKey"], "ana@example.com");
        assert_eq!(json["cpfCnpj"], "123.456.789-00");
        assert!(json.get("bank").is_none());
        assert!(json.get("agency").is_none());
        assert!(json.get("account").is_none());
    }

    #[test]
    fn ted_record_round_trips() {
        let record = TransactionRecord {
            id: "42".into(),
            user_id: "u1".into(),
            channel: Channel::Ted,
            payee_tax_id: "12.345.678/0001-00".into(),
            payee_name: "Bruno".into(),
            destination: Destination::Ted {
                bank: "001".into(),
                agency: "1234".into(),
                account: "56789-0".into(),
            },
            amount: Money::from_cents(250_000),
            date: date("2025-06-13"),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: TransactionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn record_parses_backend_document() {
        let json = r#"{
            "id": "7",
            "userId": "u1",
            "type": "PIX",
            "cpfCnpj": "123.456.789-00",
            "name": "Ana",
            "pixKey": "+55 11 91234-5678",
            "amount": 5000,
            "date": "2025-07-15"
        }"#;

        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.channel, Channel::Pix);
        assert_eq!(
            record.destination,
            Destination::Pix {
                pix_key: "+55 11 91234-5678".into()
            }
        );
        assert_eq!(record.amount, Money::from_cents(5000));
        assert_eq!(record.date, date("2025-07-15"));
    }

    #[test]
    fn account_password_is_optional_and_hidden() {
        let json = r#"{"id":"u1","name":"Ana","email":"ana@example.com","balance":1000000}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.password, None);

        let out = serde_json::to_value(&account).unwrap();
        assert!(out.get("password").is_none());
    }
}

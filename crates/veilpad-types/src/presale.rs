//! Presale records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PresaleId, TokenId};

/// A time-boxed fundraising campaign for a token.
///
/// `total_raised` and `participant_count` only ever move through accepted
/// contributions; they are never written by an update patch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Presale {
    #[ts(type = "string")]
    pub id: PresaleId,
    #[ts(type = "string")]
    pub token_id: TokenId,
    pub token_name: String,
    pub token_symbol: String,
    #[ts(type = "string")]
    pub price_per_token: Decimal,
    #[ts(type = "string")]
    pub hard_cap: Decimal,
    #[ts(type = "string | null")]
    pub soft_cap: Option<Decimal>,
    #[ts(type = "string")]
    pub start_date: DateTime<Utc>,
    #[ts(type = "string")]
    pub end_date: DateTime<Utc>,
    pub contract_address: Option<String>,
    pub owner_address: String,
    #[ts(type = "string")]
    pub total_raised: Decimal,
    pub participant_count: u64,
    pub status: PresaleStatus,
    pub is_encrypted: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Presale lifecycle status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PresaleStatus {
    #[default]
    Upcoming,
    Active,
    Ended,
    Finalized,
    Cancelled,
}

impl PresaleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PresaleStatus::Upcoming => "upcoming",
            PresaleStatus::Active => "active",
            PresaleStatus::Ended => "ended",
            PresaleStatus::Finalized => "finalized",
            PresaleStatus::Cancelled => "cancelled",
        }
    }
}

/// Insert input for a presale.
///
/// Running totals are not part of the input; any `totalRaised` or
/// `participantCount` sent by a client is ignored on decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewPresale {
    #[ts(type = "string")]
    pub token_id: TokenId,
    pub token_name: String,
    pub token_symbol: String,
    #[ts(type = "string")]
    pub price_per_token: Decimal,
    #[ts(type = "string")]
    pub hard_cap: Decimal,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub soft_cap: Option<Decimal>,
    #[ts(type = "string")]
    pub start_date: DateTime<Utc>,
    #[ts(type = "string")]
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub contract_address: Option<String>,
    pub owner_address: String,
    #[serde(default)]
    pub status: PresaleStatus,
    #[serde(default = "crate::default_true")]
    pub is_encrypted: bool,
}

impl NewPresale {
    /// Build the stored record with zeroed running totals.
    pub fn into_presale(self, id: PresaleId, created_at: DateTime<Utc>) -> Presale {
        Presale {
            id,
            token_id: self.token_id,
            token_name: self.token_name,
            token_symbol: self.token_symbol,
            price_per_token: self.price_per_token,
            hard_cap: self.hard_cap,
            soft_cap: self.soft_cap,
            start_date: self.start_date,
            end_date: self.end_date,
            contract_address: self.contract_address,
            owner_address: self.owner_address,
            total_raised: Decimal::ZERO,
            participant_count: 0,
            status: self.status,
            is_encrypted: self.is_encrypted,
            created_at,
        }
    }
}

/// Partial update for a presale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PresalePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub token_id: Option<TokenId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub price_per_token: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub hard_cap: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub soft_cap: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PresaleStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_encrypted: Option<bool>,
}

impl PresalePatch {
    /// Shallow-merge this patch into `presale`.
    pub fn apply(self, presale: &mut Presale) {
        if let Some(token_id) = self.token_id {
            presale.token_id = token_id;
        }
        if let Some(name) = self.token_name {
            presale.token_name = name;
        }
        if let Some(symbol) = self.token_symbol {
            presale.token_symbol = symbol;
        }
        if let Some(price) = self.price_per_token {
            presale.price_per_token = price;
        }
        if let Some(hard_cap) = self.hard_cap {
            presale.hard_cap = hard_cap;
        }
        if let Some(soft_cap) = self.soft_cap {
            presale.soft_cap = Some(soft_cap);
        }
        if let Some(start) = self.start_date {
            presale.start_date = start;
        }
        if let Some(end) = self.end_date {
            presale.end_date = end;
        }
        if let Some(address) = self.contract_address {
            presale.contract_address = Some(address);
        }
        if let Some(owner) = self.owner_address {
            presale.owner_address = owner;
        }
        if let Some(status) = self.status {
            presale.status = status;
        }
        if let Some(is_encrypted) = self.is_encrypted {
            presale.is_encrypted = is_encrypted;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Presale patch that only changes the status.
    pub fn status(status: PresaleStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_presale_json() -> serde_json::Value {
        serde_json::json!({
            "tokenId": "3f2b8c1e-9a57-4d1b-a3c2-6f0e4d8b9a10",
            "tokenName": "Privacy Coin",
            "tokenSymbol": "PRIV",
            "pricePerToken": "0.01",
            "hardCap": "100",
            "startDate": "2026-01-01T00:00:00Z",
            "endDate": "2026-01-08T00:00:00Z",
            "ownerAddress": format!("0x{}", "2".repeat(40)),
        })
    }

    #[test]
    fn test_new_presale_defaults() {
        let input: NewPresale = serde_json::from_value(new_presale_json()).expect("decode");
        assert_eq!(input.status, PresaleStatus::Upcoming);
        assert!(input.is_encrypted);
        assert!(input.soft_cap.is_none());
        assert_eq!(input.price_per_token.to_string(), "0.01");
    }

    #[test]
    fn test_running_totals_in_input_are_ignored() {
        let mut json = new_presale_json();
        json["totalRaised"] = serde_json::json!("999");
        json["participantCount"] = serde_json::json!(42);
        let input: NewPresale = serde_json::from_value(json).expect("decode");

        let presale = input.into_presale(uuid::Uuid::new_v4(), Utc::now());
        assert_eq!(presale.total_raised, Decimal::ZERO);
        assert_eq!(presale.participant_count, 0);
    }

    #[test]
    fn test_amounts_serialize_as_strings() {
        let input: NewPresale = serde_json::from_value(new_presale_json()).expect("decode");
        let presale = input.into_presale(uuid::Uuid::new_v4(), Utc::now());
        let value = serde_json::to_value(&presale).expect("encode");
        assert_eq!(value["pricePerToken"], "0.01");
        assert_eq!(value["hardCap"], "100");
        assert_eq!(value["totalRaised"], "0");
        assert_eq!(value["participantCount"], 0);
        assert_eq!(value["status"], "upcoming");
    }

    #[test]
    fn test_patch_cannot_touch_running_totals() {
        let result = serde_json::from_value::<PresalePatch>(serde_json::json!({
            "totalRaised": "1000000",
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<PresalePatch>(serde_json::json!({
            "participantCount": 0,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_status_patch() {
        let input: NewPresale = serde_json::from_value(new_presale_json()).expect("decode");
        let mut presale = input.into_presale(uuid::Uuid::new_v4(), Utc::now());
        PresalePatch::status(PresaleStatus::Active).apply(&mut presale);
        assert_eq!(presale.status, PresaleStatus::Active);
        assert_eq!(presale.token_symbol, "PRIV");
        assert!(!PresalePatch::status(PresaleStatus::Ended).is_empty());
        assert!(PresalePatch::default().is_empty());
    }
}

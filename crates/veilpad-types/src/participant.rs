//! Participant (contribution) records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ParticipantId, PresaleId};

/// A single contribution against a presale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[ts(type = "string")]
    pub id: ParticipantId,
    #[ts(type = "string")]
    pub presale_id: PresaleId,
    pub wallet_address: String,
    #[ts(type = "string")]
    pub contribution_amount: Decimal,
    /// Tokens allocated to the contributor.
    #[ts(type = "string")]
    pub token_amount: Decimal,
    pub transaction_hash: Option<String>,
    #[ts(type = "string")]
    pub contributed_at: DateTime<Utc>,
}

/// Insert input for a contribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipant {
    #[ts(type = "string")]
    pub presale_id: PresaleId,
    pub wallet_address: String,
    #[ts(type = "string")]
    pub contribution_amount: Decimal,
    #[ts(type = "string")]
    pub token_amount: Decimal,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

impl NewParticipant {
    pub fn into_participant(self, id: ParticipantId, contributed_at: DateTime<Utc>) -> Participant {
        Participant {
            id,
            presale_id: self.presale_id,
            wallet_address: self.wallet_address,
            contribution_amount: self.contribution_amount,
            token_amount: self.token_amount,
            transaction_hash: self.transaction_hash,
            contributed_at,
        }
    }
}

//! Token records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::TokenId;

/// A confidential token as stored and returned to the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[ts(type = "string")]
    pub id: TokenId,
    pub name: String,
    pub symbol: String,
    /// Non-negative integer of arbitrary size, kept as its decimal digits.
    pub total_supply: String,
    pub is_encrypted: bool,
    pub contract_address: Option<String>,
    pub deployment_tx_hash: Option<String>,
    pub creator_address: String,
    pub network: String,
    pub status: TokenStatus,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Deployment status of a token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TokenStatus {
    #[default]
    Draft,
    Deploying,
    Deployed,
    Failed,
}

impl TokenStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenStatus::Draft => "draft",
            TokenStatus::Deploying => "deploying",
            TokenStatus::Deployed => "deployed",
            TokenStatus::Failed => "failed",
        }
    }
}

/// Insert input for a token. The store assigns `id` and `createdAt`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewToken {
    pub name: String,
    pub symbol: String,
    pub total_supply: String,
    #[serde(default = "crate::default_true")]
    pub is_encrypted: bool,
    #[serde(default)]
    pub contract_address: Option<String>,
    #[serde(default)]
    pub deployment_tx_hash: Option<String>,
    pub creator_address: String,
    #[serde(default = "crate::default_network")]
    pub network: String,
    #[serde(default)]
    pub status: TokenStatus,
}

impl NewToken {
    /// Build the stored record from this input.
    pub fn into_token(self, id: TokenId, created_at: DateTime<Utc>) -> Token {
        Token {
            id,
            name: self.name,
            symbol: self.symbol,
            total_supply: self.total_supply,
            is_encrypted: self.is_encrypted,
            contract_address: self.contract_address,
            deployment_tx_hash: self.deployment_tx_hash,
            creator_address: self.creator_address,
            network: self.network,
            status: self.status,
            created_at,
        }
    }
}

/// Partial update for a token. Unset fields keep their stored value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_encrypted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TokenStatus>,
}

impl TokenPatch {
    /// Shallow-merge this patch into `token`.
    pub fn apply(self, token: &mut Token) {
        if let Some(name) = self.name {
            token.name = name;
        }
        if let Some(symbol) = self.symbol {
            token.symbol = symbol;
        }
        if let Some(total_supply) = self.total_supply {
            token.total_supply = total_supply;
        }
        if let Some(is_encrypted) = self.is_encrypted {
            token.is_encrypted = is_encrypted;
        }
        if let Some(address) = self.contract_address {
            token.contract_address = Some(address);
        }
        if let Some(tx_hash) = self.deployment_tx_hash {
            token.deployment_tx_hash = Some(tx_hash);
        }
        if let Some(creator) = self.creator_address {
            token.creator_address = creator;
        }
        if let Some(network) = self.network {
            token.network = network;
        }
        if let Some(status) = self.status {
            token.status = status;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

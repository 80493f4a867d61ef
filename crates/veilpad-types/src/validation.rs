//! Input validation.
//!
//! Everything arriving from the UI is checked here before it reaches the
//! store. Decoding already guarantees shape and numeric syntax; these rules
//! cover address formats, ranges, and cross-field constraints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    NewParticipant, NewPresale, NewToken, Presale, PresalePatch, TokenPatch, ADDRESS_HEX_LEN,
    MAX_TOKEN_NAME_LEN, MAX_TOKEN_SYMBOL_LEN, TX_HASH_HEX_LEN,
};

/// A rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: invalid Ethereum address")]
    InvalidAddress { field: &'static str },

    #[error("{field}: invalid transaction hash")]
    InvalidTxHash { field: &'static str },

    #[error("{field}: must be a non-negative integer")]
    NotAnInteger { field: &'static str },

    #[error("{field}: must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field}: must not be negative")]
    Negative { field: &'static str },

    #[error("{field}: must not be empty")]
    Empty { field: &'static str },

    #[error("{field}: must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("symbol: must contain uppercase letters only")]
    InvalidSymbol,

    #[error("softCap: must not exceed hardCap")]
    SoftCapAboveHardCap,

    #[error("endDate: must be after startDate")]
    EndNotAfterStart,
}

/// Implemented by every inbound input and patch.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// `0x` followed by exactly `hex_len` hex digits.
fn is_prefixed_hex(value: &str, hex_len: usize) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == hex_len && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

pub fn is_eth_address(value: &str) -> bool {
    is_prefixed_hex(value, ADDRESS_HEX_LEN)
}

pub fn is_tx_hash(value: &str) -> bool {
    is_prefixed_hex(value, TX_HASH_HEX_LEN)
}

/// Non-empty run of ASCII digits.
pub fn is_integer_string(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn check_address(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_eth_address(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAddress { field })
    }
}

fn check_tx_hash(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_tx_hash(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTxHash { field })
    }
}

fn check_not_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(())
    }
}

fn check_name(value: &str) -> Result<(), ValidationError> {
    check_not_empty("name", value)?;
    if value.trim().chars().count() > MAX_TOKEN_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_TOKEN_NAME_LEN,
        });
    }
    Ok(())
}

fn check_symbol(value: &str) -> Result<(), ValidationError> {
    check_not_empty("symbol", value)?;
    if value.len() > MAX_TOKEN_SYMBOL_LEN {
        return Err(ValidationError::TooLong {
            field: "symbol",
            max: MAX_TOKEN_SYMBOL_LEN,
        });
    }
    if !value.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidSymbol);
    }
    Ok(())
}

fn check_supply(value: &str) -> Result<(), ValidationError> {
    if is_integer_string(value) {
        Ok(())
    } else {
        Err(ValidationError::NotAnInteger {
            field: "totalSupply",
        })
    }
}

fn check_positive(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

fn check_positive_integer(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    check_positive(field, value)?;
    if !value.fract().is_zero() {
        return Err(ValidationError::NotAnInteger { field });
    }
    Ok(())
}

fn check_caps(hard_cap: Decimal, soft_cap: Option<Decimal>) -> Result<(), ValidationError> {
    check_positive_integer("hardCap", hard_cap)?;
    if let Some(soft_cap) = soft_cap {
        check_positive_integer("softCap", soft_cap)?;
        if soft_cap > hard_cap {
            return Err(ValidationError::SoftCapAboveHardCap);
        }
    }
    Ok(())
}

fn check_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ValidationError> {
    if end > start {
        Ok(())
    } else {
        Err(ValidationError::EndNotAfterStart)
    }
}

impl Validate for NewToken {
    fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        check_symbol(&self.symbol)?;
        check_supply(&self.total_supply)?;
        check_address("creatorAddress", &self.creator_address)?;
        if let Some(address) = &self.contract_address {
            check_address("contractAddress", address)?;
        }
        if let Some(tx_hash) = &self.deployment_tx_hash {
            check_tx_hash("deploymentTxHash", tx_hash)?;
        }
        check_not_empty("network", &self.network)
    }
}

impl Validate for TokenPatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_name(name)?;
        }
        if let Some(symbol) = &self.symbol {
            check_symbol(symbol)?;
        }
        if let Some(supply) = &self.total_supply {
            check_supply(supply)?;
        }
        if let Some(creator) = &self.creator_address {
            check_address("creatorAddress", creator)?;
        }
        if let Some(address) = &self.contract_address {
            check_address("contractAddress", address)?;
        }
        if let Some(tx_hash) = &self.deployment_tx_hash {
            check_tx_hash("deploymentTxHash", tx_hash)?;
        }
        if let Some(network) = &self.network {
            check_not_empty("network", network)?;
        }
        Ok(())
    }
}

impl Validate for NewPresale {
    fn validate(&self) -> Result<(), ValidationError> {
        check_not_empty("tokenName", &self.token_name)?;
        check_not_empty("tokenSymbol", &self.token_symbol)?;
        check_positive("pricePerToken", self.price_per_token)?;
        check_caps(self.hard_cap, self.soft_cap)?;
        check_window(self.start_date, self.end_date)?;
        check_address("ownerAddress", &self.owner_address)?;
        if let Some(address) = &self.contract_address {
            check_address("contractAddress", address)?;
        }
        Ok(())
    }
}

impl Validate for PresalePatch {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.token_name {
            check_not_empty("tokenName", name)?;
        }
        if let Some(symbol) = &self.token_symbol {
            check_not_empty("tokenSymbol", symbol)?;
        }
        if let Some(price) = self.price_per_token {
            check_positive("pricePerToken", price)?;
        }
        match (self.hard_cap, self.soft_cap) {
            (Some(hard_cap), soft_cap) => check_caps(hard_cap, soft_cap)?,
            (None, Some(soft_cap)) => check_positive_integer("softCap", soft_cap)?,
            (None, None) => {}
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            check_window(start, end)?;
        }
        if let Some(owner) = &self.owner_address {
            check_address("ownerAddress", owner)?;
        }
        if let Some(address) = &self.contract_address {
            check_address("contractAddress", address)?;
        }
        Ok(())
    }
}

/// Cross-field terms of a stored presale. A patch only sees the fields it
/// sets, so updates re-check the merged record with this.
impl Validate for Presale {
    fn validate(&self) -> Result<(), ValidationError> {
        check_positive("pricePerToken", self.price_per_token)?;
        check_caps(self.hard_cap, self.soft_cap)?;
        check_window(self.start_date, self.end_date)
    }
}

impl Validate for NewParticipant {
    fn validate(&self) -> Result<(), ValidationError> {
        check_address("walletAddress", &self.wallet_address)?;
        check_positive("contributionAmount", self.contribution_amount)?;
        if self.token_amount < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "tokenAmount",
            });
        }
        if let Some(tx_hash) = &self.transaction_hash {
            check_tx_hash("transactionHash", tx_hash)?;
        }
        Ok(())
    }
}

//! Demo data.
//!
//! Two deployed tokens, one active presale with existing contributions and
//! one upcoming presale, all timestamped relative to the store's clock.

use chrono::Duration;
use rust_decimal::Decimal;
use veilpad_types::{Presale, PresaleStatus, Token, TokenStatus, DEFAULT_NETWORK};

use crate::Store;

fn repeat_hex(digit: char, len: usize) -> String {
    format!("0x{}", digit.to_string().repeat(len))
}

/// Insert the demo tokens and presales.
pub fn demo_data(store: &mut Store) {
    let now = store.clock.now();

    let privacy = Token {
        id: store.tokens.fresh_id(),
        name: "Privacy Coin".to_string(),
        symbol: "PRIV".to_string(),
        total_supply: "1000000".to_string(),
        is_encrypted: true,
        contract_address: Some(repeat_hex('1', 40)),
        deployment_tx_hash: Some(repeat_hex('a', 64)),
        creator_address: repeat_hex('2', 40),
        network: DEFAULT_NETWORK.to_string(),
        status: TokenStatus::Deployed,
        created_at: now - Duration::days(7),
    };
    store.tokens.insert(privacy.clone());

    let secure = Token {
        id: store.tokens.fresh_id(),
        name: "Secure Token".to_string(),
        symbol: "SCRT".to_string(),
        total_supply: "500000".to_string(),
        is_encrypted: true,
        contract_address: Some(repeat_hex('3', 40)),
        deployment_tx_hash: Some(repeat_hex('b', 64)),
        creator_address: repeat_hex('4', 40),
        network: DEFAULT_NETWORK.to_string(),
        status: TokenStatus::Deployed,
        created_at: now - Duration::days(3),
    };
    store.tokens.insert(secure.clone());

    let privacy_sale = store.presales.fresh_id();
    store.presales.insert(Presale {
        id: privacy_sale,
        token_id: privacy.id,
        token_name: privacy.name.clone(),
        token_symbol: privacy.symbol.clone(),
        price_per_token: Decimal::new(1, 3),
        hard_cap: Decimal::new(100, 0),
        soft_cap: Some(Decimal::new(10, 0)),
        start_date: now - Duration::days(2),
        end_date: now + Duration::days(5),
        contract_address: Some(repeat_hex('5', 40)),
        owner_address: privacy.creator_address.clone(),
        total_raised: Decimal::new(255, 1),
        participant_count: 12,
        status: PresaleStatus::Active,
        is_encrypted: true,
        created_at: now - Duration::days(3),
    });

    let secure_sale = store.presales.fresh_id();
    store.presales.insert(Presale {
        id: secure_sale,
        token_id: secure.id,
        token_name: secure.name.clone(),
        token_symbol: secure.symbol.clone(),
        price_per_token: Decimal::new(2, 3),
        hard_cap: Decimal::new(50, 0),
        soft_cap: Some(Decimal::new(5, 0)),
        start_date: now + Duration::days(1),
        end_date: now + Duration::days(10),
        contract_address: Some(repeat_hex('6', 40)),
        owner_address: secure.creator_address.clone(),
        total_raised: Decimal::ZERO,
        participant_count: 0,
        status: PresaleStatus::Upcoming,
        is_encrypted: true,
        created_at: now - Duration::days(1),
    });

    tracing::info!(
        tokens = store.tokens.len(),
        presales = store.presales.len(),
        "demo data seeded"
    );
}

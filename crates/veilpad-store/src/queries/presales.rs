//! Presale query functions.

use uuid::Uuid;
use veilpad_types::validation::Validate;
use veilpad_types::{NewPresale, Presale, PresalePatch, PresaleStatus};

use crate::{Result, Store};

/// Insert a new presale. Running totals always start at zero.
pub fn create(store: &mut Store, input: NewPresale) -> Presale {
    let id = store.presales.fresh_id();
    let presale = input.into_presale(id, store.clock.now());
    tracing::debug!(%id, token_id = %presale.token_id, "presale created");
    store.presales.insert(presale.clone());
    presale
}

/// Merge `patch` into the presale. `Ok(None)` if the id is unknown.
///
/// The merged record must still satisfy the cap and date-window rules;
/// otherwise nothing is stored.
pub fn update(store: &mut Store, id: &Uuid, patch: PresalePatch) -> Result<Option<Presale>> {
    let Some(presale) = store.presales.get_mut(id) else {
        return Ok(None);
    };

    let mut merged = presale.clone();
    patch.apply(&mut merged);
    merged.validate()?;

    *presale = merged.clone();
    tracing::debug!(%id, status = merged.status.as_str(), "presale updated");
    Ok(Some(merged))
}

pub fn get(store: &Store, id: &Uuid) -> Option<Presale> {
    store.presales.get(id).cloned()
}

/// All presales, newest first.
pub fn all(store: &Store) -> Vec<Presale> {
    store.presales.newest_first(|_| true, |p| p.created_at)
}

/// Presales with the given status, newest first.
pub fn by_status(store: &Store, status: PresaleStatus) -> Vec<Presale> {
    store
        .presales
        .newest_first(|p| p.status == status, |p| p.created_at)
}

pub fn active(store: &Store) -> Vec<Presale> {
    by_status(store, PresaleStatus::Active)
}

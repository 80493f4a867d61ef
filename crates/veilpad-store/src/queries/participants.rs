//! Participant query functions.
//!
//! Recording a contribution and updating the presale's running totals is one
//! operation: either both happen or neither does.

use rust_decimal::Decimal;
use uuid::Uuid;
use veilpad_types::{NewParticipant, Participant};

use crate::{Result, Store, StoreError};

/// Record a contribution and add it to the presale's totals.
///
/// Fails without recording anything if the presale does not exist, the
/// amount is not positive, or the new total would overflow.
pub fn create(store: &mut Store, input: NewParticipant) -> Result<Participant> {
    if input.contribution_amount <= Decimal::ZERO {
        return Err(StoreError::NonPositiveContribution);
    }

    let presale_id = input.presale_id;
    let contributed_at = store.clock.now();
    let id = store.participants.fresh_id();

    let presale = store
        .presales
        .get_mut(&presale_id)
        .ok_or(StoreError::NotFound {
            kind: "presale",
            id: presale_id,
        })?;
    let total_raised = presale
        .total_raised
        .checked_add(input.contribution_amount)
        .ok_or(StoreError::AmountOverflow)?;
    let participant_count = presale
        .participant_count
        .checked_add(1)
        .ok_or(StoreError::AmountOverflow)?;

    presale.total_raised = total_raised;
    presale.participant_count = participant_count;

    let participant = input.into_participant(id, contributed_at);
    store.participants.insert(participant.clone());

    tracing::debug!(
        %id,
        %presale_id,
        amount = %participant.contribution_amount,
        %total_raised,
        participant_count,
        "contribution recorded"
    );

    Ok(participant)
}

pub fn get(store: &Store, id: &Uuid) -> Option<Participant> {
    store.participants.get(id).cloned()
}

/// Contributions to one presale, newest first.
pub fn by_presale(store: &Store, presale_id: &Uuid) -> Vec<Participant> {
    store
        .participants
        .newest_first(|p| p.presale_id == *presale_id, |p| p.contributed_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::fixtures::{self, dec, participant, presale};
    use crate::queries::presales;
    use chrono::Duration;
    use veilpad_types::PresaleStatus;

    #[test]
    fn test_contribution_updates_presale() {
        let (mut store, _clock) = fixtures::store();
        let p = presales::create(&mut store, presale(Uuid::new_v4(), PresaleStatus::Active));

        let recorded = create(&mut store, participant(p.id, "10")).expect("participate");
        assert_eq!(recorded.presale_id, p.id);
        assert_eq!(recorded.contributed_at, fixtures::epoch());

        let after = presales::get(&store, &p.id).expect("presale");
        assert_eq!(after.total_raised.to_string(), "10");
        assert_eq!(after.participant_count, 1);

        create(&mut store, participant(p.id, "5.5")).expect("participate");
        let after = presales::get(&store, &p.id).expect("presale");
        assert_eq!(after.total_raised.to_string(), "15.5");
        assert_eq!(after.participant_count, 2);
    }

    #[test]
    fn test_n_contributions_sum_exactly() {
        let (mut store, _clock) = fixtures::store();
        let p = presales::create(&mut store, presale(Uuid::new_v4(), PresaleStatus::Active));

        let amounts = ["0.1", "0.2", "0.3", "1.05", "7", "0.000000001"];
        let mut previous = Decimal::ZERO;
        for amount in amounts {
            create(&mut store, participant(p.id, amount)).expect("participate");
            let current = presales::get(&store, &p.id).expect("presale").total_raised;
            assert!(current > previous);
            previous = current;
        }

        let expected: Decimal = amounts.iter().map(|a| dec(a)).sum();
        let after = presales::get(&store, &p.id).expect("presale");
        assert_eq!(after.total_raised, expected);
        assert_eq!(after.total_raised, dec("8.650000001"));
        assert_eq!(after.participant_count, amounts.len() as u64);
    }

    #[test]
    fn test_unknown_presale_rejected_and_nothing_recorded() {
        let (mut store, _clock) = fixtures::store();
        let missing = Uuid::new_v4();

        let result = create(&mut store, participant(missing, "10"));
        assert_eq!(
            result,
            Err(StoreError::NotFound {
                kind: "presale",
                id: missing
            })
        );
        assert_eq!(store.participant_count(), 0);
        assert!(by_presale(&store, &missing).is_empty());
    }

    #[test]
    fn test_non_positive_contribution_rejected() {
        let (mut store, _clock) = fixtures::store();
        let p = presales::create(&mut store, presale(Uuid::new_v4(), PresaleStatus::Active));

        let mut input = participant(p.id, "1");
        input.contribution_amount = dec("-3");
        assert_eq!(
            create(&mut store, input),
            Err(StoreError::NonPositiveContribution)
        );

        let after = presales::get(&store, &p.id).expect("presale");
        assert_eq!(after.total_raised, Decimal::ZERO);
        assert_eq!(after.participant_count, 0);
    }

    #[test]
    fn test_overflow_rejected_and_nothing_recorded() {
        let (mut store, _clock) = fixtures::store();
        let p = presales::create(&mut store, presale(Uuid::new_v4(), PresaleStatus::Active));

        let mut input = participant(p.id, "1");
        input.contribution_amount = Decimal::MAX;
        create(&mut store, input.clone()).expect("first contribution fits");
        assert_eq!(create(&mut store, input), Err(StoreError::AmountOverflow));

        let after = presales::get(&store, &p.id).expect("presale");
        assert_eq!(after.total_raised, Decimal::MAX);
        assert_eq!(after.participant_count, 1);
        assert_eq!(store.participant_count(), 1);
    }

    #[test]
    fn test_by_presale_filters_and_sorts() {
        let (mut store, clock) = fixtures::store();
        let p1 = presales::create(&mut store, presale(Uuid::new_v4(), PresaleStatus::Active));
        let p2 = presales::create(&mut store, presale(Uuid::new_v4(), PresaleStatus::Active));

        let first = create(&mut store, participant(p1.id, "1")).expect("participate");
        clock.advance(Duration::seconds(10));
        create(&mut store, participant(p2.id, "2")).expect("participate");
        clock.advance(Duration::seconds(10));
        let last = create(&mut store, participant(p1.id, "3")).expect("participate");

        let ids: Vec<Uuid> = by_presale(&store, &p1.id).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![last.id, first.id]);
        assert_eq!(by_presale(&store, &p2.id).len(), 1);
        assert_eq!(get(&store, &first.id), Some(first));
        assert!(get(&store, &Uuid::new_v4()).is_none());
    }
}

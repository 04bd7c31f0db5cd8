//! Tax channel ledger.
//!
//! Tracks, per participant, the cumulative tax owed vs. settled plus the
//! list of unsettled payments. Settlement atomically moves `total_paid`
//! up to `total_owed` and clears the pending list; entries are never
//! deleted, so the settlement history (`last_settlement_at`,
//! `total_paid`) survives.

use std::collections::HashMap;
use std::sync::Arc;

use mevtax_sdk::objects::Address;
use tracing::{debug, info};

use crate::entities::channel::{
    ChannelEntry, ChannelStats, EpochSettlementOutcome, SettlementOutcome, SettlementShare,
    TaxPayment,
};
use crate::entities::unix_ms;
use crate::error::LedgerError;
use crate::events::{EventSink, NoopSink, ProtocolEvent};
use crate::settlement::SettlementBackend;

/// Per-participant owed/paid bookkeeping with batch settlement.
pub struct ChannelLedger {
    entries: HashMap<Address, ChannelEntry>,
    sink: Arc<dyn EventSink>,
    backend: Arc<dyn SettlementBackend>,
}

impl ChannelLedger {
    pub fn new(backend: Arc<dyn SettlementBackend>) -> Self {
        Self {
            entries: HashMap::new(),
            sink: Arc::new(NoopSink),
            backend,
        }
    }

    /// Register the event sink. Events emitted before this are dropped.
    pub fn set_sink(&mut self, sink: Arc<dyn EventSink>) {
        self.sink = sink;
    }

    /// Make sure a (possibly empty) entry exists for the participant, so
    /// later accruals and settlements have somewhere to land.
    pub fn ensure_participant(&mut self, participant: &Address) {
        self.entry_mut(participant.clone());
    }

    fn entry_mut(&mut self, participant: Address) -> &mut ChannelEntry {
        self.entries
            .entry(participant.clone())
            .or_insert_with(|| ChannelEntry {
                participant,
                total_owed: 0,
                total_paid: 0,
                pending: Vec::new(),
                last_settlement_at: unix_ms(),
            })
    }

    /// Record an off-chain tax accrual.
    ///
    /// Rejects zero amounts before touching any state; the reference
    /// implementation accepted them, this ledger does not (see the
    /// repository design notes).
    pub fn record_payment(
        &mut self,
        participant: Address,
        amount: u128,
        source_tx_hash: Option<String>,
    ) -> Result<TaxPayment, LedgerError> {
        self.record_payment_at(participant, amount, source_tx_hash, unix_ms())
    }

    fn record_payment_at(
        &mut self,
        participant: Address,
        amount: u128,
        source_tx_hash: Option<String>,
        recorded_at: i64,
    ) -> Result<TaxPayment, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::NonPositiveAmount);
        }
        // Validate the addition before mutating, so a failed call leaves
        // the entry untouched.
        let owed = self
            .entries
            .get(&participant)
            .map(|e| e.total_owed)
            .unwrap_or(0);
        let new_owed = owed
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(participant.to_string()))?;

        let payment = TaxPayment {
            participant: participant.clone(),
            amount,
            recorded_at,
            source_tx_hash,
        };

        let entry = self.entry_mut(participant.clone());
        entry.total_owed = new_owed;
        entry.pending.push(payment.clone());
        debug_assert!(entry.total_owed >= entry.total_paid);

        debug!(%participant, amount, "tax payment recorded");
        self.sink.emit(ProtocolEvent::Tax {
            participant,
            amount,
            timestamp: recorded_at,
        });
        Ok(payment)
    }

    /// Pending (owed minus settled) balance; zero for unknown participants.
    pub fn pending_balance(&self, participant: &Address) -> u128 {
        self.entries
            .get(participant)
            .map(ChannelEntry::pending_balance)
            .unwrap_or(0)
    }

    /// Every unsettled payment across all participants, most recent
    /// first. Within one participant, same-timestamp payments keep their
    /// recording order.
    pub fn all_pending(&self) -> Vec<TaxPayment> {
        let mut payments: Vec<TaxPayment> = self
            .entries
            .values()
            .flat_map(|e| e.pending.iter().cloned())
            .collect();
        payments.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        payments
    }

    /// Settle a participant's pending balance.
    ///
    /// Unknown participant or empty pending list is a no-op yielding a
    /// zero outcome. Otherwise the entry is reconciled in one step: no
    /// partial clearing is ever observable.
    pub fn settle(&mut self, participant: &Address) -> SettlementOutcome {
        let Some(entry) = self.entries.get_mut(participant) else {
            return SettlementOutcome {
                participant: participant.clone(),
                amount_settled: 0,
                settlement_ref: None,
            };
        };
        if entry.pending.is_empty() {
            return SettlementOutcome {
                participant: participant.clone(),
                amount_settled: 0,
                settlement_ref: None,
            };
        }

        let amount = entry.total_owed - entry.total_paid;
        let reference = self.backend.submit(participant, amount);

        entry.total_paid = entry.total_owed;
        entry.pending.clear();
        entry.last_settlement_at = unix_ms();
        debug_assert!(entry.total_owed >= entry.total_paid);

        info!(%participant, amount, reference, "channel settled");
        self.sink.emit(ProtocolEvent::Settlement {
            participant: participant.clone(),
            amount,
            settlement_ref: reference.clone(),
        });

        SettlementOutcome {
            participant: participant.clone(),
            amount_settled: amount,
            settlement_ref: Some(reference),
        }
    }

    /// Settle every participant with a positive pending balance
    /// ("epoch settlement").
    ///
    /// The participant set is snapshotted up front, so each entry with a
    /// positive balance at call time is settled exactly once.
    pub fn settle_all(&mut self) -> EpochSettlementOutcome {
        let due: Vec<Address> = self
            .entries
            .values()
            .filter(|e| e.pending_balance() > 0)
            .map(|e| e.participant.clone())
            .collect();

        let mut settlements = Vec::with_capacity(due.len());
        let mut total_settled: u128 = 0;
        for participant in due {
            let outcome = self.settle(&participant);
            total_settled += outcome.amount_settled;
            settlements.push(SettlementShare {
                participant,
                amount_settled: outcome.amount_settled,
            });
        }

        let participant_count = settlements.len();
        info!(participant_count, total_settled, "epoch settlement complete");
        if participant_count > 0 {
            self.sink.emit(ProtocolEvent::EpochSettlement {
                total_settled,
                participant_count,
            });
        }

        EpochSettlementOutcome {
            total_settled,
            participant_count,
            settlements,
        }
    }

    /// Aggregate channel statistics. The active session count lives in
    /// the session registry and is passed in by the caller.
    pub fn stats(&self, active_sessions: usize) -> ChannelStats {
        let mut total_pending: u128 = 0;
        let mut total_settled: u128 = 0;
        let mut active_channels = 0;
        let mut pending_payments = 0;
        for entry in self.entries.values() {
            total_pending += entry.pending_balance();
            total_settled += entry.total_paid;
            if !entry.pending.is_empty() {
                active_channels += 1;
                pending_payments += entry.pending.len();
            }
        }
        ChannelStats {
            is_connected: self.backend.is_connected(),
            active_channels,
            active_sessions,
            total_pending_tax: total_pending,
            total_settled_tax: total_settled,
            pending_payments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::sink::RecordingSink;
    use crate::settlement::MockSettlementBackend;

    fn addr(n: u8) -> Address {
        format!("0x{:040x}", n).parse().unwrap()
    }

    fn ledger() -> ChannelLedger {
        ChannelLedger::new(Arc::new(MockSettlementBackend))
    }

    #[test]
    fn accrual_then_settlement_scenario() {
        let mut ledger = ledger();
        ledger.record_payment(addr(0xa), 500, None).unwrap();
        ledger.record_payment(addr(0xa), 300, None).unwrap();
        assert_eq!(ledger.pending_balance(&addr(0xa)), 800);

        let outcome = ledger.settle(&addr(0xa));
        assert_eq!(outcome.amount_settled, 800);
        assert!(outcome.settlement_ref.is_some());
        assert_eq!(ledger.pending_balance(&addr(0xa)), 0);

        // Entry history survives the settlement.
        let entry = ledger.entries.get(&addr(0xa)).unwrap();
        assert_eq!(entry.total_owed, 800);
        assert_eq!(entry.total_paid, 800);
        assert!(entry.pending.is_empty());
    }

    #[test]
    fn settle_is_idempotent_when_nothing_pending() {
        let mut ledger = ledger();
        ledger.record_payment(addr(1), 100, None).unwrap();
        assert_eq!(ledger.settle(&addr(1)).amount_settled, 100);

        let again = ledger.settle(&addr(1));
        assert_eq!(again.amount_settled, 0);
        assert_eq!(again.settlement_ref, None);

        // Unknown participant is the same no-op.
        let unknown = ledger.settle(&addr(2));
        assert_eq!(unknown.amount_settled, 0);
        assert_eq!(unknown.settlement_ref, None);
    }

    #[test]
    fn zero_amount_is_rejected_without_mutation() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.record_payment(addr(1), 0, None),
            Err(LedgerError::NonPositiveAmount)
        );
        assert!(ledger.entries.is_empty());
        assert_eq!(ledger.pending_balance(&addr(1)), 0);
    }

    #[test]
    fn overflow_is_rejected_without_mutation() {
        let mut ledger = ledger();
        ledger.record_payment(addr(1), u128::MAX, None).unwrap();
        let err = ledger.record_payment(addr(1), 1, None).unwrap_err();
        assert!(matches!(err, LedgerError::BalanceOverflow(_)));

        let entry = ledger.entries.get(&addr(1)).unwrap();
        assert_eq!(entry.total_owed, u128::MAX);
        assert_eq!(entry.pending.len(), 1);
    }

    #[test]
    fn owed_never_below_paid() {
        let mut ledger = ledger();
        for i in 1..=5u128 {
            ledger.record_payment(addr(1), i * 10, None).unwrap();
            let entry = ledger.entries.get(&addr(1)).unwrap();
            assert!(entry.total_owed >= entry.total_paid);
            assert_eq!(
                ledger.pending_balance(&addr(1)),
                entry.total_owed - entry.total_paid
            );
        }
        ledger.settle(&addr(1));
        let entry = ledger.entries.get(&addr(1)).unwrap();
        assert!(entry.total_owed >= entry.total_paid);
        assert_eq!(entry.pending_balance(), 0);
    }

    #[test]
    fn bulk_settlement_covers_every_positive_balance_once() {
        let mut ledger = ledger();
        ledger.record_payment(addr(1), 100, None).unwrap();
        ledger.record_payment(addr(2), 250, None).unwrap();
        // A settled participant has zero pending and is excluded.
        ledger.record_payment(addr(3), 40, None).unwrap();
        ledger.settle(&addr(3));

        let outcome = ledger.settle_all();
        assert_eq!(outcome.total_settled, 350);
        assert_eq!(outcome.participant_count, 2);
        let mut amounts: Vec<u128> = outcome
            .settlements
            .iter()
            .map(|s| s.amount_settled)
            .collect();
        amounts.sort_unstable();
        assert_eq!(amounts, vec![100, 250]);
        assert_eq!(ledger.pending_balance(&addr(1)), 0);
        assert_eq!(ledger.pending_balance(&addr(2)), 0);

        // Nothing left: the follow-up epoch settles zero participants.
        let empty = ledger.settle_all();
        assert_eq!(empty.total_settled, 0);
        assert_eq!(empty.participant_count, 0);
    }

    #[test]
    fn all_pending_is_most_recent_first() {
        let mut ledger = ledger();
        ledger
            .record_payment_at(addr(1), 10, None, 1_000)
            .unwrap();
        ledger
            .record_payment_at(addr(2), 20, None, 3_000)
            .unwrap();
        ledger
            .record_payment_at(addr(1), 30, None, 2_000)
            .unwrap();
        // Same timestamp: recording order must hold within a participant.
        ledger
            .record_payment_at(addr(1), 40, None, 3_000)
            .unwrap();

        let pending = ledger.all_pending();
        let amounts: Vec<u128> = pending.iter().map(|p| p.amount).collect();
        assert_eq!(pending.len(), 4);
        assert_eq!(amounts[2], 30);
        assert_eq!(amounts[3], 10);
        // The two 3_000-ms payments come first in some cross-participant
        // order; within addr(1) the 40 never precedes an earlier accrual
        // with a later timestamp.
        assert!(amounts[..2].contains(&20));
        assert!(amounts[..2].contains(&40));
    }

    #[test]
    fn stats_aggregate_across_entries() {
        let mut ledger = ledger();
        ledger.record_payment(addr(1), 100, None).unwrap();
        ledger.record_payment(addr(1), 50, None).unwrap();
        ledger.record_payment(addr(2), 200, None).unwrap();
        ledger.settle(&addr(2));
        ledger.ensure_participant(&addr(3));

        let stats = ledger.stats(7);
        assert!(stats.is_connected);
        assert_eq!(stats.active_channels, 1);
        assert_eq!(stats.active_sessions, 7);
        assert_eq!(stats.total_pending_tax, 150);
        assert_eq!(stats.total_settled_tax, 200);
        assert_eq!(stats.pending_payments, 2);
    }

    #[test]
    fn sink_receives_tax_and_settlement_events() {
        let sink = Arc::new(RecordingSink::default());
        let mut ledger = ledger();
        ledger.set_sink(sink.clone());

        ledger.record_payment(addr(1), 500, None).unwrap();
        ledger.record_payment(addr(2), 300, None).unwrap();
        ledger.settle_all();

        let events = sink.take();
        let taxes = events
            .iter()
            .filter(|e| matches!(e, ProtocolEvent::Tax { .. }))
            .count();
        let settlements = events
            .iter()
            .filter(|e| matches!(e, ProtocolEvent::Settlement { .. }))
            .count();
        assert_eq!(taxes, 2);
        assert_eq!(settlements, 2);
        assert!(matches!(
            events.last(),
            Some(ProtocolEvent::EpochSettlement {
                total_settled: 800,
                participant_count: 2,
            })
        ));
    }
}

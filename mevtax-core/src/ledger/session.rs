//! Channel session registry.
//!
//! Sessions gate tax accrual: opening one guarantees the participant has
//! a channel ledger entry, and closing one forces a final settlement
//! before the session is removed from the active index.

use std::collections::HashMap;

use mevtax_sdk::objects::Address;
use tracing::info;
use uuid::Uuid;

use crate::entities::channel::SettlementOutcome;
use crate::entities::session::{ChannelSession, VAULT_PARTICIPANT};
use crate::entities::unix_ms;
use crate::ledger::channel::ChannelLedger;

/// Active session index, keyed by session id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, ChannelSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session between a participant and the protocol vault.
    ///
    /// The session id embeds the participant and a time-ordered UUID
    /// suffix, so two opens in the same millisecond still get distinct
    /// ids. Also makes sure the channel ledger has an entry for the
    /// participant so subsequent accruals land somewhere.
    pub fn open(
        &mut self,
        ledger: &mut ChannelLedger,
        participant: Address,
        initial_deposit: u128,
    ) -> ChannelSession {
        let session_id = format!("chan-{}-{}", participant, Uuid::now_v7().simple());
        let mut allocations = HashMap::new();
        allocations.insert(participant.to_string(), initial_deposit);
        allocations.insert(VAULT_PARTICIPANT.to_owned(), 0);

        let session = ChannelSession {
            session_id: session_id.clone(),
            participant: participant.clone(),
            allocations,
            is_active: true,
            created_at: unix_ms(),
        };

        ledger.ensure_participant(&participant);
        self.sessions.insert(session_id.clone(), session.clone());

        info!(%participant, session_id, "channel session opened");
        session
    }

    /// Close every session involving the participant, settling their
    /// ledger entry first. A participant with no active session is a
    /// no-op (the settlement outcome is then zero as well).
    pub fn close(
        &mut self,
        ledger: &mut ChannelLedger,
        participant: &Address,
    ) -> SettlementOutcome {
        let outcome = ledger.settle(participant);

        self.sessions.retain(|session_id, session| {
            if session.participant == *participant {
                session.is_active = false;
                info!(%participant, session_id, "channel session closed");
                false
            } else {
                true
            }
        });

        outcome
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Active sessions for one participant (diagnostics and tests).
    pub fn sessions_for(&self, participant: &Address) -> Vec<&ChannelSession> {
        self.sessions
            .values()
            .filter(|s| s.participant == *participant)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::MockSettlementBackend;
    use std::sync::Arc;

    fn addr(n: u8) -> Address {
        format!("0x{:040x}", n).parse().unwrap()
    }

    fn ledger() -> ChannelLedger {
        ChannelLedger::new(Arc::new(MockSettlementBackend))
    }

    #[test]
    fn open_creates_session_and_ledger_entry() {
        let mut ledger = ledger();
        let mut registry = SessionRegistry::new();

        let session = registry.open(&mut ledger, addr(0xb), 1000);
        assert!(session.is_active);
        assert_eq!(session.allocations[addr(0xb).as_str()], 1000);
        assert_eq!(session.allocations[VAULT_PARTICIPANT], 0);
        assert_eq!(registry.active_count(), 1);

        // The ledger entry exists even before any accrual.
        assert_eq!(ledger.pending_balance(&addr(0xb)), 0);
        ledger.record_payment(addr(0xb), 200, None).unwrap();
        assert_eq!(ledger.pending_balance(&addr(0xb)), 200);
    }

    #[test]
    fn session_ids_are_unique_for_same_participant() {
        let mut ledger = ledger();
        let mut registry = SessionRegistry::new();

        let a = registry.open(&mut ledger, addr(1), 10);
        let b = registry.open(&mut ledger, addr(1), 10);
        assert_ne!(a.session_id, b.session_id);
        assert_eq!(registry.active_count(), 2);
    }

    #[test]
    fn close_forces_settlement_and_removes_sessions() {
        let mut ledger = ledger();
        let mut registry = SessionRegistry::new();

        registry.open(&mut ledger, addr(0xb), 1000);
        ledger.record_payment(addr(0xb), 200, None).unwrap();

        let outcome = registry.close(&mut ledger, &addr(0xb));
        assert_eq!(outcome.amount_settled, 200);
        assert_eq!(ledger.pending_balance(&addr(0xb)), 0);
        assert_eq!(registry.active_count(), 0);
        assert!(registry.sessions_for(&addr(0xb)).is_empty());
    }

    #[test]
    fn close_without_session_is_a_noop() {
        let mut ledger = ledger();
        let mut registry = SessionRegistry::new();

        let outcome = registry.close(&mut ledger, &addr(5));
        assert_eq!(outcome.amount_settled, 0);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn close_only_touches_the_given_participant() {
        let mut ledger = ledger();
        let mut registry = SessionRegistry::new();

        registry.open(&mut ledger, addr(1), 10);
        registry.open(&mut ledger, addr(2), 20);
        ledger.record_payment(addr(2), 50, None).unwrap();

        registry.close(&mut ledger, &addr(1));
        assert_eq!(registry.active_count(), 1);
        assert_eq!(ledger.pending_balance(&addr(2)), 50);
    }
}

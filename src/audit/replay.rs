use crate::{
    Intent, RecordId, RejectionReason, Transition, TransitionDigest, Verdict,
    config::AuditConfig, state::LineageIndex, validation::Validator,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Disagreement between a transition and the replayed ledger state
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum Conflict {
    #[error("record {0} has no live version")]
    UnknownRecord(RecordId),
    #[error("consumed version of record {0} is not the live one")]
    StaleVersion(RecordId),
    #[error("record {0} is already registered")]
    DuplicateRecord(RecordId),
}

/// What happened to one transition during replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AuditOutcome {
    Applied,
    Rejected(RejectionReason),
    Conflict(Conflict),
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub position: usize,
    pub digest: TransitionDigest,
    pub intent: Intent,
    pub outcome: AuditOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub entries: Vec<AuditEntry>,
    /// Lineages still live after the last applied transition
    pub live_records: usize,
    /// Set when replay stopped at a failure instead of running to the end
    pub halted: bool,
}

impl AuditReport {
    pub fn applied(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == AuditOutcome::Applied)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome != AuditOutcome::Applied)
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Replays a transition history in order
pub struct LineageAudit {
    validator: Validator,
    index: LineageIndex,
    config: AuditConfig,
}

impl LineageAudit {
    pub fn new(config: AuditConfig) -> Self {
        Self {
            validator: Validator::new(),
            index: LineageIndex::new(),
            config,
        }
    }

    /// Replay `history` and report the outcome of each transition
    ///
    /// Consumes `self` so a report always describes one history from an empty index.
    /// The returned index holds the state reached by the applied transitions.
    pub fn replay(mut self, history: impl IntoIterator<Item = Transition>) -> (AuditReport, LineageIndex) {
        info!(
            "Lineage audit starting (stop_on_first_failure={})",
            self.config.stop_on_first_failure
        );

        let mut report = AuditReport::default();
        for (position, tx) in history.into_iter().enumerate() {
            let outcome = self.step(&tx);
            let failed = outcome != AuditOutcome::Applied;

            match &outcome {
                AuditOutcome::Applied => debug!("#{} {} applied", position, tx.intent),
                AuditOutcome::Rejected(reason) => {
                    warn!("#{} {} rejected: {}", position, tx.intent, reason)
                }
                AuditOutcome::Conflict(conflict) => {
                    warn!("#{} {} conflicts with replayed state: {}", position, tx.intent, conflict)
                }
            }

            report.entries.push(AuditEntry {
                position,
                digest: tx.digest(),
                intent: tx.intent,
                outcome,
            });

            if failed && self.config.stop_on_first_failure {
                report.halted = true;
                break;
            }
        }

        report.live_records = self.index.len();
        info!(
            "Lineage audit finished: {} of {} transitions applied, {} live records",
            report.applied(),
            report.entries.len(),
            report.live_records
        );
        (report, self.index)
    }

    /// Check one transition against state, then the validator, then apply it
    fn step(&mut self, tx: &Transition) -> AuditOutcome {
        if let Err(conflict) = self.check_state(tx) {
            return AuditOutcome::Conflict(conflict);
        }

        match self.validator.validate(tx) {
            Verdict::Accepted => {
                self.index.apply(tx);
                AuditOutcome::Applied
            }
            Verdict::Rejected(reason) => AuditOutcome::Rejected(reason),
        }
    }

    fn check_state(&self, tx: &Transition) -> Result<(), Conflict> {
        for record in &tx.consumed {
            let id = record.record_id;
            match self.index.current(&id) {
                None => return Err(Conflict::UnknownRecord(id)),
                Some(live) if live != record => return Err(Conflict::StaleVersion(id)),
                Some(_) => {}
            }
        }

        if tx.intent == Intent::Register {
            if let Some(record) = tx.produced.iter().find(|r| self.index.contains(&r.record_id)) {
                return Err(Conflict::DuplicateRecord(record.record_id));
            }
        }
        Ok(())
    }
}

use crate::{
    Field, Intent, RejectionReason, ResidentRecord, Transition, Verdict,
    validation::signers::{check_exact, required_signers},
};
use tracing::{debug, warn};

/// Transition validator
///
/// Holds no state: `validate` is a deterministic function of the transition,
/// so one instance can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a proposed transition
    /// Returns `Verdict::Accepted` if admissible, otherwise the first rule it breaks
    pub fn validate(&self, tx: &Transition) -> Verdict {
        debug!(
            intent = %tx.intent,
            consumed = tx.consumed.len(),
            produced = tx.produced.len(),
            "Validating transition"
        );

        let result = match tx.intent {
            Intent::Register => self.check_register(tx),
            Intent::Change => self.check_change(tx),
            Intent::Delete => self.check_delete(tx),
        };

        match &result {
            Ok(()) => debug!(intent = %tx.intent, "Transition validation successful"),
            Err(reason) => warn!(intent = %tx.intent, "Transition rejected: {}", reason),
        }
        result.into()
    }

    /// No inputs, one fresh record signed by its city
    fn check_register(&self, tx: &Transition) -> Result<(), RejectionReason> {
        let ([], [record]) = (tx.consumed.as_slice(), tx.produced.as_slice()) else {
            return Err(cardinality(tx, 0, 1));
        };

        check_present(record)?;

        // A fresh lineage has no predecessor to point at
        if record.old_city.is_some() {
            return Err(RejectionReason::LineageBroken {
                field: Field::OldCity,
            });
        }
        if record.old_address.is_some() {
            return Err(RejectionReason::LineageBroken {
                field: Field::OldAddress,
            });
        }

        check_exact(
            required_signers(tx.intent, &tx.consumed, &tx.produced),
            &tx.signer_keys,
        )
    }

    /// One record in, its successor out, signed by both the old and new city
    fn check_change(&self, tx: &Transition) -> Result<(), RejectionReason> {
        let ([input], [output]) = (tx.consumed.as_slice(), tx.produced.as_slice()) else {
            return Err(cardinality(tx, 1, 1));
        };

        // 1. The responsible authority has to move
        if output.current_city.same_authority(&input.current_city) {
            return Err(RejectionReason::AuthorityUnchanged);
        }

        // 2. Identity fields are fixed for the whole lineage
        check_immutable(input, output)?;

        // 3. The successor must point back at the consumed version
        check_lineage(input, output)?;

        // 4. A relocation always lands on a new address
        if output.current_address == input.current_address {
            return Err(RejectionReason::AddressUnchanged);
        }
        check_present(output)?;

        // 5. Exactly the two authorities involved
        check_exact(
            required_signers(tx.intent, &tx.consumed, &tx.produced),
            &tx.signer_keys,
        )
    }

    /// One record in, nothing out, signed by the current city
    fn check_delete(&self, tx: &Transition) -> Result<(), RejectionReason> {
        let ([_], []) = (tx.consumed.as_slice(), tx.produced.as_slice()) else {
            return Err(cardinality(tx, 1, 0));
        };

        check_exact(
            required_signers(tx.intent, &tx.consumed, &tx.produced),
            &tx.signer_keys,
        )
    }
}

fn cardinality(tx: &Transition, expected_consumed: usize, expected_produced: usize) -> RejectionReason {
    RejectionReason::WrongCardinality {
        intent: tx.intent,
        expected_consumed,
        expected_produced,
        consumed: tx.consumed.len(),
        produced: tx.produced.len(),
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Fields every registered version must carry
fn check_present(record: &ResidentRecord) -> Result<(), RejectionReason> {
    let required = [
        (Field::ResidentName, record.resident_name.as_str()),
        (Field::MyNumber, record.my_number.as_str()),
        (Field::CurrentAddress, record.current_address.as_str()),
    ];
    match required.into_iter().find(|(_, value)| is_blank(value)) {
        Some((field, _)) => Err(RejectionReason::MissingField { field }),
        None => Ok(()),
    }
}

fn check_immutable(input: &ResidentRecord, output: &ResidentRecord) -> Result<(), RejectionReason> {
    let changed = if output.resident_name != input.resident_name {
        Some(Field::ResidentName)
    } else if output.my_number != input.my_number {
        Some(Field::MyNumber)
    } else if output.birthday != input.birthday {
        Some(Field::Birthday)
    } else if output.record_id != input.record_id {
        Some(Field::RecordId)
    } else {
        None
    };
    match changed {
        Some(field) => Err(RejectionReason::ImmutableFieldChanged { field }),
        None => Ok(()),
    }
}

fn check_lineage(input: &ResidentRecord, output: &ResidentRecord) -> Result<(), RejectionReason> {
    if output.old_address.as_deref() != Some(input.current_address.as_str()) {
        return Err(RejectionReason::LineageBroken {
            field: Field::OldAddress,
        });
    }
    if output.old_city.as_ref() != Some(&input.current_city) {
        return Err(RejectionReason::LineageBroken {
            field: Field::OldCity,
        });
    }
    Ok(())
}

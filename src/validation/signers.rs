//! Required signer derivation
//!
//! The required set is always computed from record contents, never taken from the caller.

use crate::{Intent, RejectionReason, ResidentRecord, SignerKey};
use std::collections::BTreeSet;

/// Keys that must sign a transition of `intent` over the given records
///
/// Register needs the produced record's city, Delete the consumed record's city,
/// Change both. Records absent for the intent's shape contribute nothing.
pub fn required_signers(
    intent: Intent,
    consumed: &[ResidentRecord],
    produced: &[ResidentRecord],
) -> BTreeSet<SignerKey> {
    let cities = match intent {
        Intent::Register => produced.iter().take(1).collect::<Vec<_>>(),
        Intent::Change => consumed.iter().take(1).chain(produced.iter().take(1)).collect(),
        Intent::Delete => consumed.iter().take(1).collect(),
    };
    cities.into_iter().map(|r| r.current_city.key).collect()
}

/// Exact set comparison between declared and required signers
pub(crate) fn check_exact(
    required: BTreeSet<SignerKey>,
    declared: &BTreeSet<SignerKey>,
) -> Result<(), RejectionReason> {
    if &required != declared {
        return Err(RejectionReason::SignerMismatch {
            required,
            declared: declared.clone(),
        });
    }
    Ok(())
}

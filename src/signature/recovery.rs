use crate::{Intent, ResidentRecord, SignerKey, Transition, TransitionDigest};
use ethers::types::Signature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, warn};

use super::digest::body_digest;

/// Malformed signature input
///
/// Distinct from a [`crate::RejectionReason`]: the transition never reached the validator.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature #{index} cannot be recovered: {source}")]
    Unrecoverable {
        index: usize,
        #[source]
        source: ethers::types::SignatureError,
    },
}

/// Transition body together with the signatures collected over its digest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedTransition {
    pub intent: Intent,
    #[serde(default)]
    pub consumed: Vec<ResidentRecord>,
    #[serde(default)]
    pub produced: Vec<ResidentRecord>,
    #[serde(default)]
    pub signatures: Vec<Signature>,
}

impl SignedTransition {
    /// Digest every signature must cover
    pub fn digest(&self) -> TransitionDigest {
        body_digest(self.intent, &self.consumed, &self.produced)
    }

    /// Recover the signer key set
    ///
    /// A signature made over a different body still recovers to some address; it just
    /// won't be a required signer, so the validator reports it as a signer mismatch.
    pub fn recover(self) -> Result<Transition, SignatureError> {
        let digest = self.digest();
        let mut signer_keys = BTreeSet::<SignerKey>::new();

        for (index, signature) in self.signatures.iter().enumerate() {
            let signer = signature.recover(digest).map_err(|source| {
                warn!("Signature #{} over {:?} is unrecoverable", index, digest);
                SignatureError::Unrecoverable { index, source }
            })?;
            signer_keys.insert(signer);
        }
        debug!("Recovered {} signer keys for {:?}", signer_keys.len(), digest);

        Ok(Transition {
            intent: self.intent,
            consumed: self.consumed,
            produced: self.produced,
            signer_keys,
        })
    }
}

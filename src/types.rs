use chrono::NaiveDate;
use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Key an authority signs transitions with
pub type SignerKey = Address;

/// Identifier shared by every version in a record's lineage.
///
/// Assigned once by whoever registers the record and never regenerated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Administrative authority responsible for a record
///
/// Authorities are identified by key; the name is for display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub key: SignerKey,
}

impl City {
    pub fn new(name: impl Into<String>, key: SignerKey) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }

    /// Whether both values denote the same authority
    pub fn same_authority(&self, other: &City) -> bool {
        self.key == other.key
    }
}

/// One version of a resident's registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentRecord {
    pub resident_name: String,
    pub my_number: String,
    pub birthday: NaiveDate,
    pub current_city: City,
    pub current_address: String,
    #[serde(default)]
    pub old_city: Option<City>,
    #[serde(default)]
    pub old_address: Option<String>,
    pub record_id: RecordId,
}

/// What a transition claims to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Register,
    Change,
    Delete,
}

impl Intent {
    /// Tag byte used in the canonical transition encoding
    pub(crate) fn tag(self) -> u8 {
        match self {
            Intent::Register => 0,
            Intent::Change => 1,
            Intent::Delete => 2,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Register => write!(f, "Register"),
            Intent::Change => write!(f, "Change"),
            Intent::Delete => write!(f, "Delete"),
        }
    }
}

/// Proposed replacement of consumed record versions by produced ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub intent: Intent,
    #[serde(default)]
    pub consumed: Vec<ResidentRecord>,
    #[serde(default)]
    pub produced: Vec<ResidentRecord>,
    /// Keys already judged to have signed this transition
    pub signer_keys: BTreeSet<SignerKey>,
}

impl Transition {
    pub fn register(record: ResidentRecord, signer_keys: BTreeSet<SignerKey>) -> Self {
        Self {
            intent: Intent::Register,
            consumed: Vec::new(),
            produced: vec![record],
            signer_keys,
        }
    }

    pub fn change(
        consumed: ResidentRecord,
        produced: ResidentRecord,
        signer_keys: BTreeSet<SignerKey>,
    ) -> Self {
        Self {
            intent: Intent::Change,
            consumed: vec![consumed],
            produced: vec![produced],
            signer_keys,
        }
    }

    pub fn delete(consumed: ResidentRecord, signer_keys: BTreeSet<SignerKey>) -> Self {
        Self {
            intent: Intent::Delete,
            consumed: vec![consumed],
            produced: Vec::new(),
            signer_keys,
        }
    }

    /// Record ids consumed by this transition
    pub fn consumed_ids(&self) -> Vec<RecordId> {
        self.consumed.iter().map(|r| r.record_id).collect()
    }
}

/// Record fields named in rejections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    ResidentName,
    MyNumber,
    Birthday,
    CurrentAddress,
    OldCity,
    OldAddress,
    RecordId,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::ResidentName => "resident_name",
            Field::MyNumber => "my_number",
            Field::Birthday => "birthday",
            Field::CurrentAddress => "current_address",
            Field::OldCity => "old_city",
            Field::OldAddress => "old_address",
            Field::RecordId => "record_id",
        };
        f.write_str(name)
    }
}

/// Why a transition was not admitted
///
/// Every rejection is deterministic: resubmitting the same transition yields the same reason.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RejectionReason {
    #[error("{intent} expects {expected_consumed} consumed and {expected_produced} produced records, got {consumed} and {produced}")]
    WrongCardinality {
        intent: Intent,
        expected_consumed: usize,
        expected_produced: usize,
        consumed: usize,
        produced: usize,
    },
    #[error("produced record is missing {field}")]
    MissingField { field: Field },
    #[error("{field} must not change across a record's lineage")]
    ImmutableFieldChanged { field: Field },
    #[error("produced {field} does not match the consumed record's current value")]
    LineageBroken { field: Field },
    #[error("current_city must change in a Change transition")]
    AuthorityUnchanged,
    #[error("current_address must change in a Change transition")]
    AddressUnchanged,
    #[error("signer keys {declared:?} do not match the required set {required:?}")]
    SignerMismatch {
        required: BTreeSet<SignerKey>,
        declared: BTreeSet<SignerKey>,
    },
}

/// Outcome of validating one transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    Rejected(RejectionReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(reason) => Some(reason),
        }
    }
}

impl From<Result<(), RejectionReason>> for Verdict {
    fn from(result: Result<(), RejectionReason>) -> Self {
        match result {
            Ok(()) => Verdict::Accepted,
            Err(reason) => Verdict::Rejected(reason),
        }
    }
}

/// Digest identifying a transition body, see [`Transition::digest`]
pub type TransitionDigest = H256;

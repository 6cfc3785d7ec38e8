use crate::{City, Intent, ResidentRecord, Transition, TransitionDigest};
use chrono::Datelike;
use ethers::utils::keccak256;

impl Transition {
    /// Compute the digest authorities sign
    ///
    /// Covers intent, consumed and produced records. Signer keys are not part of it.
    pub fn digest(&self) -> TransitionDigest {
        body_digest(self.intent, &self.consumed, &self.produced)
    }
}

/// Digest of a transition body, shared with [`super::SignedTransition`]
pub(crate) fn body_digest(
    intent: Intent,
    consumed: &[ResidentRecord],
    produced: &[ResidentRecord],
) -> TransitionDigest {
    let mut data = Vec::new();
    data.push(intent.tag());
    encode_records(&mut data, consumed);
    encode_records(&mut data, produced);
    TransitionDigest::from_slice(&keccak256(data))
}

fn encode_records(data: &mut Vec<u8>, records: &[ResidentRecord]) {
    data.extend_from_slice(&(records.len() as u64).to_be_bytes());
    for record in records {
        encode_str(data, &record.resident_name);
        encode_str(data, &record.my_number);
        data.extend_from_slice(&record.birthday.num_days_from_ce().to_be_bytes());
        encode_city(data, &record.current_city);
        encode_str(data, &record.current_address);
        match &record.old_city {
            Some(city) => {
                data.push(1);
                encode_city(data, city);
            }
            None => data.push(0),
        }
        match &record.old_address {
            Some(address) => {
                data.push(1);
                encode_str(data, address);
            }
            None => data.push(0),
        }
        data.extend_from_slice(record.record_id.0.as_bytes());
    }
}

fn encode_city(data: &mut Vec<u8>, city: &City) {
    encode_str(data, &city.name);
    data.extend_from_slice(city.key.as_bytes());
}

// Length-prefixed so adjacent fields cannot run into each other
fn encode_str(data: &mut Vec<u8>, value: &str) {
    data.extend_from_slice(&(value.len() as u64).to_be_bytes());
    data.extend_from_slice(value.as_bytes());
}

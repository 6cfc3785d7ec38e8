//! Property tests for the transition validator

use crate::{
    City, Intent, RecordId, RejectionReason, ResidentRecord, SignerKey, Transition, Verdict,
    validation::{Validator, validator::is_blank},
};
use chrono::NaiveDate;
use ethers::types::Address;
use proptest::prelude::*;
use std::collections::BTreeSet;
use uuid::Uuid;

fn arb_city() -> impl Strategy<Value = City> {
    ("[A-Z][a-z]{2,8}", any::<[u8; 20]>()).prop_map(|(name, key)| City::new(name, Address::from(key)))
}

fn arb_record() -> impl Strategy<Value = ResidentRecord> {
    (
        "[A-Za-z ]{0,12}",
        "[0-9]{0,12}",
        0i32..40_000,
        arb_city(),
        "[A-Za-z0-9-]{0,10}",
        any::<u128>(),
    )
        .prop_map(|(name, number, days, city, address, id)| {
            let birthday = NaiveDate::from_ymd_opt(1900, 1, 1)
                .and_then(|d| d.checked_add_signed(chrono::Duration::days(i64::from(days))))
                .unwrap();
            ResidentRecord::register(
                name,
                number,
                birthday,
                city,
                address,
                RecordId::from(Uuid::from_u128(id)),
            )
        })
}

fn arb_keys() -> impl Strategy<Value = BTreeSet<SignerKey>> {
    proptest::collection::btree_set(any::<[u8; 20]>().prop_map(Address::from), 0..4)
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![Just(Intent::Register), Just(Intent::Change), Just(Intent::Delete)]
}

proptest! {
    #[test]
    fn register_with_wrong_shape_is_wrong_cardinality(
        consumed in proptest::collection::vec(arb_record(), 0..3),
        produced in proptest::collection::vec(arb_record(), 0..3),
        signer_keys in arb_keys(),
    ) {
        prop_assume!(!consumed.is_empty() || produced.len() != 1);
        let tx = Transition { intent: Intent::Register, consumed, produced, signer_keys };
        let verdict = Validator::new().validate(&tx);
        let is_wrong_cardinality = matches!(
            verdict,
            Verdict::Rejected(RejectionReason::WrongCardinality { .. })
        );
        prop_assert!(is_wrong_cardinality);
    }

    #[test]
    fn accepted_change_preserves_lineage(
        input in arb_record(),
        output in arb_record(),
        derive in any::<bool>(),
        new_city in arb_city(),
        new_address in "[A-Za-z0-9-]{1,10}",
        signer_keys in arb_keys(),
        sign_correctly in any::<bool>(),
    ) {
        let output = if derive { input.next_version(new_city, new_address) } else { output };
        let signer_keys = if sign_correctly {
            [input.current_city.key, output.current_city.key].into_iter().collect()
        } else {
            signer_keys
        };
        let tx = Transition::change(input.clone(), output.clone(), signer_keys);

        if Validator::new().validate(&tx).is_accepted() {
            prop_assert_eq!(output.old_address.as_deref(), Some(input.current_address.as_str()));
            prop_assert_eq!(output.old_city, Some(input.current_city));
            prop_assert_eq!(&output.resident_name, &input.resident_name);
            prop_assert_eq!(&output.my_number, &input.my_number);
            prop_assert_eq!(output.birthday, input.birthday);
        }
    }

    #[test]
    fn change_within_same_city_is_authority_unchanged(
        input in arb_record(),
        output in arb_record(),
        signer_keys in arb_keys(),
    ) {
        let mut output = output;
        output.current_city = input.current_city.clone();
        let tx = Transition::change(input, output, signer_keys);
        prop_assert_eq!(
            Validator::new().validate(&tx),
            Verdict::Rejected(RejectionReason::AuthorityUnchanged)
        );
    }

    #[test]
    fn change_needs_exactly_both_city_keys(
        input in arb_record(),
        new_city in arb_city(),
        new_address in "[A-Za-z0-9-]{1,10}",
        extra in any::<[u8; 20]>().prop_map(Address::from),
    ) {
        prop_assume!(!new_city.same_authority(&input.current_city));
        prop_assume!(!is_blank(&input.resident_name) && !is_blank(&input.my_number));
        prop_assume!(new_address != input.current_address);
        prop_assume!(extra != input.current_city.key && extra != new_city.key);

        let output = input.next_version(new_city.clone(), new_address);
        let exact: BTreeSet<_> = [input.current_city.key, new_city.key].into_iter().collect();
        let tx = Transition::change(input.clone(), output.clone(), exact.clone());
        prop_assert_eq!(Validator::new().validate(&tx), Verdict::Accepted);

        let mut padded = exact;
        padded.insert(extra);
        let tx = Transition::change(input, output, padded);
        let is_signer_mismatch = matches!(
            Validator::new().validate(&tx),
            Verdict::Rejected(RejectionReason::SignerMismatch { .. })
        );
        prop_assert!(is_signer_mismatch);
    }

    #[test]
    fn next_version_is_deterministic(
        record in arb_record(),
        city in arb_city(),
        address in "[A-Za-z0-9-]{0,10}",
    ) {
        let first = record.next_version(city.clone(), address.clone());
        let second = record.next_version(city, address);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn validation_is_deterministic(
        intent in arb_intent(),
        consumed in proptest::collection::vec(arb_record(), 0..2),
        produced in proptest::collection::vec(arb_record(), 0..2),
        signer_keys in arb_keys(),
    ) {
        let tx = Transition { intent, consumed, produced, signer_keys };
        let validator = Validator::new();
        prop_assert_eq!(validator.validate(&tx), validator.validate(&tx));
    }
}

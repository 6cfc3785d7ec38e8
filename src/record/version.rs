use crate::{City, RecordId, ResidentRecord};
use chrono::NaiveDate;

impl ResidentRecord {
    /// Build the initial version of a lineage
    ///
    /// `record_id` comes from the caller; the crate never generates identifiers.
    pub fn register(
        resident_name: impl Into<String>,
        my_number: impl Into<String>,
        birthday: NaiveDate,
        city: City,
        address: impl Into<String>,
        record_id: RecordId,
    ) -> Self {
        Self {
            resident_name: resident_name.into(),
            my_number: my_number.into(),
            birthday,
            current_city: city,
            current_address: address.into(),
            old_city: None,
            old_address: None,
            record_id,
        }
    }

    /// Derive the successor version after a move to `new_city`
    ///
    /// The current city and address become the old ones; identity fields are copied as-is.
    pub fn next_version(&self, new_city: City, new_address: impl Into<String>) -> Self {
        Self {
            resident_name: self.resident_name.clone(),
            my_number: self.my_number.clone(),
            birthday: self.birthday,
            current_city: new_city,
            current_address: new_address.into(),
            old_city: Some(self.current_city.clone()),
            old_address: Some(self.current_address.clone()),
            record_id: self.record_id,
        }
    }

    /// Authorities entitled to see this version
    pub fn participants(&self) -> Vec<City> {
        let mut parties = vec![self.current_city.clone()];
        if let Some(old) = &self.old_city {
            if !old.same_authority(&self.current_city) {
                parties.push(old.clone());
            }
        }
        parties
    }

    /// True for a version with no predecessor
    pub fn is_initial(&self) -> bool {
        self.old_city.is_none() && self.old_address.is_none()
    }
}

use serde::{Deserialize, Serialize};

/// A registered courier-service staff member.
///
/// Serialized with the field names the staff file uses on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub name: String,
    pub staff_id: String,
    pub contact_number: String,
}

impl StaffRecord {
    pub fn new(
        name: impl Into<String>,
        staff_id: impl Into<String>,
        contact_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            staff_id: staff_id.into(),
            contact_number: contact_number.into(),
        }
    }

    /// Exact match on both login fields.
    pub fn matches(&self, staff_id: &str, contact_number: &str) -> bool {
        self.staff_id == staff_id && self.contact_number == contact_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_requires_both_fields() {
        let record = StaffRecord::new("A", "S1", "111");
        assert!(record.matches("S1", "111"));
        assert!(!record.matches("S1", "000"));
        assert!(!record.matches("S2", "111"));
        assert!(!record.matches("s1", "111"));
    }

    #[test]
    fn test_serialized_field_names() {
        let record = StaffRecord::new("A", "S1", "111");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "A");
        assert_eq!(value["staff_id"], "S1");
        assert_eq!(value["contact_number"], "111");
    }
}

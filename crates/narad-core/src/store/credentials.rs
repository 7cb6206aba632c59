use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{RegisterError, StoreError};
use crate::models::StaffRecord;

/// JSON file of staff records, keyed by `staff_id`.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record, reporting why the file could not be used.
    ///
    /// A missing file is an empty store, not an error.
    pub fn try_load(&self) -> Result<Vec<StaffRecord>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "Staff file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Read every record. Unreadable or malformed files yield an empty list.
    pub fn load(&self) -> Vec<StaffRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Failed to load staff file, using empty store");
                Vec::new()
            }
        }
    }

    /// Overwrite the file with `records`. Failures are logged, never returned.
    pub fn save(&self, records: &[StaffRecord]) {
        if let Err(e) = self.write_records(records) {
            warn!(error = %e, path = ?self.path, "Failed to save staff file");
        }
    }

    fn write_records(&self, records: &[StaffRecord]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, contents)
    }

    pub fn find_by_credentials(&self, staff_id: &str, contact_number: &str) -> Option<StaffRecord> {
        self.load()
            .into_iter()
            .find(|r| r.matches(staff_id, contact_number))
    }

    pub fn exists(&self, staff_id: &str) -> bool {
        self.load().iter().any(|r| r.staff_id == staff_id)
    }

    /// Append a new staff member and persist the store.
    pub fn register(
        &self,
        name: &str,
        staff_id: &str,
        contact_number: &str,
    ) -> Result<StaffRecord, RegisterError> {
        validate_field("Name", name)?;
        validate_field("Staff ID", staff_id)?;
        validate_field("Contact number", contact_number)?;

        let mut records = self.load();
        if records.iter().any(|r| r.staff_id == staff_id) {
            return Err(RegisterError::AlreadyExists(staff_id.to_string()));
        }

        let record = StaffRecord::new(name, staff_id, contact_number);
        records.push(record.clone());
        self.save(&records);
        info!(staff_id, total = records.len(), "Registered staff member");
        Ok(record)
    }
}

fn validate_field(field: &'static str, value: &str) -> Result<(), RegisterError> {
    if value.trim().is_empty() {
        Err(RegisterError::Validation(field))
    } else {
        Ok(())
    }
}

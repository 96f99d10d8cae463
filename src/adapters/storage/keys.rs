//! Versioned storage keys

/// The three top-level records, with the schema version embedded in each key
/// so an incompatible layout never reads older blobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub subjects: String,
    pub exams: String,
    pub settings: String,
}

impl StorageKeys {
    /// Builds `{prefix}_{record}_{version}` keys
    ///
    /// # Examples
    ///
    /// ```
    /// use aso_control::adapters::storage::StorageKeys;
    ///
    /// let keys = StorageKeys::new("aso_control", "v3");
    /// assert_eq!(keys.exams, "aso_control_exams_v3");
    /// ```
    pub fn new(prefix: &str, version: &str) -> Self {
        Self {
            subjects: format!("{prefix}_subjects_{version}"),
            exams: format!("{prefix}_exams_{version}"),
            settings: format!("{prefix}_settings_{version}"),
        }
    }

    /// Every key, for wholesale clearing
    pub fn all(&self) -> [&str; 3] {
        [&self.subjects, &self.exams, &self.settings]
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new("aso_control", "v3")
    }
}

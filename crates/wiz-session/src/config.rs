/// Namespace prefix the wizard framework stores journey state under.
pub const DEFAULT_JOURNEY_PREFIX: &str = "hmpo-wizard-";

/// Settings for a [`SessionManager`](crate::SessionManager).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Prefix prepended to journey keys inside the session record.
    pub journey_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            journey_prefix: DEFAULT_JOURNEY_PREFIX.to_string(),
        }
    }
}

impl SessionConfig {
    /// Record key for `journey_key` under the configured prefix.
    pub fn namespaced_key(&self, journey_key: &str) -> String {
        format!("{}{}", self.journey_prefix, journey_key)
    }
}

//! Key layout: `{prefix}.jobs` and `{prefix}.job.{id}.{field}`.

/// Prefix used by existing deployments.
pub const DEFAULT_KEY_PREFIX: &str = "piapi.youget";

pub const FIELD_STATUS: &str = "status";
pub const FIELD_NAME: &str = "video_name";
pub const FIELD_URL: &str = "url";
pub const FIELD_PID: &str = "pid";
pub const FIELD_METADATA: &str = "metadata";
pub const FIELD_FORMAT: &str = "format";

/// Fields that must exist for a record to be readable, in MGET order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    FIELD_NAME,
    FIELD_URL,
    FIELD_STATUS,
    FIELD_PID,
    FIELD_METADATA,
];

/// Builds store keys for a given prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    prefix: String,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}

impl KeyLayout {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn queue(&self) -> String {
        format!("{}.jobs", self.prefix)
    }

    pub fn field(&self, id: &str, field: &str) -> String {
        format!("{}.job.{}.{}", self.prefix, id, field)
    }

    pub fn fields(&self, id: &str, fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| self.field(id, f)).collect()
    }
}

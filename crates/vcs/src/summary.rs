use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Working-copy state relative to a base branch, computed fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BranchChangeSummary {
    pub current_branch: String,

    /// Paths modified in the working tree but not staged.
    pub changed_files: Vec<String>,

    /// Paths staged in the index.
    pub staged_files: Vec<String>,

    /// Commits on `HEAD` that are not on the base branch, rendered as a decimal string.
    #[serde(with = "count_as_string")]
    #[schemars(with = "String")]
    pub commits_ahead: u64,

    pub base_branch: String,
}

mod count_as_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(count: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&count.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse().map_err(de::Error::custom)
    }
}

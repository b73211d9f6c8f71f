use thiserror::Error;

/// Failures a tool invocation can surface through the error envelope.
///
/// A missing pull request template is deliberately absent: it resolves to a success carrying a
/// fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("not inside a version-controlled working tree: {detail}")]
    NotAVersionControlledTree { detail: String },

    #[error("{detail}")]
    UnderlyingQueryFailed { detail: String },

    #[error("missing required argument `{name}`")]
    MissingRequiredArgument { name: String },

    #[error("argument `{name}` must be a {expected}")]
    ArgumentTypeMismatch { name: String, expected: &'static str },

    #[error("argument `{name}` does not match the required pattern `{pattern}`")]
    ArgumentPatternMismatch { name: String, pattern: String },
}

impl ToolError {
    pub fn query_failed(detail: impl Into<String>) -> Self {
        Self::UnderlyingQueryFailed {
            detail: detail.into(),
        }
    }

    /// Stable machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAVersionControlledTree { .. } => "not_a_version_controlled_tree",
            Self::UnderlyingQueryFailed { .. } => "underlying_query_failed",
            Self::MissingRequiredArgument { .. } => "missing_required_argument",
            Self::ArgumentTypeMismatch { .. } => "argument_type_mismatch",
            Self::ArgumentPatternMismatch { .. } => "argument_pattern_mismatch",
        }
    }

    /// Validation errors are raised before any collaborator is touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredArgument { .. }
                | Self::ArgumentTypeMismatch { .. }
                | Self::ArgumentPatternMismatch { .. }
        )
    }
}

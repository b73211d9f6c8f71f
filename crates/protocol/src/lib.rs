//! Transport-independent contract for the PR link tool gateway.
//!
//! Every tool is described by a [`ToolSpec`]; arguments are validated against it before any
//! handler runs, and every outcome is rendered through [`InvocationResult`] into the uniform
//! `{"status": ...}` envelope.

mod envelope;
mod error;
mod tool_spec;

pub use envelope::{InvocationResult, STATUS_ERROR, STATUS_SUCCESS};
pub use error::ToolError;
pub use tool_spec::{ParamKind, ParamSpec, ToolArgs, ToolSpec};

/// Base branch used when a tool's `base_branch` argument is omitted.
pub const DEFAULT_BASE_BRANCH: &str = "main";

pub fn serialize_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

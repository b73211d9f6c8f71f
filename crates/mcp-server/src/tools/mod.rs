//! PR link tool surface.
//!
//! Split into the catalog (names + schemas), the registry (validation + dispatch), per-tool
//! handlers, the pure URL builder, the template reader, and the MCP service adapter.

pub(crate) mod catalog;
mod handlers;
pub mod pr_url;
mod registry;
mod service;
pub mod template;

pub use registry::{ToolRegistry, UnknownTool};
pub use service::PrLinkService;

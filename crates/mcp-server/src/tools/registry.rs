use super::catalog::{build_catalog, CatalogEntry};
use super::handlers::{self, ToolContext};
use super::template::{FsTemplateReader, TemplateReader};
use crate::config::ServerConfig;
use anyhow::Result;
use prlink_protocol::{InvocationResult, ToolError, ToolSpec};
use prlink_vcs::{GitCli, VcsQuery};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// The requested tool is not in the catalog. A routing failure, not a tool-level error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool `{name}`")]
pub struct UnknownTool {
    pub name: String,
}

/// Immutable tool catalog plus the collaborators its handlers call.
///
/// Built once at startup; cloning shares the same table.
#[derive(Clone)]
pub struct ToolRegistry {
    entries: Arc<[CatalogEntry]>,
    ctx: Arc<ToolContext>,
}

impl ToolRegistry {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let git = GitCli::new(&config.root).with_program(&config.git_bin);
        Self::with_collaborators(config, Arc::new(git), Arc::new(FsTemplateReader))
    }

    pub fn with_collaborators(
        config: &ServerConfig,
        vcs: Arc<dyn VcsQuery>,
        templates: Arc<dyn TemplateReader>,
    ) -> Result<Self> {
        let entries = build_catalog(config)?;
        Ok(Self {
            entries: entries.into(),
            ctx: Arc::new(ToolContext {
                vcs,
                templates,
                host: config.host.clone(),
            }),
        })
    }

    pub fn specs(&self) -> impl Iterator<Item = &ToolSpec> {
        self.entries.iter().map(|entry| &entry.spec)
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.spec.name).collect()
    }

    /// Run one tool.
    ///
    /// Only an unknown tool name is an `Err`. Validation failures, collaborator failures and
    /// handler panics all come back as [`InvocationResult::Failure`].
    pub async fn invoke(
        &self,
        name: &str,
        args: Option<&Map<String, Value>>,
    ) -> Result<InvocationResult, UnknownTool> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.spec.name == name)
            .ok_or_else(|| UnknownTool {
                name: name.to_string(),
            })?;
        log::debug!("invoke {name}");

        let ignored = entry.spec.undeclared(args);
        if !ignored.is_empty() {
            log::debug!("{name}: ignoring undeclared arguments {ignored:?}");
        }

        let validated = match entry.spec.validate(args) {
            Ok(validated) => validated,
            Err(err) => return Ok(Self::finish(name, Err(err))),
        };

        let kind = entry.kind;
        let ctx = self.ctx.clone();
        let outcome = tokio::spawn(async move { handlers::run(kind, &ctx, validated).await }).await;
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(join_err) => {
                let detail = panic_detail(join_err);
                log::error!("{name}: handler aborted: {detail}");
                Err(ToolError::query_failed(format!(
                    "internal error in `{name}`: {detail}"
                )))
            }
        };
        Ok(Self::finish(name, outcome))
    }

    fn finish(name: &str, outcome: Result<InvocationResult, ToolError>) -> InvocationResult {
        match outcome {
            Ok(result) => result,
            Err(err) if err.is_validation() => {
                log::info!("{name} rejected its arguments ({}): {err}", err.code());
                err.into()
            }
            Err(err) => {
                log::info!("{name} failed ({}): {err}", err.code());
                err.into()
            }
        }
    }
}

fn panic_detail(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

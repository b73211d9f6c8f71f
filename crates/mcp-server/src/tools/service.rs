use super::catalog;
use super::registry::ToolRegistry;
use crate::config::ServerConfig;
use anyhow::Result;
use prlink_protocol::InvocationResult;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler};
use serde_json::json;
use std::sync::Arc;

/// MCP front of the tool registry.
#[derive(Clone)]
pub struct PrLinkService {
    registry: ToolRegistry,
}

impl PrLinkService {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        Ok(Self::from_registry(ToolRegistry::new(config)?))
    }

    pub fn from_registry(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub(crate) fn mcp_tools(&self) -> Vec<Tool> {
        self.registry
            .specs()
            .map(|spec| {
                Tool::new(
                    spec.name,
                    spec.description.clone(),
                    Arc::new(spec.input_schema()),
                )
            })
            .collect()
    }
}

/// Envelope JSON as text content, mirrored into `structured_content`.
pub(crate) fn call_tool_result(result: &InvocationResult) -> CallToolResult {
    let envelope = result.to_envelope();
    let text = envelope.to_string();
    let mut out = if result.is_success() {
        CallToolResult::success(vec![Content::text(text)])
    } else {
        CallToolResult::error(vec![Content::text(text)])
    };
    out.structured_content = Some(envelope);
    out
}

impl ServerHandler for PrLinkService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(catalog::tool_instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.mcp_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .registry
            .invoke(&request.name, request.arguments.as_ref())
            .await
        {
            Ok(result) => Ok(call_tool_result(&result)),
            Err(unknown) => {
                log::warn!("rejecting call: {unknown}");
                Err(McpError::invalid_params(
                    unknown.to_string(),
                    Some(json!({
                        "tool": unknown.name,
                        "available": self.registry.tool_names(),
                    })),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeVcs;
    use crate::tools::template::FsTemplateReader;
    use serde_json::Value;

    fn service(allow_push: bool) -> PrLinkService {
        let mut config = ServerConfig::for_root("/srv/work");
        config.allow_push = allow_push;
        let registry = ToolRegistry::with_collaborators(
            &config,
            Arc::new(FakeVcs::repo("/srv/work", "main")),
            Arc::new(FsTemplateReader),
        )
        .expect("registry");
        PrLinkService::from_registry(registry)
    }

    #[test]
    fn tools_carry_input_schemas() {
        let tools = service(false).mcp_tools();
        assert_eq!(tools.len(), 6);
        let pr = tools
            .iter()
            .find(|t| t.name == "create_github_pr_url")
            .expect("pr tool");
        assert_eq!(
            pr.input_schema.get("required"),
            Some(&json!(["github_url", "head_branch", "title", "body"]))
        );
        let root = tools
            .iter()
            .find(|t| t.name == "get_root_path")
            .expect("root tool");
        assert_eq!(root.input_schema.get("type"), Some(&json!("object")));
    }

    #[test]
    fn push_tool_listed_only_when_allowed() {
        assert!(service(false).mcp_tools().iter().all(|t| t.name != "push_branch"));
        assert!(service(true).mcp_tools().iter().any(|t| t.name == "push_branch"));
    }

    #[test]
    fn failure_result_is_flagged_and_structured() {
        let result = call_tool_result(&InvocationResult::failure("boom"));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content,
            Some(json!({"status": "error", "message": "boom"}))
        );
        let text = result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .expect("text content");
        let parsed: Value = serde_json::from_str(&text).expect("json text");
        assert_eq!(parsed["message"], json!("boom"));
    }

    #[test]
    fn success_result_is_not_flagged() {
        let result = call_tool_result(&InvocationResult::success("branch_name", "main"));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result.structured_content,
            Some(json!({"status": "success", "branch_name": "main"}))
        );
    }

    #[test]
    fn server_info_advertises_tools() {
        let info = service(false).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info
            .instructions
            .as_deref()
            .is_some_and(|i| i.contains("create_github_pr_url")));
    }
}

#![allow(dead_code)]

use anyhow::{Context, Result};
use rmcp::model::{CallToolRequestParam, CallToolResult};
use rmcp::service::{RunningService, ServiceExt};
use rmcp::transport::TokioChildProcess;
use rmcp::RoleClient;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

pub type Client = RunningService<RoleClient, ()>;

pub fn locate_prlink_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_prlink-mcp") {
        return Ok(PathBuf::from(path));
    }

    // Try to resolve from the current test executable location.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join("prlink-mcp");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    // Final fallback: search the repo target dirs.
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .ancestors()
        .nth(2)
        .context("failed to resolve repo root from CARGO_MANIFEST_DIR")?;
    for rel in ["target/debug/prlink-mcp", "target/release/prlink-mcp"] {
        let candidate = repo_root.join(rel);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("failed to locate prlink-mcp binary; build with: cargo build -p prlink-mcp")
}

/// Server command rooted at `root`, kept from climbing above it when looking for a repository.
pub fn server_command(root: &Path) -> Result<Command> {
    let mut cmd = Command::new(locate_prlink_mcp_bin()?);
    cmd.current_dir(root);
    cmd.env("RUST_LOG", "warn");
    cmd.env("GIT_CEILING_DIRECTORIES", root.parent().unwrap_or(root));
    cmd.env_remove("PRLINK_ROOT");
    cmd.env_remove("PRLINK_HOST");
    cmd.env_remove("PRLINK_ALLOW_PUSH");
    Ok(cmd)
}

pub async fn start(cmd: Command) -> Result<Client> {
    let transport = TokioChildProcess::new(cmd).context("spawn mcp server")?;
    tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")?
        .context("start MCP server")
}

pub async fn call_tool(client: &Client, name: &str, args: Value) -> Result<CallToolResult> {
    tokio::time::timeout(
        Duration::from_secs(10),
        client.call_tool(CallToolRequestParam {
            name: name.to_string().into(),
            arguments: args.as_object().cloned(),
        }),
    )
    .await
    .context("timeout calling tool")?
    .context("call tool")
}

/// Envelope carried in the text content, cross-checked against `structured_content`.
pub fn envelope(result: &CallToolResult) -> Result<Value> {
    let text = result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.as_str())
        .context("tool result missing text output")?;
    let parsed: Value = serde_json::from_str(text).context("parse envelope text")?;
    assert_eq!(
        result.structured_content.as_ref(),
        Some(&parsed),
        "structured content differs from text envelope"
    );
    Ok(parsed)
}

pub fn git(dir: &Path, args: &[&str]) -> Result<()> {
    let status = std::process::Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=PR Link Tests",
            "-c",
            "user.email=tests@prlink.invalid",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .status()
        .with_context(|| format!("spawn git {args:?}"))?;
    anyhow::ensure!(status.success(), "git {args:?} failed");
    Ok(())
}

pub fn init_repo(dir: &Path) -> Result<()> {
    git(dir, &["init", "-q"])?;
    git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    std::fs::write(dir.join("README.md"), "# demo\n").context("write README.md")?;
    git(dir, &["add", "README.md"])?;
    git(dir, &["commit", "-q", "-m", "initial"])
}

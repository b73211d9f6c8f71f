//! PR Link MCP server
//!
//! Lets an assistant inspect the local git working copy and build a GitHub
//! "Create pull request" link, without shell access.
//!
//! ## Tools
//!
//! - `get_root_path` - Top-level directory of the working copy
//! - `get_pr_template` - `.github/PULL_REQUEST_TEMPLATE.md` (or a fallback note)
//! - `get_branch_changes` - Unstaged/staged files and commits ahead of a base branch
//! - `get_current_branch` - Checked-out branch name
//! - `create_github_pr_url` - Compare URL with pre-filled title and body
//! - `get_repository_url` - `https://github.com/<owner>/<repo>` from the origin remote
//! - `push_branch` - Explicit push, only with `--allow-push`
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "prlink": {
//!       "command": "prlink-mcp"
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use clap::Parser;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

pub mod config;
#[cfg(test)]
mod test_support;
pub mod tools;

use config::{Cli, ServerConfig};
use tools::PrLinkService;

fn init_logging() {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    let config = ServerConfig::from_cli(&cli)?;

    if cli.print_tools {
        let entries = tools::catalog::build_catalog(&config)?;
        println!(
            "{}",
            prlink_protocol::serialize_json(&tools::catalog::catalog_json(&entries))?
        );
        return Ok(());
    }

    log::info!(
        "Starting PR Link MCP server (root={}, host={}, allow_push={})",
        config.root.display(),
        config.host,
        config.allow_push
    );

    let service = PrLinkService::new(&config)?;
    let server = service.serve(stdio()).await?;

    // Wait for shutdown
    server.waiting().await?;

    log::info!("PR Link MCP server stopped");
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "github.com";

#[derive(Debug, Clone, Parser)]
#[command(name = "prlink-mcp")]
#[command(about = "MCP server that inspects a git working copy and builds pull request links", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Working copy the git queries run against (defaults to the current directory)
    #[arg(long, env = "PRLINK_ROOT")]
    pub root: Option<PathBuf>,

    /// git executable
    #[arg(long, env = "PRLINK_GIT_BIN", default_value = "git")]
    pub git_bin: PathBuf,

    /// Review-service host accepted in `github_url` and derived from the origin remote
    #[arg(long, env = "PRLINK_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Register the mutating `push_branch` tool
    #[arg(long, env = "PRLINK_ALLOW_PUSH")]
    pub allow_push: bool,

    /// Print the tool catalog as JSON and exit
    #[arg(long)]
    pub print_tools: bool,
}

/// Immutable server settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub root: PathBuf,
    pub git_bin: PathBuf,
    pub host: String,
    pub allow_push: bool,
}

impl ServerConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = match cli.root.as_ref() {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("resolve current directory")?,
        };
        let host = cli.host.trim().trim_end_matches('/').to_ascii_lowercase();
        anyhow::ensure!(!host.is_empty(), "--host must not be empty");
        Ok(Self {
            root,
            git_bin: cli.git_bin.clone(),
            host,
            allow_push: cli.allow_push,
        })
    }

    /// Settings for `root` with every other option at its default.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            git_bin: PathBuf::from("git"),
            host: DEFAULT_HOST.to_string(),
            allow_push: false,
        }
    }
}

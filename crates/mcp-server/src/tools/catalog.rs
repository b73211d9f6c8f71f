use crate::config::ServerConfig;
use anyhow::{Context, Result};
use prlink_protocol::{ParamKind, ParamSpec, ToolSpec, DEFAULT_BASE_BRANCH};
use prlink_vcs::BranchChangeSummary;
use serde_json::{json, Value};

/// Handler a catalog entry dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToolKind {
    RootPath,
    PrTemplate,
    BranchChanges,
    CurrentBranch,
    CreatePrUrl,
    RepositoryUrl,
    PushBranch,
}

#[derive(Clone, Debug)]
pub(crate) struct CatalogEntry {
    pub(crate) spec: ToolSpec,
    pub(crate) kind: ToolKind,
}

/// `^https://<host>/<owner>/<repo>/?$`
pub(crate) fn github_url_pattern(host: &str) -> String {
    format!(r"^https://{}/[^/\s]+/[^/\s]+/?$", regex::escape(host))
}

/// Branch and remote names handed to git: no leading `-`, no whitespace.
pub(crate) const GIT_NAME_PATTERN: &str = r"^[^-\s]\S*$";

pub(crate) fn build_catalog(config: &ServerConfig) -> Result<Vec<CatalogEntry>> {
    let host = config.host.as_str();
    let mut entries = vec![
        CatalogEntry {
            spec: ToolSpec::new(
                "get_root_path",
                "Return the top-level directory of the git working copy.",
            ),
            kind: ToolKind::RootPath,
        },
        CatalogEntry {
            spec: ToolSpec::new(
                "get_pr_template",
                "Return the repository's .github/PULL_REQUEST_TEMPLATE.md. When the file is missing, returns a fallback note instead of an error.",
            ),
            kind: ToolKind::PrTemplate,
        },
        CatalogEntry {
            spec: ToolSpec::new(
                "get_branch_changes",
                "Summarize the current branch: unstaged and staged files plus the number of commits ahead of the base branch.",
            )
            .param(
                ParamSpec::optional(
                    "base_branch",
                    ParamKind::String,
                    "Branch to count commits ahead of",
                )
                .with_default(DEFAULT_BASE_BRANCH)
                .with_pattern(GIT_NAME_PATTERN)
                .context("compile base_branch pattern")?,
            ),
            kind: ToolKind::BranchChanges,
        },
        CatalogEntry {
            spec: ToolSpec::new("get_current_branch", "Return the name of the checked-out branch."),
            kind: ToolKind::CurrentBranch,
        },
        CatalogEntry {
            spec: ToolSpec::new(
                "create_github_pr_url",
                "Build a compare URL that opens the 'Create pull request' page with the title and body pre-filled. Pure: nothing is pushed.",
            )
            .param(
                ParamSpec::required(
                    "github_url",
                    ParamKind::String,
                    format!("Repository URL in the form https://{host}/<owner>/<repo>"),
                )
                .with_pattern(&github_url_pattern(host))
                .context("compile github_url pattern")?,
            )
            .param(ParamSpec::required(
                "head_branch",
                ParamKind::String,
                "Branch with the changes to merge",
            ))
            .param(ParamSpec::required(
                "title",
                ParamKind::String,
                "Pull request title",
            ))
            .param(ParamSpec::required(
                "body",
                ParamKind::String,
                "Pull request body (markdown)",
            ))
            .param(
                ParamSpec::optional("base_branch", ParamKind::String, "Branch to merge into")
                    .with_default(DEFAULT_BASE_BRANCH)
                    .with_pattern(GIT_NAME_PATTERN)
                    .context("compile base_branch pattern")?,
            )
            .param(
                ParamSpec::optional(
                    "as_markdown",
                    ParamKind::Boolean,
                    "Return the URL wrapped in a markdown link",
                )
                .with_default(false),
            ),
            kind: ToolKind::CreatePrUrl,
        },
        CatalogEntry {
            spec: ToolSpec::new(
                "get_repository_url",
                format!(
                    "Derive https://{host}/<owner>/<repo> from the origin remote, ready to pass as `github_url`."
                ),
            ),
            kind: ToolKind::RepositoryUrl,
        },
    ];

    if config.allow_push {
        entries.push(CatalogEntry {
            spec: ToolSpec::new(
                "push_branch",
                "MUTATING: push a branch to a remote (git push <remote> <branch>). Defaults to the current branch and `origin`.",
            )
            .param(
                ParamSpec::optional("remote", ParamKind::String, "Remote to push to")
                    .with_default("origin")
                    .with_pattern(GIT_NAME_PATTERN)
                    .context("compile remote pattern")?,
            )
            .param(
                ParamSpec::optional(
                    "branch",
                    ParamKind::String,
                    "Branch to push (defaults to the current branch)",
                )
                .with_pattern(GIT_NAME_PATTERN)
                .context("compile branch pattern")?,
            )
            .mutating(),
            kind: ToolKind::PushBranch,
        });
    }

    Ok(entries)
}

pub(crate) fn tool_instructions() -> String {
    "PR Link inspects the local git working copy and builds GitHub 'Create pull request' links. \
Typical flow: get_repository_url -> get_current_branch -> get_branch_changes -> get_pr_template \
-> create_github_pr_url. Every tool answers with {\"status\": \"success\", ...} or \
{\"status\": \"error\", \"message\": ...}."
        .to_string()
}

/// JSON rendering of the catalog for `--print-tools`.
pub(crate) fn catalog_json(entries: &[CatalogEntry]) -> Value {
    let tools = entries
        .iter()
        .map(|entry| {
            json!({
                "name": entry.spec.name,
                "description": entry.spec.description,
                "mutating": entry.spec.mutating,
                "inputSchema": Value::Object(entry.spec.input_schema()),
            })
        })
        .collect::<Vec<_>>();
    json!({
        "version": env!("CARGO_PKG_VERSION"),
        "tools": tools,
        "payload_schemas": {
            "changes": schemars::schema_for!(BranchChangeSummary),
        },
    })
}

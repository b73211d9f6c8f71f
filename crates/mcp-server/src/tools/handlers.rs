use super::catalog::ToolKind;
use super::pr_url::{build_compare_url, markdown_link};
use super::template::{TemplateReader, TEMPLATE_FALLBACK};
use prlink_protocol::{InvocationResult, ToolArgs, ToolError, DEFAULT_BASE_BRANCH};
use prlink_vcs::{RepositoryCoordinates, VcsError, VcsQuery};
use serde_json::json;
use std::sync::Arc;

/// Collaborators shared by every handler for the lifetime of the registry.
pub(crate) struct ToolContext {
    pub(crate) vcs: Arc<dyn VcsQuery>,
    pub(crate) templates: Arc<dyn TemplateReader>,
    pub(crate) host: String,
}

pub(crate) fn vcs_failure(err: VcsError) -> ToolError {
    if err.is_not_a_repository() {
        ToolError::NotAVersionControlledTree {
            detail: err.to_string(),
        }
    } else {
        ToolError::query_failed(err.to_string())
    }
}

pub(crate) async fn run(
    kind: ToolKind,
    ctx: &ToolContext,
    args: ToolArgs,
) -> Result<InvocationResult, ToolError> {
    match kind {
        ToolKind::RootPath => root_path(ctx).await,
        ToolKind::PrTemplate => pr_template(ctx).await,
        ToolKind::BranchChanges => branch_changes(ctx, &args).await,
        ToolKind::CurrentBranch => current_branch(ctx).await,
        ToolKind::CreatePrUrl => create_pr_url(&args),
        ToolKind::RepositoryUrl => repository_url(ctx).await,
        ToolKind::PushBranch => push_branch(ctx, &args).await,
    }
}

async fn root_path(ctx: &ToolContext) -> Result<InvocationResult, ToolError> {
    let root = ctx.vcs.root_path().await.map_err(vcs_failure)?;
    Ok(InvocationResult::success("root_path", &*root.to_string_lossy()))
}

async fn pr_template(ctx: &ToolContext) -> Result<InvocationResult, ToolError> {
    let root = ctx.vcs.root_path().await.map_err(vcs_failure)?;
    let template = ctx.templates.read_template(&root).await.map_err(|err| {
        ToolError::query_failed(format!("failed to read pull request template: {err}"))
    })?;
    Ok(InvocationResult::success(
        "template",
        template.as_deref().unwrap_or(TEMPLATE_FALLBACK),
    ))
}

async fn branch_changes(ctx: &ToolContext, args: &ToolArgs) -> Result<InvocationResult, ToolError> {
    let base_branch = args.str("base_branch").unwrap_or(DEFAULT_BASE_BRANCH);
    let summary = ctx
        .vcs
        .diff_summary(base_branch)
        .await
        .map_err(vcs_failure)?;
    Ok(InvocationResult::success("changes", &summary))
}

async fn current_branch(ctx: &ToolContext) -> Result<InvocationResult, ToolError> {
    let branch = ctx.vcs.current_branch().await.map_err(vcs_failure)?;
    Ok(InvocationResult::success("branch_name", branch.as_str()))
}

fn create_pr_url(args: &ToolArgs) -> Result<InvocationResult, ToolError> {
    let url = build_compare_url(
        args.require_str("github_url")?,
        args.require_str("head_branch")?,
        args.require_str("title")?,
        args.require_str("body")?,
        args.str("base_branch").unwrap_or(DEFAULT_BASE_BRANCH),
    )
    .map_err(|err| ToolError::query_failed(err.to_string()))?;

    let url = if args.bool("as_markdown").unwrap_or(false) {
        markdown_link(&url)
    } else {
        url
    };
    Ok(InvocationResult::success("pr_url", url.as_str()))
}

async fn repository_url(ctx: &ToolContext) -> Result<InvocationResult, ToolError> {
    let remote = ctx.vcs.remote_origin_url().await.map_err(vcs_failure)?;
    let coords = RepositoryCoordinates::parse(&remote).ok_or_else(|| {
        ToolError::query_failed(format!(
            "origin remote `{remote}` is not a recognised repository URL"
        ))
    })?;
    if coords.host != ctx.host {
        return Err(ToolError::query_failed(format!(
            "origin remote is hosted on {}, expected {}",
            coords.host, ctx.host
        )));
    }
    Ok(InvocationResult::success("github_url", coords.web_url().as_str()))
}

async fn push_branch(ctx: &ToolContext, args: &ToolArgs) -> Result<InvocationResult, ToolError> {
    let remote = args.str("remote").unwrap_or("origin").to_string();
    let branch = match args.str("branch") {
        Some(branch) => branch.to_string(),
        None => ctx.vcs.current_branch().await.map_err(vcs_failure)?,
    };
    ctx.vcs
        .push_branch(&remote, &branch)
        .await
        .map_err(vcs_failure)?;
    Ok(InvocationResult::success(
        "pushed",
        &json!({ "remote": remote, "branch": branch }),
    ))
}

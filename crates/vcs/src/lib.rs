//! Read-only queries against a local git working copy, plus the one explicit push.
//!
//! The tool gateway only sees the [`VcsQuery`] trait; [`GitCli`] answers it by shelling out to
//! the `git` executable.

mod error;
mod git;
mod remote;
mod summary;

use async_trait::async_trait;
use std::path::PathBuf;

pub use error::{Result, VcsError};
pub use git::GitCli;
pub use remote::RepositoryCoordinates;
pub use summary::BranchChangeSummary;

/// Queries the tool gateway issues against the working copy.
///
/// Every call may fail; callers must not assume a working copy exists.
#[async_trait]
pub trait VcsQuery: Send + Sync {
    /// Top-level directory of the working copy.
    async fn root_path(&self) -> Result<PathBuf>;

    async fn current_branch(&self) -> Result<String>;

    async fn remote_origin_url(&self) -> Result<String>;

    /// Current branch, unstaged and staged paths, and commits ahead of `base_branch`.
    async fn diff_summary(&self, base_branch: &str) -> Result<BranchChangeSummary>;

    /// Push `branch` to `remote`. The only operation that mutates state.
    async fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;
}

use async_trait::async_trait;
use prlink_vcs::{BranchChangeSummary, Result as VcsResult, VcsError, VcsQuery};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Cross-test synchronization for process-wide state (env vars, cwd, etc.).
///
/// Rust tests run in parallel by default, but env vars are shared per-process.
/// Any test that mutates or depends on process-wide env should lock this mutex.
pub(crate) static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Scripted working copy. `None` fields answer with the matching git failure.
#[derive(Default)]
pub(crate) struct FakeVcs {
    pub(crate) root: Option<PathBuf>,
    pub(crate) branch: Option<String>,
    pub(crate) remote: Option<String>,
    pub(crate) changed_files: Vec<String>,
    pub(crate) staged_files: Vec<String>,
    pub(crate) commits_ahead: u64,
    /// When set, `diff_summary` fails with this git stderr.
    pub(crate) summary_error: Option<String>,
    pub(crate) panic_on_branch: bool,
    pub(crate) calls: AtomicUsize,
    pub(crate) pushes: Mutex<Vec<(String, String)>>,
}

impl FakeVcs {
    pub(crate) fn repo(root: impl Into<PathBuf>, branch: &str) -> Self {
        Self {
            root: Some(root.into()),
            branch: Some(branch.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn not_a_repo() -> VcsError {
        VcsError::NotARepository {
            detail: "fatal: not a git repository (or any of the parent directories): .git"
                .to_string(),
        }
    }
}

#[async_trait]
impl VcsQuery for FakeVcs {
    async fn root_path(&self) -> VcsResult<PathBuf> {
        self.record();
        self.root.clone().ok_or_else(Self::not_a_repo)
    }

    async fn current_branch(&self) -> VcsResult<String> {
        self.record();
        if self.panic_on_branch {
            panic!("branch lookup exploded");
        }
        if self.root.is_none() {
            return Err(Self::not_a_repo());
        }
        self.branch.clone().ok_or(VcsError::DetachedHead)
    }

    async fn remote_origin_url(&self) -> VcsResult<String> {
        self.record();
        if self.root.is_none() {
            return Err(Self::not_a_repo());
        }
        self.remote.clone().ok_or(VcsError::NoRemoteOrigin)
    }

    async fn diff_summary(&self, base_branch: &str) -> VcsResult<BranchChangeSummary> {
        self.record();
        if let Some(detail) = self.summary_error.as_ref() {
            return Err(VcsError::CommandFailed {
                command: format!("git rev-list --count {base_branch}..HEAD"),
                detail: detail.clone(),
            });
        }
        if self.root.is_none() {
            return Err(Self::not_a_repo());
        }
        Ok(BranchChangeSummary {
            current_branch: self.branch.clone().ok_or(VcsError::DetachedHead)?,
            changed_files: self.changed_files.clone(),
            staged_files: self.staged_files.clone(),
            commits_ahead: self.commits_ahead,
            base_branch: base_branch.to_string(),
        })
    }

    async fn push_branch(&self, remote: &str, branch: &str) -> VcsResult<()> {
        self.record();
        if let Ok(mut pushes) = self.pushes.lock() {
            pushes.push((remote.to_string(), branch.to_string()));
        }
        Ok(())
    }
}

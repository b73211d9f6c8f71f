use crate::{BranchChangeSummary, Result, VcsError, VcsQuery};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;

/// [`VcsQuery`] backed by the `git` executable, run against a fixed working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    workdir: PathBuf,
    envs: Vec<(OsString, OsString)>,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("git"),
            workdir: workdir.into(),
            envs: Vec::new(),
        }
    }

    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Extra environment for every spawned git process (e.g. `GIT_CEILING_DIRECTORIES`).
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn render(args: &[&str]) -> String {
        format!("git {}", args.join(" "))
    }

    async fn output(&self, args: &[&str]) -> Result<Output> {
        log::debug!("running `{}` in {}", Self::render(args), self.workdir.display());
        Command::new(&self.program)
            .arg("-C")
            .arg(&self.workdir)
            .args(args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| VcsError::Spawn {
                command: Self::render(args),
                source,
            })
    }

    fn check(args: &[&str], output: Output) -> Result<Vec<u8>> {
        if output.status.success() {
            return Ok(output.stdout);
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        log::debug!("`{}` exited with {}: {stderr}", Self::render(args), output.status);
        if stderr.contains("not a git repository") {
            return Err(VcsError::NotARepository { detail: stderr });
        }
        let detail = if stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr
        };
        Err(VcsError::CommandFailed {
            command: Self::render(args),
            detail,
        })
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let stdout = Self::check(args, self.output(args).await?)?;
        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }

    /// Paths from a `-z` name listing, sorted and deduplicated.
    async fn run_paths(&self, args: &[&str]) -> Result<Vec<String>> {
        let stdout = Self::check(args, self.output(args).await?)?;
        Ok(parse_nul_paths(&stdout))
    }
}

fn parse_nul_paths(raw: &[u8]) -> Vec<String> {
    let mut paths: Vec<String> = raw
        .split(|b| *b == 0)
        .map(|p| String::from_utf8_lossy(p).trim_end_matches(['\r', '\n']).to_string())
        .filter(|p| !p.is_empty())
        .collect();
    paths.sort();
    paths.dedup();
    paths
}

#[async_trait]
impl VcsQuery for GitCli {
    async fn root_path(&self) -> Result<PathBuf> {
        let root = self.run(&["rev-parse", "--show-toplevel"]).await?;
        if root.is_empty() {
            return Err(VcsError::NotARepository {
                detail: "git reported an empty top-level directory".to_string(),
            });
        }
        Ok(PathBuf::from(root))
    }

    async fn current_branch(&self) -> Result<String> {
        let branch = self.run(&["branch", "--show-current"]).await?;
        if branch.is_empty() {
            return Err(VcsError::DetachedHead);
        }
        Ok(branch)
    }

    async fn remote_origin_url(&self) -> Result<String> {
        let args = ["remote", "get-url", "origin"];
        let output = self.output(&args).await?;
        let missing = String::from_utf8_lossy(&output.stderr).contains("No such remote");
        if !output.status.success() && missing {
            return Err(VcsError::NoRemoteOrigin);
        }
        let url = String::from_utf8_lossy(&Self::check(&args, output)?)
            .trim()
            .to_string();
        if url.is_empty() {
            return Err(VcsError::NoRemoteOrigin);
        }
        Ok(url)
    }

    async fn diff_summary(&self, base_branch: &str) -> Result<BranchChangeSummary> {
        let current_branch = self.current_branch().await?;
        let changed_files = self.run_paths(&["diff", "--name-only", "-z"]).await?;
        let staged_files = self
            .run_paths(&["diff", "--name-only", "--cached", "-z"])
            .await?;

        let range = format!("{base_branch}..HEAD");
        let args = ["rev-list", "--count", "--end-of-options", range.as_str()];
        let raw = self.run(&args).await?;
        let commits_ahead = raw.parse::<u64>().map_err(|_| VcsError::UnexpectedOutput {
            command: Self::render(&args),
            output: raw.clone(),
        })?;

        Ok(BranchChangeSummary {
            current_branch,
            changed_files,
            staged_files,
            commits_ahead,
            base_branch: base_branch.to_string(),
        })
    }

    async fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.run(&["push", "--end-of-options", remote, branch]).await?;
        log::info!("pushed {branch} to {remote}");
        Ok(())
    }
}

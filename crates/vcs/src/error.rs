use thiserror::Error;

pub type Result<T> = std::result::Result<T, VcsError>;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("{detail}")]
    NotARepository { detail: String },

    #[error("`{command}` failed: {detail}")]
    CommandFailed { command: String, detail: String },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HEAD is detached; there is no current branch")]
    DetachedHead,

    #[error("no remote named `origin` is configured")]
    NoRemoteOrigin,

    #[error("`{command}` produced unexpected output: {output}")]
    UnexpectedOutput { command: String, output: String },
}

impl VcsError {
    pub fn is_not_a_repository(&self) -> bool {
        matches!(self, Self::NotARepository { .. })
    }
}

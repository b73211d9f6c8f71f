use once_cell::sync::Lazy;
use regex::Regex;

// scheme://[user@]host[:port]/owner/repo[.git][/]
static URL_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:https?|ssh|git)://(?:[^@/]+@)?(?P<host>[^/:]+)(?::\d+)?/(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$",
    )
    .expect("valid url remote regex")
});

// [user@]host:owner/repo[.git]
static SCP_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[^@/]+@)?(?P<host>[^/:]+):(?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$")
        .expect("valid scp remote regex")
});

/// Host, owner and repository name derived from a remote URL. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCoordinates {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl RepositoryCoordinates {
    /// Parse `https://`, `ssh://` and scp-style (`git@host:owner/repo.git`) remotes.
    pub fn parse(remote_url: &str) -> Option<Self> {
        let remote_url = remote_url.trim();
        let caps = URL_FORM
            .captures(remote_url)
            .or_else(|| SCP_FORM.captures(remote_url))?;
        let repo = caps["repo"].to_string();
        if repo.is_empty() {
            return None;
        }
        Some(Self {
            host: caps["host"].to_ascii_lowercase(),
            owner: caps["owner"].to_string(),
            repo,
        })
    }

    /// Browser URL of the repository on its host.
    pub fn web_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.repo)
    }
}

use async_trait::async_trait;
use std::io;
use std::path::Path;

pub const TEMPLATE_RELATIVE_PATH: &str = ".github/PULL_REQUEST_TEMPLATE.md";

/// Returned (as a success) when the repository has no pull request template.
pub const TEMPLATE_FALLBACK: &str = "No pull request template found. Create .github/PULL_REQUEST_TEMPLATE.md in the repository root to provide one.";

#[async_trait]
pub trait TemplateReader: Send + Sync {
    /// Template contents under `root`, or `None` when the file does not exist.
    async fn read_template(&self, root: &Path) -> io::Result<Option<String>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsTemplateReader;

#[async_trait]
impl TemplateReader for FsTemplateReader {
    async fn read_template(&self, root: &Path) -> io::Result<Option<String>> {
        let path = root.join(TEMPLATE_RELATIVE_PATH);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no pull request template at {}", path.display());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

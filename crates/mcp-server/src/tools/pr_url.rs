//! Compare-URL construction for the "create pull request" page.
//!
//! Titles and bodies use RFC 3986 component encoding: only `A-Z a-z 0-9 - _ . ~` pass through
//! and a space becomes `%20`. Branch names are encoded per path segment so `/` survives.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareUrlError {
    #[error("malformed repository URL `{0}`: expected http(s)://<host>/<owner>/<repo>")]
    MalformedBaseUrl(String),
}

/// `<base_url>/compare/<base>...<head>?quick_pull=1&title=..&body=..`
pub fn build_compare_url(
    base_url: &str,
    head_branch: &str,
    title: &str,
    body: &str,
    base_branch: &str,
) -> Result<String, CompareUrlError> {
    let base_url = base_url.trim().trim_end_matches('/');
    if !is_absolute_http(base_url) {
        return Err(CompareUrlError::MalformedBaseUrl(base_url.to_string()));
    }

    Ok(format!(
        "{base_url}/compare/{}...{}?quick_pull=1&title={}&body={}",
        encode_ref(base_branch),
        encode_ref(head_branch),
        urlencoding::encode(title),
        urlencoding::encode(body),
    ))
}

/// Markdown link form of a compare URL.
pub fn markdown_link(url: &str) -> String {
    format!("[Create pull request]({url})")
}

fn encode_ref(branch: &str) -> String {
    branch
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_absolute_http(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return false;
    };
    let host = rest.split('/').next().unwrap_or_default();
    !host.is_empty()
        && !rest.contains(char::is_whitespace)
        && !rest.contains(['?', '#'])
}

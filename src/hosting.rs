//! URLs for copy pages published on a static host.
//!
//! The tool cannot check that the page is actually published; it only
//! builds the address where it is expected to be.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::copy_page::COPY_PAGE_FILE_NAME;

/// Characters left as-is in the query value: unreserved marks and `/`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Base URL of a GitHub Pages project site, without a trailing slash.
///
/// Returns `None` if either part is blank.
pub fn github_pages_base(user: &str, repo: &str) -> Option<String> {
    let user = user.trim();
    let repo = repo.trim().trim_matches('/');
    if user.is_empty() || repo.is_empty() {
        return None;
    }
    Some(format!("https://{user}.github.io/{repo}"))
}

/// URL of `copy.html` on a GitHub Pages site, with the text passed along as
/// the `text` query parameter.
///
/// # Example
///
/// ```rust
/// use qrcopy::hosting::github_pages_url;
///
/// let url = github_pages_url("octocat", "qr-text-copier", "hi there").unwrap();
/// assert_eq!(url, "https://octocat.github.io/qr-text-copier/copy.html?text=hi%20there");
/// ```
pub fn github_pages_url(user: &str, repo: &str, text: &str) -> Option<String> {
    let base = github_pages_base(user, repo)?;
    let query = utf8_percent_encode(text, QUERY_VALUE);
    Some(format!("{base}/{COPY_PAGE_FILE_NAME}?text={query}"))
}

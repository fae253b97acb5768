use std::fmt;
use url::Url;

/// An absolute http(s) URL with its fragment removed
///
/// Two links that canonicalize to the same value are the same page for
/// dedup and scope purposes. Query strings, trailing slashes and path case
/// are kept as they are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalUrl(Url);

impl CanonicalUrl {
    /// Canonicalize an absolute URL such as a seed
    pub fn parse(raw: &str) -> Option<Self> {
        Url::parse(raw).ok().and_then(Self::from_url)
    }

    /// Accept an already-parsed URL if its scheme is crawlable
    pub fn from_url(mut url: Url) -> Option<Self> {
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        url.set_fragment(None);
        Some(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Hostname used for scope decisions
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a raw link found on `base` into its canonical form
///
/// Returns `None` for malformed links and for any scheme other than http or
/// https; callers skip those links.
pub fn canonicalize(raw_link: &str, base: &Url) -> Option<CanonicalUrl> {
    base.join(raw_link).ok().and_then(CanonicalUrl::from_url)
}

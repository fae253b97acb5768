use crate::canonical::CanonicalUrl;
use crate::config::{ConfigError, CrawlConfig};
use regex::Regex;
use std::collections::HashSet;

/// Decide whether a canonical URL is within the crawl scope
///
/// A non-empty `allowed_domains` requires the hostname to be listed, and
/// `same_domain_only` requires it to be a seed hostname. Both checks apply
/// when both are active. Matching is exact: no subdomain wildcards and no
/// port normalization.
pub fn in_scope(
    url: &CanonicalUrl,
    allowed_domains: &HashSet<String>,
    same_domain_only: bool,
    seed_domains: &HashSet<String>,
) -> bool {
    let Some(host) = url.host() else {
        return false;
    };

    if !allowed_domains.is_empty() && !allowed_domains.contains(host) {
        return false;
    }

    if same_domain_only && !seed_domains.contains(host) {
        return false;
    }

    true
}

/// Scope rules for one crawl, fixed at construction
#[derive(Debug)]
pub struct ScopeFilter {
    allowed_domains: HashSet<String>,
    same_domain_only: bool,
    seed_domains: HashSet<String>,
    exclude_regexes: Vec<Regex>,
}

impl ScopeFilter {
    pub fn new(
        allowed_domains: impl IntoIterator<Item = String>,
        same_domain_only: bool,
        seed_domains: HashSet<String>,
    ) -> Self {
        Self {
            allowed_domains: allowed_domains.into_iter().collect(),
            same_domain_only,
            seed_domains,
            exclude_regexes: Vec::new(),
        }
    }

    /// Build the filter for a crawl from its config and seed hostnames
    pub fn from_config(
        config: &CrawlConfig,
        seed_domains: HashSet<String>,
    ) -> Result<Self, ConfigError> {
        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            let regex = Regex::new(pattern).map_err(|source| ConfigError::ExcludePattern {
                pattern: pattern.clone(),
                source,
            })?;
            exclude_regexes.push(regex);
        }

        Ok(Self {
            exclude_regexes,
            ..Self::new(
                config.allowed_domains.iter().cloned(),
                config.same_domain_only,
                seed_domains,
            )
        })
    }

    /// Determine if a URL should be crawled
    pub fn should_crawl(&self, url: &CanonicalUrl) -> bool {
        if !in_scope(
            url,
            &self.allowed_domains,
            self.same_domain_only,
            &self.seed_domains,
        ) {
            return false;
        }

        !self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(url.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> CanonicalUrl {
        CanonicalUrl::parse(s).unwrap()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_restrictions() {
        let none = HashSet::new();
        assert!(in_scope(&url("https://anywhere.net/"), &none, false, &none));
    }

    #[test]
    fn test_same_domain_only() {
        let seeds = set(&["example.com"]);
        let none = HashSet::new();
        assert!(in_scope(&url("https://example.com/about"), &none, true, &seeds));
        assert!(!in_scope(&url("https://other.com/x"), &none, true, &seeds));
        // No subdomain wildcarding
        assert!(!in_scope(&url("https://www.example.com/"), &none, true, &seeds));
    }

    #[test]
    fn test_allow_list() {
        let allowed = set(&["docs.example.com"]);
        let none = HashSet::new();
        assert!(in_scope(&url("https://docs.example.com/a"), &allowed, false, &none));
        assert!(!in_scope(&url("https://example.com/a"), &allowed, false, &none));
    }

    #[test]
    fn test_both_rules_are_anded() {
        let allowed = set(&["example.com", "other.com"]);
        let seeds = set(&["example.com"]);
        assert!(in_scope(&url("https://example.com/"), &allowed, true, &seeds));
        assert!(!in_scope(&url("https://other.com/"), &allowed, true, &seeds));
        assert!(!in_scope(&url("https://third.com/"), &allowed, false, &seeds));
    }

    #[test]
    fn test_port_is_ignored_in_host_match() {
        let seeds = set(&["example.com"]);
        let none = HashSet::new();
        assert!(in_scope(&url("http://example.com:8080/"), &none, true, &seeds));
    }

    #[test]
    fn test_exclude_patterns() {
        let mut config = CrawlConfig::new(["https://example.com/"]);
        config.exclude_patterns = vec![r"\.(jpg|png|pdf)$".to_string(), r"/private/".to_string()];
        let filter = ScopeFilter::from_config(&config, set(&["example.com"])).unwrap();

        assert!(filter.should_crawl(&url("https://example.com/page")));
        assert!(!filter.should_crawl(&url("https://example.com/image.jpg")));
        assert!(!filter.should_crawl(&url("https://example.com/private/a")));
        assert!(!filter.should_crawl(&url("https://other.com/page")));
    }
}

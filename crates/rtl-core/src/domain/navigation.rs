//! First-party navigation policy.
//!
//! The embedded surface may only browse the web app's own domains.  Any other
//! navigation (a partner offer, a terms-of-service page, a store link) is
//! cancelled in the surface and handed to the host, which opens it in a real
//! browser.
//!
//! # Matching rule
//!
//! A URL is *internal* when its host **contains** one of the registered domain
//! fragments.  Containment (not suffix matching) is the historical rule of the
//! bridge and is kept as-is so that web app links behave identically on every
//! host platform:
//!
//! ```text
//! https://crowdplay.staging.getboon.com/home   → internal
//! https://www.affinaloyalty.com/terms          → internal
//! https://example.com/                         → external
//! not a url                                    → external
//! ```

use url::Url;

/// The blank page the surface may load before any login; always allowed.
pub const BLANK_PAGE_URL: &str = "about:blank";

/// Domain fragments that identify the web app's own pages.
pub const DEFAULT_FIRST_PARTY_DOMAINS: [&str; 2] = ["getboon.com", "affinaloyalty.com"];

/// What the surface should do with a requested navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the surface load the URL unmodified.
    Allow,
    /// Stop the surface from loading the URL; the host handles it instead.
    Cancel,
}

/// Decides which URLs belong to the embedded web app.
///
/// The policy holds only its list of domain fragments; [`is_internal`] is a
/// pure function of that list and the URL.
///
/// [`is_internal`]: NavigationPolicy::is_internal
///
/// # Example
///
/// ```rust
/// use rtl_core::NavigationPolicy;
///
/// let policy = NavigationPolicy::default().with_domain("partner.example");
/// assert!(policy.is_internal("https://crowdplay.prod.getboon.com/"));
/// assert!(policy.is_internal("https://rewards.partner.example/offer"));
/// assert!(!policy.is_internal("https://example.com/"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPolicy {
    domains: Vec<String>,
}

impl Default for NavigationPolicy {
    /// The reference first-party set: `getboon.com` and `affinaloyalty.com`.
    fn default() -> Self {
        Self::from_domains(DEFAULT_FIRST_PARTY_DOMAINS)
    }
}

impl NavigationPolicy {
    /// Builds a policy from an explicit list of domain fragments.
    ///
    /// Fragments are lowercased (URL hosts are always lowercase after
    /// parsing) and blank entries are dropped.
    pub fn from_domains<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    /// Returns a copy of the policy with one more first-party fragment.
    pub fn with_domain(mut self, domain: impl AsRef<str>) -> Self {
        let domain = domain.as_ref().trim().to_ascii_lowercase();
        if !domain.is_empty() && !self.domains.contains(&domain) {
            self.domains.push(domain);
        }
        self
    }

    /// The registered domain fragments, in registration order.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Returns `true` if the URL's host contains a first-party fragment.
    ///
    /// URLs that fail to parse, or that have no host (`mailto:`, `about:`),
    /// are external.
    pub fn is_internal(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        self.domains.iter().any(|d| host.contains(d.as_str()))
    }

    /// Full interception decision for a navigation request.
    ///
    /// [`BLANK_PAGE_URL`] is always allowed; everything else follows
    /// [`is_internal`](Self::is_internal).
    pub fn decide(&self, url: &str) -> NavigationDecision {
        if url == BLANK_PAGE_URL || self.is_internal(url) {
            NavigationDecision::Allow
        } else {
            NavigationDecision::Cancel
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_subdomain_is_internal() {
        let policy = NavigationPolicy::default();
        assert!(policy.is_internal("https://crowdplay.staging.getboon.com/auth/token-forward"));
    }

    #[test]
    fn test_bare_first_party_domain_is_internal() {
        let policy = NavigationPolicy::default();
        assert!(policy.is_internal("https://getboon.com"));
        assert!(policy.is_internal("https://affinaloyalty.com/privacy"));
    }

    #[test]
    fn test_third_party_host_is_external() {
        let policy = NavigationPolicy::default();
        assert!(!policy.is_internal("https://example.com/"));
        assert!(!policy.is_internal("https://apps.apple.com/app/id123"));
    }

    #[test]
    fn test_fragment_in_path_does_not_count() {
        // Only the host is inspected; a first-party name in the path or query
        // must not make a foreign site internal.
        let policy = NavigationPolicy::default();
        assert!(!policy.is_internal("https://evil.example/getboon.com"));
        assert!(!policy.is_internal("https://evil.example/?next=affinaloyalty.com"));
    }

    #[test]
    fn test_host_match_is_case_insensitive() {
        // The url crate lowercases hosts while parsing.
        let policy = NavigationPolicy::default();
        assert!(policy.is_internal("https://CrowdPlay.PROD.GetBoon.com/"));
    }

    #[test]
    fn test_unparseable_url_is_external() {
        let policy = NavigationPolicy::default();
        assert!(!policy.is_internal("not a url"));
        assert!(!policy.is_internal(""));
    }

    #[test]
    fn test_hostless_url_is_external() {
        let policy = NavigationPolicy::default();
        assert!(!policy.is_internal("mailto:help@getboon.com"));
        assert!(!policy.is_internal(BLANK_PAGE_URL));
    }

    #[test]
    fn test_blank_page_is_always_allowed() {
        // Arrange: a policy with no first-party domains at all
        let policy = NavigationPolicy::from_domains(Vec::<String>::new());

        // Act / Assert
        assert_eq!(policy.decide(BLANK_PAGE_URL), NavigationDecision::Allow);
    }

    #[test]
    fn test_decide_cancels_external_url() {
        let policy = NavigationPolicy::default();
        assert_eq!(policy.decide("https://example.com"), NavigationDecision::Cancel);
        assert_eq!(
            policy.decide("https://crowdplay.prod.getboon.com/"),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn test_with_domain_extends_the_set() {
        // Arrange
        let policy = NavigationPolicy::default().with_domain("Partner.Example");

        // Assert: the new fragment is normalised and matched
        assert_eq!(policy.domains().len(), 3);
        assert!(policy.is_internal("https://shop.partner.example/"));
    }

    #[test]
    fn test_with_domain_ignores_duplicates_and_blanks() {
        let policy = NavigationPolicy::default()
            .with_domain("getboon.com")
            .with_domain("   ");
        assert_eq!(policy.domains(), &["getboon.com", "affinaloyalty.com"]);
    }
}

use axum::http::Method;

/// Requirement attached to a matched route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

#[derive(Debug, Clone)]
struct Rule {
    method: Method,
    pattern: &'static str,
    access: Access,
}

/// Ordered allow/deny table consulted once per request.
///
/// Evaluation is deterministic and total: rules are checked in declaration
/// order, the first match wins, and a request matching no rule requires
/// authentication.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    rules: Vec<Rule>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The table for this API: topic reads and the login endpoint are open,
    /// everything else under the versioned API needs a bound identity.
    pub fn forum_defaults() -> Self {
        Self::new()
            .permit(Method::GET, "/api/v1/health")
            .permit(Method::GET, "/api/v1/topic")
            .permit(Method::GET, "/api/v1/topic/*")
            .permit(Method::POST, "/api/v1/auth")
    }

    pub fn permit(self, method: Method, pattern: &'static str) -> Self {
        self.rule(method, pattern, Access::Public)
    }

    pub fn restrict(self, method: Method, pattern: &'static str) -> Self {
        self.rule(method, pattern, Access::Authenticated)
    }

    fn rule(mut self, method: Method, pattern: &'static str, access: Access) -> Self {
        self.rules.push(Rule {
            method,
            pattern,
            access,
        });
        self
    }

    pub fn check(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|r| r.method == *method && pattern_matches(r.pattern, path))
            .map(|r| r.access)
            .unwrap_or(Access::Authenticated)
    }
}

/// Segment-wise match; `*` matches exactly one path segment.
fn pattern_matches(pattern: &str, path: &str) -> bool {
    let pattern = pattern.trim_end_matches('/');
    let path = path.trim_end_matches('/');

    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some("*"), Some(seg)) if !seg.is_empty() => continue,
            (Some(expected), Some(seg)) if expected == seg => continue,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_reads_are_public() {
        let policy = AccessPolicy::forum_defaults();

        assert_eq!(policy.check(&Method::GET, "/api/v1/topic"), Access::Public);
        assert_eq!(
            policy.check(&Method::GET, "/api/v1/topic/17"),
            Access::Public
        );
        assert_eq!(policy.check(&Method::POST, "/api/v1/auth"), Access::Public);
    }

    #[test]
    fn unmatched_requests_require_authentication() {
        let policy = AccessPolicy::forum_defaults();

        assert_eq!(
            policy.check(&Method::POST, "/api/v1/topic"),
            Access::Authenticated
        );
        assert_eq!(
            policy.check(&Method::PUT, "/api/v1/topic/17"),
            Access::Authenticated
        );
        assert_eq!(
            policy.check(&Method::DELETE, "/api/v1/topic/17"),
            Access::Authenticated
        );
        assert_eq!(
            policy.check(&Method::GET, "/api/v1/unknown"),
            Access::Authenticated
        );
    }

    #[test]
    fn method_is_part_of_the_match() {
        let policy = AccessPolicy::forum_defaults();

        // Same path, different verb.
        assert_eq!(policy.check(&Method::GET, "/api/v1/topic"), Access::Public);
        assert_eq!(
            policy.check(&Method::POST, "/api/v1/topic"),
            Access::Authenticated
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let policy = AccessPolicy::new()
            .restrict(Method::GET, "/api/v1/topic/admin")
            .permit(Method::GET, "/api/v1/topic/*");

        assert_eq!(
            policy.check(&Method::GET, "/api/v1/topic/admin"),
            Access::Authenticated
        );
        assert_eq!(
            policy.check(&Method::GET, "/api/v1/topic/17"),
            Access::Public
        );
    }

    #[test]
    fn wildcard_matches_exactly_one_segment() {
        assert!(pattern_matches("/topic/*", "/topic/17"));
        assert!(!pattern_matches("/topic/*", "/topic"));
        assert!(!pattern_matches("/topic/*", "/topic/17/answers"));
        assert!(!pattern_matches("/topic/*", "/topic/"));
    }

    #[test]
    fn trailing_slash_is_normalized() {
        assert!(pattern_matches("/topic", "/topic/"));
        assert!(pattern_matches("/topic/", "/topic"));
    }
}

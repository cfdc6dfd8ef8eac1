//! Host header parsing
//!
//! Splits a Host value into hostname and port and decides whether it names a
//! tenant subdomain of the configured base domain:
//! - `avengers.test.fider.io:3000` -> subdomain `avengers`
//! - `demo.demo.test.fider.io` -> no subdomain (more than one label)
//! - `ideas.theavengers.com` -> no subdomain (unrelated domain)

/// Outcome of matching a host against the base domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMatch {
    /// Exactly one label to the left of the base domain
    Subdomain(String),
    NoSubdomain,
}

/// A parsed Host header value, port validated and dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostToken {
    hostname: String,
}

impl HostToken {
    /// Parse a raw Host value. Returns `None` for empty or malformed input.
    pub fn parse(raw: &str) -> Option<Self> {
        let host = strip_port(raw.trim())?;
        let host = host.strip_suffix('.').unwrap_or(host);

        if host.is_empty() || !host.chars().all(is_host_char) {
            return None;
        }

        Some(Self {
            hostname: host.to_ascii_lowercase(),
        })
    }

    /// Match this host against `base_domain`
    pub fn subdomain_of(&self, base_domain: &str) -> HostMatch {
        let base = base_domain.trim().trim_end_matches('.').to_ascii_lowercase();
        if base.is_empty() {
            return HostMatch::NoSubdomain;
        }

        match self
            .hostname
            .strip_suffix(base.as_str())
            .and_then(|prefix| prefix.strip_suffix('.'))
        {
            Some(label) if !label.is_empty() && !label.contains('.') => {
                HostMatch::Subdomain(label.to_string())
            }
            _ => HostMatch::NoSubdomain,
        }
    }
}

/// Parse `raw` and match it against `base_domain` in one step
pub fn parse_host(raw: &str, base_domain: &str) -> HostMatch {
    HostToken::parse(raw)
        .map(|token| token.subdomain_of(base_domain))
        .unwrap_or(HostMatch::NoSubdomain)
}

/// Normalize a host header value: port removed, lowercased.
/// Malformed values are only trimmed and lowercased.
pub fn normalize_host(raw: &str) -> String {
    match HostToken::parse(raw) {
        Some(token) => token.hostname,
        None => raw.trim().to_ascii_lowercase(),
    }
}

/// Host part of `host[:port]`; `None` when the port is not a valid u16
fn strip_port(raw: &str) -> Option<&str> {
    // IPv6 literal, e.g. [::1]:8080
    let (host, port) = if raw.starts_with('[') {
        let end = raw.find(']')?;
        let (host, rest) = raw.split_at(end + 1);
        match rest {
            "" => (host, None),
            _ => (host, Some(rest.strip_prefix(':')?)),
        }
    } else {
        match raw.split_once(':') {
            None => (raw, None),
            Some((host, port)) => (host, Some(port)),
        }
    };

    match port {
        Some(port) if port.parse::<u16>().is_err() => None,
        _ => Some(host),
    }
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '[' | ']' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "test.fider.io";

    fn subdomain(s: &str) -> HostMatch {
        HostMatch::Subdomain(s.to_string())
    }

    #[test]
    fn test_one_label_subdomain() {
        assert_eq!(parse_host("avengers.test.fider.io", BASE), subdomain("avengers"));
        assert_eq!(parse_host("avengers.test.fider.io:3000", BASE), subdomain("avengers"));
        assert_eq!(parse_host("demo.test.fider.io:80", BASE), subdomain("demo"));
        assert_eq!(parse_host("DEMO.Test.Fider.IO:1231", BASE), subdomain("demo"));
        assert_eq!(parse_host("demo.test.fider.io.", BASE), subdomain("demo"));
    }

    #[test]
    fn test_not_a_subdomain() {
        assert_eq!(parse_host("demo.demo.test.fider.io", BASE), HostMatch::NoSubdomain);
        assert_eq!(parse_host("test.fider.io", BASE), HostMatch::NoSubdomain);
        assert_eq!(parse_host(".test.fider.io", BASE), HostMatch::NoSubdomain);
        assert_eq!(parse_host("somedomain.com", BASE), HostMatch::NoSubdomain);
        assert_eq!(parse_host("ideas.theavengers.com", BASE), HostMatch::NoSubdomain);
        // suffix match must fall on a label boundary
        assert_eq!(parse_host("footest.fider.io", BASE), HostMatch::NoSubdomain);
    }

    #[test]
    fn test_malformed_hosts() {
        assert_eq!(parse_host("", BASE), HostMatch::NoSubdomain);
        assert_eq!(parse_host("demo.test.fider.io:http", BASE), HostMatch::NoSubdomain);
        assert_eq!(parse_host("demo test.fider.io", BASE), HostMatch::NoSubdomain);
        assert_eq!(parse_host("user@demo.test.fider.io", BASE), HostMatch::NoSubdomain);
        assert!(HostToken::parse("[::1").is_none());
    }

    #[test]
    fn test_empty_base_domain_never_matches() {
        assert_eq!(parse_host("demo.test.fider.io", ""), HostMatch::NoSubdomain);
    }

    #[test]
    fn test_host_token() {
        let token = HostToken::parse("Demo.Test.Fider.io:8080").unwrap();
        assert_eq!(token.hostname, "demo.test.fider.io");
        assert_eq!(token.subdomain_of(BASE), subdomain("demo"));

        let token = HostToken::parse("[::1]:3000").unwrap();
        assert_eq!(token.hostname, "[::1]");
        assert!(HostToken::parse("[::1]:99999").is_none());
        assert!(HostToken::parse("demo.test.fider.io:70000").is_none());
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("Example.COM"), "example.com");
        assert_eq!(normalize_host("example.com:8080"), "example.com");
        assert_eq!(normalize_host("EXAMPLE.COM:443"), "example.com");
        assert_eq!(normalize_host(" Bad Host "), "bad host");
    }
}

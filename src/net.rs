//! Address and port-list helpers shared by predicates, links, and builders.

use std::net::{Ipv4Addr, Ipv6Addr};

/// Returns `true` if the string is a literal IPv4 or IPv6 address.
pub fn is_ip_address(s: &str) -> bool {
    is_ipv4_address(s) || is_ipv6_address(s)
}

/// Returns `true` if the string is a literal IPv4 address.
pub fn is_ipv4_address(s: &str) -> bool {
    s.parse::<Ipv4Addr>().is_ok()
}

/// Returns `true` if the string is a literal IPv6 address (without brackets).
pub fn is_ipv6_address(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

/// Joins a host and port, bracketing IPv6 literals.
pub fn join_host_port(host: &str, port: u16) -> String {
    if is_ipv6_address(host) {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Strips any number of surrounding brackets from an IPv6-style host.
pub fn unwrap_host(host: &str) -> &str {
    let mut host = host;
    while let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        host = inner;
    }
    host
}

/// Splits a user-entered list on newlines or commas, dropping blanks.
///
/// Used for ALPN lists and certificate pin lists, which the UI accepts in
/// either form.
pub fn list_by_line_or_comma(s: &str) -> Vec<String> {
    s.split(['\n', ','])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Hysteria port ranges
// ============================================================================

/// Validates a Hysteria port expression: a single port, a `from-to` range,
/// or a comma-separated mix of both (e.g. `"400-500,7000"`).
pub fn is_valid_hysteria_port(s: &str) -> bool {
    if let Ok(port) = s.parse::<u32>() {
        return (1..=65535).contains(&port);
    }
    for part in s.split(',') {
        if let Ok(port) = part.parse::<u32>() {
            if !(1..=65535).contains(&port) {
                return false;
            }
        } else if part.contains('-') {
            let Some((from, to)) = part.split_once('-') else {
                return false;
            };
            let (Ok(from), Ok(to)) = (from.parse::<u32>(), to.parse::<u32>()) else {
                return false;
            };
            if !(1..=65535).contains(&from) || !(1..=65535).contains(&to) || from > to {
                return false;
            }
        } else {
            return false;
        }
    }
    true
}

/// Returns `true` only for multi-port expressions (ranges or lists), not a
/// plain single port.
pub fn is_valid_hysteria_multi_port(s: &str) -> bool {
    s.parse::<u32>().is_err() && is_valid_hysteria_port(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_detection() {
        assert!(is_ip_address("1.2.3.4"));
        assert!(is_ip_address("::1"));
        assert!(is_ip_address("2001:db8::1"));
        assert!(!is_ip_address("example.com"));
        assert!(!is_ip_address("[::1]"));
        assert!(!is_ip_address(""));
    }

    #[test]
    fn test_join_host_port() {
        assert_eq!(join_host_port("example.com", 443), "example.com:443");
        assert_eq!(join_host_port("1.2.3.4", 80), "1.2.3.4:80");
        assert_eq!(join_host_port("::1", 1080), "[::1]:1080");
    }

    #[test]
    fn test_unwrap_host() {
        assert_eq!(unwrap_host("[::1]"), "::1");
        assert_eq!(unwrap_host("[[::1]]"), "::1");
        assert_eq!(unwrap_host("example.com"), "example.com");
    }

    #[test]
    fn test_list_by_line_or_comma() {
        assert_eq!(list_by_line_or_comma("h2, http/1.1"), vec!["h2", "http/1.1"]);
        assert_eq!(list_by_line_or_comma("a\nb\n\n"), vec!["a", "b"]);
        assert!(list_by_line_or_comma("").is_empty());
    }

    #[test]
    fn test_hysteria_single_port() {
        assert!(is_valid_hysteria_port("443"));
        assert!(is_valid_hysteria_port("65535"));
        assert!(!is_valid_hysteria_port("0"));
        assert!(!is_valid_hysteria_port("65536"));
        assert!(!is_valid_hysteria_port(""));
        assert!(!is_valid_hysteria_port("abc"));
    }

    #[test]
    fn test_hysteria_port_ranges() {
        assert!(is_valid_hysteria_port("400-500"));
        assert!(is_valid_hysteria_port("400-500,7000"));
        assert!(is_valid_hysteria_port("1-65535"));
        assert!(!is_valid_hysteria_port("500-400"));
        assert!(!is_valid_hysteria_port("400-"));
        assert!(!is_valid_hysteria_port("400-500-600"));
    }

    #[test]
    fn test_hysteria_multi_port() {
        assert!(!is_valid_hysteria_multi_port("443"));
        assert!(is_valid_hysteria_multi_port("400-500"));
        assert!(is_valid_hysteria_multi_port("400-500,7000"));
        assert!(!is_valid_hysteria_multi_port("garbage"));
    }
}

//! Lexical IP address predicates
//!
//! These checks only decide whether a field *looks like* an address, which
//! is all the tokenizer needs to tell a mapping line from free text.
//! `999.1.1.1` is accepted; real validation is out of scope here.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$").expect("Invalid IPv4 regex")
});

static IPV6_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]*:[0-9a-fA-F]*:[0-9a-fA-F]*(:[0-9a-fA-F]*){0,5}$")
        .expect("Invalid IPv6 regex")
});

/// Well-known loopback names the operating system relies on.
const SYSTEM_ALIASES: &[(&str, &str)] = &[
    ("127.0.0.1", "localhost"),
    ("::1", "localhost"),
    ("::1", "ip6-localhost"),
    ("::1", "ip6-loopback"),
];

/// Returns true if `value` has the dotted-quad shape of an IPv4 address.
pub fn is_ipv4(value: &str) -> bool {
    IPV4_REGEX.is_match(value)
}

/// Returns true if `value` has the colon-separated shape of an IPv6 address.
///
/// At least two colons are required, so `a:b` is not an address.
pub fn is_ipv6(value: &str) -> bool {
    IPV6_REGEX.is_match(value)
}

/// Returns true if `value` looks like an IPv4 or IPv6 address.
pub fn is_ip(value: &str) -> bool {
    is_ipv4(value) || is_ipv6(value)
}

/// Compare two address strings, semantically when both parse.
///
/// `::01` and `::1` are the same address; unparseable inputs fall back to an
/// exact string comparison.
pub fn same_ip(a: &str, b: &str) -> bool {
    match (a.parse::<IpAddr>(), b.parse::<IpAddr>()) {
        (Ok(left), Ok(right)) => left == right,
        _ => a == b,
    }
}

/// Returns true if `ip alias` is one of the loopback mappings the system
/// depends on (`127.0.0.1 localhost`, `::1 ip6-localhost`, ...).
///
/// Aliases compare case-insensitively.
pub fn is_system_alias(ip: &str, alias: &str) -> bool {
    SYSTEM_ALIASES.iter().any(|(sys_ip, sys_alias)| {
        alias.eq_ignore_ascii_case(sys_alias) && same_ip(ip, sys_ip)
    })
}

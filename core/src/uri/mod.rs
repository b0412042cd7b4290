//! lndconnect URI assembly
//!
//! Query keys are serialized in ascending byte order. Values under the
//! same key keep the order they were added in.

use std::collections::BTreeMap;
use std::fmt;

use crate::constants::{CERT_PARAM, MACAROON_PARAM, URI_SCHEME};
use crate::{Error, Result};

/// A finished `lndconnect://` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionUri(String);

impl ConnectionUri {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Assemble the URI from already encoded credentials.
///
/// `extras` are raw `key=value` strings. Any malformed entry fails the
/// whole build.
pub fn build(
    host: &str,
    port: u16,
    cert: Option<&str>,
    macaroon: &str,
    extras: &[String],
) -> Result<ConnectionUri> {
    if port == 0 {
        return Err(Error::InvalidPort(port));
    }

    let mut query: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    if let Some(cert) = cert {
        query.entry(CERT_PARAM).or_default().push(cert);
    }
    query.entry(MACAROON_PARAM).or_default().push(macaroon);

    for raw in extras {
        let (key, value) = parse_extra(raw)?;
        query.entry(key).or_default().push(value);
    }

    let uri = format!(
        "{}://{}?{}",
        URI_SCHEME,
        join_host_port(host, port),
        encode_query(&query)
    );

    tracing::info!("lndconnect URI generated successfully");
    Ok(ConnectionUri(uri))
}

/// Split a `key=value` argument.
///
/// Exactly one `=` with something on both sides is accepted.
fn parse_extra(raw: &str) -> Result<(&str, &str)> {
    let (key, value) = match raw.split_once('=') {
        Some((k, v)) if !k.is_empty() && !v.is_empty() && !v.contains('=') => (k, v),
        _ => return Err(Error::InvalidQuery(raw.to_string())),
    };

    if key == CERT_PARAM || key == MACAROON_PARAM {
        return Err(Error::ReservedQueryKey(key.to_string()));
    }

    Ok((key, value))
}

/// Join host and port, bracketing IPv6 literals.
///
/// Anything outside the unreserved set is percent-encoded, except the
/// `:` separators of an IPv6 literal. A zone id such as `%eth0` becomes
/// `%25eth0`.
pub fn join_host_port(host: &str, port: u16) -> String {
    let escaped = host
        .split(':')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join(":");

    if host.contains(':') {
        format!("[{}]:{}", escaped, port)
    } else {
        format!("{}:{}", escaped, port)
    }
}

fn encode_query(query: &BTreeMap<&str, Vec<&str>>) -> String {
    let mut pairs = Vec::new();

    for (key, values) in query {
        let key = urlencoding::encode(key);
        for value in values {
            pairs.push(format!("{}={}", key, urlencoding::encode(value)));
        }
    }

    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extras(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_order_is_sorted() {
        let uri = build("203.0.113.5", 10009, Some("Q0VSVA"), "TUFD", &extras(&["foo=bar"]))
            .unwrap();
        assert_eq!(
            uri.as_str(),
            "lndconnect://203.0.113.5:10009?cert=Q0VSVA&foo=bar&macaroon=TUFD"
        );

        let uri = build("node", 8080, None, "TUFD", &extras(&["a=1", "zz=2"])).unwrap();
        assert_eq!(uri.as_str(), "lndconnect://node:8080?a=1&macaroon=TUFD&zz=2");
    }

    #[test]
    fn test_repeated_keys_keep_insertion_order() {
        let uri = build("h", 1, None, "m", &extras(&["k=2", "k=1", "k=3"])).unwrap();
        assert_eq!(uri.as_str(), "lndconnect://h:1?k=2&k=1&k=3&macaroon=m");
    }

    #[test]
    fn test_values_are_escaped() {
        let args = extras(&["label=my node&more", "path=/a b"]);
        let uri = build("h", 1, None, "m", &args).unwrap();
        assert_eq!(
            uri.as_str(),
            "lndconnect://h:1?label=my%20node%26more&macaroon=m&path=%2Fa%20b"
        );
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        let uri = build("2001:db8::1", 10009, None, "m", &[]).unwrap();
        assert_eq!(uri.as_str(), "lndconnect://[2001:db8::1]:10009?macaroon=m");
    }

    #[test]
    fn test_host_is_escaped() {
        let uri = build("my node/x?y", 10009, None, "m", &[]).unwrap();
        assert_eq!(uri.as_str(), "lndconnect://my%20node%2Fx%3Fy:10009?macaroon=m");

        let uri = build("node#1%", 10009, None, "m", &[]).unwrap();
        assert_eq!(uri.as_str(), "lndconnect://node%231%25:10009?macaroon=m");
    }

    #[test]
    fn test_ipv6_zone_is_escaped() {
        let uri = build("fe80::1%eth0", 10009, None, "m", &[]).unwrap();
        assert_eq!(uri.as_str(), "lndconnect://[fe80::1%25eth0]:10009?macaroon=m");
    }

    #[test]
    fn test_hostname_is_untouched() {
        let uri = build("node-1.example.com", 10009, None, "m", &[]).unwrap();
        assert_eq!(uri.as_str(), "lndconnect://node-1.example.com:10009?macaroon=m");
    }

    #[test]
    fn test_empty_host_is_kept() {
        let uri = build("", 10009, None, "m", &[]).unwrap();
        assert_eq!(uri.as_str(), "lndconnect://:10009?macaroon=m");
    }

    #[test]
    fn test_malformed_extras_fail() {
        for bad in ["foo", "=bar", "foo=", "=", "a=b=c", ""] {
            match build("h", 1, None, "m", &extras(&["ok=1", bad])) {
                Err(Error::InvalidQuery(raw)) => assert_eq!(raw, bad),
                other => panic!("{:?} should be rejected, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_reserved_keys_rejected() {
        let err = build("h", 1, None, "m", &extras(&["macaroon=evil"])).unwrap_err();
        assert!(matches!(err, Error::ReservedQueryKey(k) if k == "macaroon"));

        let err = build("h", 1, None, "m", &extras(&["cert=evil"])).unwrap_err();
        assert!(matches!(err, Error::ReservedQueryKey(k) if k == "cert"));
    }

    #[test]
    fn test_zero_port_rejected() {
        let err = build("h", 0, None, "m", &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidPort(0)));
    }

    #[test]
    fn test_build_is_deterministic() {
        let args = extras(&["b=2", "a=1"]);
        let first = build("h", 9735, Some("c"), "m", &args).unwrap();
        let second = build("h", 9735, Some("c"), "m", &args).unwrap();
        assert_eq!(first, second);
    }
}

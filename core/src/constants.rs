//! Centralized lndconnect constants
//!
//! Everything that ends up in a generated URI or drives address
//! discovery is defined here.

/// URI scheme understood by wallet apps
pub const URI_SCHEME: &str = "lndconnect";

/// Default LND gRPC port
pub const DEFAULT_PORT: u16 = 10009;

/// Host advertised in loopback mode
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// Query key carrying the TLS certificate
pub const CERT_PARAM: &str = "cert";

/// Query key carrying the macaroon
pub const MACAROON_PARAM: &str = "macaroon";

/// Plain-text endpoints that echo the caller's public IP.
pub const PUBLIC_IP_SOURCES: &[&str] = &[
    "https://api.ipify.org",
    "https://icanhazip.com",
    "https://checkip.amazonaws.com",
    "https://ifconfig.me/ip",
    "https://ipinfo.io/ip",
];

/// Overall timeout for a single public IP request, in seconds
pub const PUBLIC_IP_TIMEOUT_SECS: u64 = 30;

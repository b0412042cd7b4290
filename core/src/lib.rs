//! lndconnect Core - connection URIs for LND wallets
//!
//! This library resolves the address an LND node should advertise,
//! encodes its TLS certificate and macaroon, and assembles the
//! `lndconnect://` URI that wallet apps scan to connect.

pub mod address;
pub mod constants;
pub mod credentials;
pub mod uri;

mod error;

pub use error::{Error, Result};

/// Everything needed to build one URI
#[derive(Debug, Clone)]
pub struct ConnectionRequest {
    /// Explicit host; wins over every discovery mode when non-empty
    pub host: Option<String>,
    /// Advertise the first non-loopback IPv4 interface address
    pub use_local_ip: bool,
    /// Advertise 127.0.0.1
    pub use_loopback: bool,
    /// Port in the URI authority
    pub port: u16,
    /// PEM certificate bytes, `None` to leave `cert` out of the URI
    pub certificate: Option<Vec<u8>>,
    pub token_scope: TokenScope,
    /// Macaroon bytes for `token_scope`
    pub token: Vec<u8>,
    /// Raw `key=value` query arguments
    pub extra_params: Vec<String>,
}

impl Default for ConnectionRequest {
    fn default() -> Self {
        Self {
            host: None,
            use_local_ip: false,
            use_loopback: false,
            port: constants::DEFAULT_PORT,
            certificate: None,
            token_scope: TokenScope::default(),
            token: Vec::new(),
            extra_params: Vec::new(),
        }
    }
}

/// Resolve, encode and assemble the URI for `request`.
pub async fn connection_uri<L: PublicIpLookup>(
    request: &ConnectionRequest,
    resolver: &AddressResolver<L>,
) -> Result<ConnectionUri> {
    let host = resolver.resolve(request).await?;

    let cert = request
        .certificate
        .as_deref()
        .map(credentials::encode_certificate)
        .transpose()?;
    let macaroon = credentials::encode_token(&request.token);
    tracing::debug!("encoded {:?} macaroon ({} bytes)", request.token_scope, request.token.len());

    uri::build(
        &host,
        request.port,
        cert.as_deref(),
        &macaroon,
        &request.extra_params,
    )
}

// Re-export key types for convenience
pub use address::{AddressResolver, ConsensusLookup, PublicIpLookup};
pub use credentials::{TokenPaths, TokenScope};
pub use uri::ConnectionUri;

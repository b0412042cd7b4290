//! Resolution of the host advertised in the URI

mod public_ip;

use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;

use crate::constants::LOOPBACK_HOST;
use crate::{ConnectionRequest, Result};

pub use public_ip::{pick_consensus, ConsensusLookup};

/// Source of the caller's public-facing IP address
#[async_trait]
pub trait PublicIpLookup: Send + Sync {
    async fn public_ip(&self) -> Result<IpAddr>;
}

/// Picks the single host string for a connection request.
///
/// First match wins: explicit host, local interface IPv4, loopback,
/// public IP.
pub struct AddressResolver<L> {
    lookup: L,
    interfaces: fn() -> Vec<IpAddr>,
}

impl<L: PublicIpLookup> AddressResolver<L> {
    /// Create a resolver that enumerates the real network interfaces
    pub fn new(lookup: L) -> Self {
        Self::with_interfaces(lookup, get_local_ips)
    }

    /// Create a resolver with a custom interface enumerator
    pub fn with_interfaces(lookup: L, interfaces: fn() -> Vec<IpAddr>) -> Self {
        Self { lookup, interfaces }
    }

    /// Resolve the host for `request`.
    ///
    /// Local-IP mode with no usable interface yields an empty host rather
    /// than an error.
    pub async fn resolve(&self, request: &ConnectionRequest) -> Result<String> {
        if let Some(host) = request.host.as_deref().filter(|h| !h.is_empty()) {
            return Ok(host.to_string());
        }

        if request.use_local_ip {
            return Ok(match first_ipv4(&(self.interfaces)()) {
                Some(ip) => ip.to_string(),
                None => {
                    tracing::warn!("no non-loopback IPv4 interface address found");
                    String::new()
                }
            });
        }

        if request.use_loopback {
            return Ok(LOOPBACK_HOST.to_string());
        }

        let ip = self.lookup.public_ip().await?;
        tracing::debug!("discovered public IP {}", ip);
        Ok(ip.to_string())
    }
}

/// Get local IP addresses (non-loopback)
pub fn get_local_ips() -> Vec<IpAddr> {
    let mut ips = Vec::new();

    if let Ok(interfaces) = get_if_addrs::get_if_addrs() {
        for iface in interfaces {
            if !iface.is_loopback() {
                ips.push(iface.ip());
            }
        }
    }

    ips
}

/// First non-loopback IPv4 address in `addrs`
pub fn first_ipv4(addrs: &[IpAddr]) -> Option<Ipv4Addr> {
    addrs.iter().find_map(|addr| match addr {
        IpAddr::V4(v4) if !v4.is_loopback() => Some(*v4),
        _ => None,
    })
}

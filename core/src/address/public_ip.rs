//! Public IP discovery by majority vote across several echo services

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;

use super::PublicIpLookup;
use crate::constants::{PUBLIC_IP_SOURCES, PUBLIC_IP_TIMEOUT_SECS};
use crate::{Error, Result};

/// Asks every configured source and returns the most common answer
pub struct ConsensusLookup {
    client: reqwest::Client,
    sources: Vec<String>,
}

impl ConsensusLookup {
    /// Create a lookup over the default sources
    pub fn new() -> Result<Self> {
        Self::with_sources(PUBLIC_IP_SOURCES.iter().map(|s| s.to_string()).collect())
    }

    /// Create a lookup over custom sources
    pub fn with_sources(sources: Vec<String>) -> Result<Self> {
        Self::with_timeout(sources, Duration::from_secs(PUBLIC_IP_TIMEOUT_SECS))
    }

    /// Create a lookup whose requests each give up after `timeout`
    pub fn with_timeout(sources: Vec<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Discovery(e.to_string()))?;

        Ok(Self { client, sources })
    }

    async fn query(&self, url: &str) -> Result<IpAddr> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/plain")
            .send()
            .await
            .map_err(|e| Error::Discovery(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Discovery(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Discovery(e.to_string()))?;

        body.trim()
            .parse()
            .map_err(|_| Error::Discovery(format!("{} returned an invalid address", url)))
    }
}

#[async_trait]
impl PublicIpLookup for ConsensusLookup {
    async fn public_ip(&self) -> Result<IpAddr> {
        let mut votes = Vec::with_capacity(self.sources.len());

        for url in &self.sources {
            match self.query(url).await {
                Ok(ip) => votes.push(ip),
                Err(e) => tracing::debug!("public IP source failed: {}", e),
            }
        }

        pick_consensus(&votes).ok_or_else(|| {
            Error::Discovery("no public IP source could be reached".to_string())
        })
    }
}

/// Most frequent address in `votes`; ties go to the one seen first.
pub fn pick_consensus(votes: &[IpAddr]) -> Option<IpAddr> {
    let mut tally: Vec<(IpAddr, usize)> = Vec::new();

    for ip in votes {
        match tally.iter_mut().find(|(seen, _)| seen == ip) {
            Some((_, count)) => *count += 1,
            None => tally.push((*ip, 1)),
        }
    }

    let mut best: Option<(IpAddr, usize)> = None;
    for (ip, count) in tally {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((ip, count));
        }
    }

    best.map(|(ip, _)| ip)
}

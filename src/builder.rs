//! Reader Builder Implementation
//!
//! This module provides a builder pattern for constructing an [`RpcReader`],
//! allowing the network, endpoint, request concurrency and pinned block to be
//! configured before any connection is made.

use tracing::debug;

use crate::chain::Network;
use crate::errors::{InfoError, Result};
use crate::rpc::RpcReader;

/// Reads in flight at once when the caller does not pick a limit
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Builder for constructing an RpcReader
#[derive(Debug, Default)]
pub struct ReaderBuilder {
    /// The network to read from
    network: Option<Network>,
    /// Endpoint override, takes priority over the environment and defaults
    rpc_url: Option<String>,
    /// Limit on concurrent reads against the endpoint
    concurrency: Option<usize>,
    /// Block every read is pinned to
    block: Option<u64>,
}

impl ReaderBuilder {
    /// Sets the network to read from
    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Sets the rpc endpoint
    pub fn rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    /// Set the maximum number of reads in flight
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Pin every read to a block number
    pub fn at_block(mut self, block: u64) -> Self {
        self.block = Some(block);
        self
    }

    /// Consumes the builder and produces a reader. Fails on any configuration
    /// problem before a single request is sent.
    pub fn build(self) -> Result<RpcReader> {
        let network = self.network.ok_or(InfoError::NetworkNotSet)?;
        let config = match self.rpc_url {
            Some(rpc_url) => network.config_with_endpoint(&rpc_url)?,
            None => network.config()?,
        };
        let concurrency = self.concurrency.unwrap_or(DEFAULT_CONCURRENCY);

        debug!(%network, rpc_url = %config.rpc_url, concurrency, block = ?self.block, "Building reader");
        Ok(RpcReader::new(config, concurrency, self.block))
    }
}

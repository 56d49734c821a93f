//! Maverick Info Error Types
//!
//! Every failure surfaced by the crate is an [`InfoError`]. Nothing is retried or
//! recovered locally, callers decide what to do with a failed read.

use alloy::primitives::Address;
use thiserror::Error;

use crate::chain::{ContractName, Network};

/// Result alias used throughout the crate
pub type Result<T, E = InfoError> = std::result::Result<T, E>;

/// Enumerates the various error types that can occur while reading protocol state
#[derive(Error, Debug)]
pub enum InfoError {
    /// The network was not set on the builder
    #[error("Network not set")]
    NetworkNotSet,

    /// The network name or chain id is not one we support
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Rpc endpoint resolved to an empty string
    #[error("Rpc endpoint not set for {0}")]
    EndpointNotSet(Network),

    /// Unable to parse endpoint
    #[error("Failed to parse endpoint into URL: {0}")]
    ParseEndpointError(String),

    /// The contract is not deployed (or not configured) on this network
    #[error("Contract {contract} not configured on {network}")]
    MissingContract {
        network: Network,
        contract: ContractName,
    },

    /// A single contract call failed or returned data that did not decode
    #[error("Contract call failed: {0}")]
    ContractError(#[from] alloy::contract::Error),

    /// One of the calls inside a multicall batch failed
    #[error("Multicall failed: {0}")]
    MulticallError(#[from] alloy::providers::MulticallError),

    /// Raw transport failure outside of a contract call
    #[error("Transport error: {0}")]
    TransportError(#[from] alloy::transports::TransportError),

    /// Represents errors raised by non rpc readers
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Scaling by a reward contract that has nothing staked
    #[error("Reward {0} has a zero stake total supply")]
    ZeroStakeSupply(Address),

    /// Spot price does not fit in 256 bits
    #[error("Price overflow for sqrt price {0}")]
    PriceOverflow(alloy::primitives::U256),

    /// Summing or scaling token amounts exceeded 256 bits
    #[error("Token amount overflow")]
    AmountOverflow,

    /// The request limiter was closed while a call was waiting on it
    #[error("Request limiter closed")]
    LimiterClosed,
}

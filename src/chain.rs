//! Network Support and Contract Registry
//!
//! This module defines the supported networks and, for each of them, the rpc
//! endpoint and the table of deployed Maverick V2 contracts. Lookups are plain
//! `match` statements over the closed [`Network`] enum so adding a network is
//! checked by the compiler.

use alloy::primitives::{address, Address};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::errors::{InfoError, Result};

/// Enum representing supported networks
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub enum Network {
    /// Ethereum mainnet
    Mainnet,
    /// Base chain
    Base,
    /// Arbitrum One
    Arbitrum,
    /// BNB smart chain
    Bnb,
    /// Ethereum Sepolia testnet
    Sepolia,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Mainnet,
        Network::Base,
        Network::Arbitrum,
        Network::Bnb,
        Network::Sepolia,
    ];

    /// The EIP-155 chain id
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Base => 8453,
            Network::Arbitrum => 42161,
            Network::Bnb => 56,
            Network::Sepolia => 11155111,
        }
    }

    /// Public endpoint used when no override is configured
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://eth.llamarpc.com",
            Network::Base => "https://base.llamarpc.com",
            Network::Arbitrum => "https://arb1.arbitrum.io/rpc",
            Network::Bnb => "https://bsc-dataseed.bnbchain.org",
            Network::Sepolia => "https://ethereum-sepolia-rpc.publicnode.com",
        }
    }

    /// Environment variable that overrides the default endpoint
    pub fn endpoint_var(&self) -> String {
        format!("MAVERICK_RPC_{}", self.to_string().to_uppercase())
    }

    /// Deployed contracts on this network
    pub fn contracts(&self) -> &'static ContractTable {
        match self {
            Network::Mainnet => &MAINNET_CONTRACTS,
            Network::Base => &BASE_CONTRACTS,
            Network::Arbitrum => &ARBITRUM_CONTRACTS,
            Network::Bnb => &BNB_CONTRACTS,
            Network::Sepolia => &SEPOLIA_CONTRACTS,
        }
    }

    /// Resolve the full configuration, preferring the endpoint from the environment
    pub fn config(&self) -> Result<NetworkConfig> {
        let endpoint = std::env::var(self.endpoint_var())
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.default_endpoint().to_string());
        self.config_with_endpoint(&endpoint)
    }

    /// Resolve the configuration against an explicit endpoint
    pub fn config_with_endpoint(&self, endpoint: &str) -> Result<NetworkConfig> {
        Ok(NetworkConfig {
            network: *self,
            rpc_url: parse_endpoint(*self, endpoint)?,
            contracts: self.contracts(),
        })
    }
}

fn parse_endpoint(network: Network, endpoint: &str) -> Result<Url> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(InfoError::EndpointNotSet(network));
    }
    Url::parse(endpoint).map_err(|e| InfoError::ParseEndpointError(format!("{endpoint}: {e}")))
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "Mainnet"),
            Network::Base => write!(f, "Base"),
            Network::Arbitrum => write!(f, "Arbitrum"),
            Network::Bnb => write!(f, "Bnb"),
            Network::Sepolia => write!(f, "Sepolia"),
        }
    }
}

// Accepts either the network name or its chain id
impl FromStr for Network {
    type Err = InfoError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_lowercase();
        Network::ALL
            .into_iter()
            .find(|network| {
                network.to_string().to_lowercase() == needle
                    || network.chain_id().to_string() == needle
            })
            .ok_or_else(|| InfoError::UnknownNetwork(s.to_string()))
    }
}

/// Immutable per network configuration
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub network: Network,
    pub rpc_url: Url,
    pub contracts: &'static ContractTable,
}

impl NetworkConfig {
    /// Address of a contract, or a configuration error if it is not deployed here
    pub fn address(&self, contract: ContractName) -> Result<Address> {
        self.contracts
            .get(contract)
            .ok_or(InfoError::MissingContract {
                network: self.network,
                contract,
            })
    }
}

/// Logical contract names
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ContractName {
    Factory,
    PoolLens,
    Quoter,
    Router,
    Position,
    BoostedPositionFactory,
    BoostedPositionLens,
    RewardFactory,
    RewardRouter,
    VotingEscrowFactory,
    VotingEscrowLens,
    /// MAV token
    GovernanceToken,
    /// veMAV from the v1 deployment
    LegacyVotingEscrow,
    /// veMAV v2
    VotingEscrow,
}

impl ContractName {
    pub const ALL: [ContractName; 14] = [
        ContractName::Factory,
        ContractName::PoolLens,
        ContractName::Quoter,
        ContractName::Router,
        ContractName::Position,
        ContractName::BoostedPositionFactory,
        ContractName::BoostedPositionLens,
        ContractName::RewardFactory,
        ContractName::RewardRouter,
        ContractName::VotingEscrowFactory,
        ContractName::VotingEscrowLens,
        ContractName::GovernanceToken,
        ContractName::LegacyVotingEscrow,
        ContractName::VotingEscrow,
    ];
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MaverickV2{:?}", self)
    }
}

/// Deployed addresses for one network. `None` means not deployed there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractTable {
    pub factory: Option<Address>,
    pub pool_lens: Option<Address>,
    pub quoter: Option<Address>,
    pub router: Option<Address>,
    pub position: Option<Address>,
    pub boosted_position_factory: Option<Address>,
    pub boosted_position_lens: Option<Address>,
    pub reward_factory: Option<Address>,
    pub reward_router: Option<Address>,
    pub voting_escrow_factory: Option<Address>,
    pub voting_escrow_lens: Option<Address>,
    pub governance_token: Option<Address>,
    pub legacy_voting_escrow: Option<Address>,
    pub voting_escrow: Option<Address>,
}

impl ContractTable {
    pub fn get(&self, contract: ContractName) -> Option<Address> {
        match contract {
            ContractName::Factory => self.factory,
            ContractName::PoolLens => self.pool_lens,
            ContractName::Quoter => self.quoter,
            ContractName::Router => self.router,
            ContractName::Position => self.position,
            ContractName::BoostedPositionFactory => self.boosted_position_factory,
            ContractName::BoostedPositionLens => self.boosted_position_lens,
            ContractName::RewardFactory => self.reward_factory,
            ContractName::RewardRouter => self.reward_router,
            ContractName::VotingEscrowFactory => self.voting_escrow_factory,
            ContractName::VotingEscrowLens => self.voting_escrow_lens,
            ContractName::GovernanceToken => self.governance_token,
            ContractName::LegacyVotingEscrow => self.legacy_voting_escrow,
            ContractName::VotingEscrow => self.voting_escrow,
        }
    }
}

// Maverick V2 core contracts share one deterministic deployment address per chain.
// Token and escrow entries differ and are filled in per network below.
const fn v2_deployment(
    governance_token: Option<Address>,
    legacy_voting_escrow: Option<Address>,
    voting_escrow: Option<Address>,
) -> ContractTable {
    ContractTable {
        factory: Some(address!("0A7e848Aca42d879EF06507Fca0E7b33A0a63c1e")),
        pool_lens: Some(address!("56eFfDD51b20705e152CAF482D9A6972e97B571C")),
        quoter: Some(address!("b40AfdB85a07f37aE217E7D6462e609900dD8D7A")),
        router: Some(address!("62e31802c6145A2D5E842EeD8efe01fC224422fA")),
        position: Some(address!("116193c58B40D50687c0433B2aa0cC4AE00bC32c")),
        boosted_position_factory: Some(address!("d94C8f6D13Cf480FfAC686712C63471D1596cc29")),
        boosted_position_lens: Some(address!("12DD145927CECF616cbD196789c89C2573A53244")),
        reward_factory: Some(address!("63EF1a657cc53747689B201aa07A76E9ef22f8Ef")),
        reward_router: Some(address!("c0C3BC532690af8922a2f260c6e1dEb6CFaB45A0")),
        voting_escrow_factory: Some(address!("451d47fd6207781dc053551edFD98De8d5EB4Cda")),
        voting_escrow_lens: Some(address!("102f936B0fc2E74dC34E45B601FaBaA522f381F0")),
        governance_token,
        legacy_voting_escrow,
        voting_escrow,
    }
}

static MAINNET_CONTRACTS: ContractTable = v2_deployment(
    Some(address!("7448c7456a97769F6cD04F1E83A4a23cCdC46aBD")),
    Some(address!("4949Ac21d5b2A0cCd303C20425eeb29DCcBA66D8")),
    Some(address!("C6addB3327A7D4b3b604227f82A6259Ca7112053")),
);

static BASE_CONTRACTS: ContractTable = v2_deployment(
    Some(address!("64b88c73A5DfA78D1713fE1b4c69a22d7E0faAa7")),
    None,
    None,
);

static ARBITRUM_CONTRACTS: ContractTable = v2_deployment(None, None, None);

static BNB_CONTRACTS: ContractTable = v2_deployment(
    Some(address!("d691d9a68C887BDF34DA8c36f63487333ACfD103")),
    None,
    None,
);

static SEPOLIA_CONTRACTS: ContractTable = v2_deployment(None, None, None);

//! The read surface the fetchers are written against
//!
//! [`ChainReader`] mirrors the contract methods this crate calls, one method per
//! remote read (or per batched read). [`crate::RpcReader`] implements it over
//! json-rpc. Fetchers only reshape what comes back.

use alloy::primitives::{Address, I256, U256};
use async_trait::async_trait;

use crate::chain::{ContractName, Network};
use crate::errors::Result;
use crate::types::{PoolState, Window};

/// Everything read from a pool in its one multicall batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub token_a: Address,
    pub token_b: Address,
    pub tick_spacing: U256,
    pub lookback: U256,
    pub fee_a_in: U256,
    pub fee_b_in: U256,
    pub state: PoolState,
    pub current_twa: I256,
}

/// Pool and token amounts of one bin group of a position nft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionInformation {
    pub pool: Address,
    pub amount_a: U256,
    pub amount_b: U256,
}

/// A holder's token amounts inside a boosted position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoostedPositionUserInformation {
    pub token_a: Address,
    pub token_b: Address,
    pub user_amount_a: U256,
    pub user_amount_b: U256,
}

/// One voting escrow lockup as reported by the lens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lockup {
    pub amount: U256,
    pub end: u128,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Network every read is issued against
    fn network(&self) -> Network;

    /// Resolve a contract this reader will call. Fetchers check everything a
    /// call chain needs up front so a missing address fails before any read.
    fn require_contract(&self, contract: ContractName) -> Result<Address>;

    /// Pool addresses registered in the factory within `window`
    async fn pool_addresses(&self, window: Window) -> Result<Vec<Address>>;

    /// Batched read of the pool's tokens, parameters, state and twa
    async fn pool_snapshot(&self, pool: Address) -> Result<PoolSnapshot>;

    /// D18 square root price reported by the pool lens
    async fn pool_sqrt_price(&self, pool: Address) -> Result<U256>;

    /// `(tokenA, tokenB)` of a pool
    async fn pool_tokens(&self, pool: Address) -> Result<(Address, Address)>;

    /// Position nft ids held by `owner`
    async fn position_ids_of_owner(&self, owner: Address) -> Result<Vec<U256>>;

    async fn position_information(&self, nft_id: U256, index: U256) -> Result<PositionInformation>;

    async fn boosted_position_addresses(&self, window: Window) -> Result<Vec<Address>>;

    async fn boosted_position_user_information(
        &self,
        boosted_position: Address,
        user: Address,
    ) -> Result<BoostedPositionUserInformation>;

    async fn reward_addresses(&self, window: Window) -> Result<Vec<Address>>;

    async fn reward_ids_of_owner(&self, reward: Address, owner: Address) -> Result<Vec<U256>>;

    /// The token staked into a reward contract, a boosted position
    async fn reward_staking_token(&self, reward: Address) -> Result<Address>;

    async fn reward_stake_balance(&self, reward: Address, nft_id: U256) -> Result<U256>;

    async fn reward_stake_total_supply(&self, reward: Address) -> Result<U256>;

    async fn voting_escrow_base_token(&self, voting_escrow: Address) -> Result<Address>;

    async fn voting_escrow_lockups(
        &self,
        voting_escrow: Address,
        user: Address,
        window: Window,
    ) -> Result<Vec<Lockup>>;
}

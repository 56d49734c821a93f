//! Typed records assembled by the fetchers
//!
//! Everything here is a snapshot of on-chain state at call time. Token
//! quantities stay as 256 bit integers all the way through.

use alloy::primitives::{Address, I256, U256};
use serde::{Deserialize, Serialize};

use crate::chain::Network;

/// A quantity of a single token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub token: Address,
    pub amount: U256,
}

/// Snapshot of the pool state struct
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub reserve_a: u128,
    pub reserve_b: u128,
    pub last_twa_d8: i64,
    pub last_log_price_d8: i64,
    pub last_timestamp: u64,
    pub active_tick: i32,
    pub is_locked: bool,
    pub bin_counter: u32,
    pub protocol_fee_ratio_d3: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub address: Address,
    pub token_a: Address,
    pub token_b: Address,
    pub tick_spacing: U256,
    pub lookback: U256,
    /// Fee when token A is swapped in
    pub fee_a_in: U256,
    /// Fee when token B is swapped in
    pub fee_b_in: U256,
    pub state: PoolState,
    pub current_twa: I256,
    pub sqrt_price: U256,
    /// `sqrt_price^2 / 1e18`, rounded down
    pub price: U256,
}

/// A liquidity position nft and the tokens it currently represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub nft_id: U256,
    pub network: Network,
    pub pool: Address,
    pub token_assets: Vec<Asset>,
}

/// A user's share of a boosted position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostedPosition {
    pub boosted_position: Address,
    pub network: Network,
    pub token_assets: Vec<Asset>,
}

/// A staked reward nft. `token_assets` is the boosted position held by the reward
/// contract scaled down to this nft's share of the stake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardPosition {
    pub reward: Address,
    pub nft_id: U256,
    pub boosted_position: BoostedPosition,
    pub network: Network,
    pub token_assets: Vec<Asset>,
}

/// All reward positions a user holds in one reward contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardContractPositions {
    pub reward: Address,
    pub positions: Vec<RewardPosition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockupInfo {
    /// Index in the returned lockup window, not an on-chain id
    pub lockup_id: usize,
    pub token_assets: Asset,
    /// Unlock timestamp at the lens' full uint128 width
    pub end: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeLockupInfo {
    pub voting_escrow: Address,
    pub network: Network,
    /// Exact sum of every lockup amount
    pub total_token_assets: Asset,
    pub lockups: Vec<LockupInfo>,
}

/// Half open enumeration window `[start, end)` passed to factory lookups
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: u64,
    pub end: u64,
}

/// Window used by the pool listing unless the caller picks one
pub const POOL_WINDOW: Window = Window::new(0, 10);

impl Window {
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Inverted windows are treated as empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new(0, 100)
    }
}

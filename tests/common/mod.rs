//! In memory chain used by the integration tests. Each map stands in for one
//! contract read; a missing entry behaves like a reverted call.
#![allow(dead_code)]

use alloy::primitives::{Address, I256, U256};
use async_trait::async_trait;
use maverick_info::{
    BoostedPositionUserInformation, ChainReader, ContractName, InfoError, Lockup, Network,
    PoolSnapshot, PositionInformation, Result, Window,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct FakeChain {
    pub pools: Vec<Address>,
    pub snapshots: HashMap<Address, PoolSnapshot>,
    pub sqrt_prices: HashMap<Address, U256>,
    pub position_ids: HashMap<Address, Vec<U256>>,
    pub positions: HashMap<U256, PositionInformation>,
    pub boosted_positions: Vec<Address>,
    pub boosted_info: HashMap<(Address, Address), BoostedPositionUserInformation>,
    pub rewards: Vec<Address>,
    pub reward_ids: HashMap<(Address, Address), Vec<U256>>,
    pub staking_tokens: HashMap<Address, Address>,
    pub stake_balances: HashMap<(Address, U256), U256>,
    pub stake_supplies: HashMap<Address, U256>,
    pub base_tokens: HashMap<Address, Address>,
    pub lockups: HashMap<(Address, Address), Vec<Lockup>>,
    /// Contracts left out of the network's table
    pub missing_contracts: Vec<ContractName>,
    /// Number of reads served, failures included
    pub reads: AtomicUsize,
}

pub fn addr(n: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&n.to_be_bytes());
    Address::from(bytes)
}

fn missing(what: &str) -> InfoError {
    InfoError::ProviderError(format!("execution reverted: {what}"))
}

// Apply a window to a factory list the way the contracts do, clamped to its length
fn slice(items: &[Address], window: Window) -> Vec<Address> {
    let len = items.len() as u64;
    let start = window.start.min(len) as usize;
    let end = window.end.min(len) as usize;
    if start >= end {
        return Vec::new();
    }
    items[start..end].to_vec()
}

impl FakeChain {
    pub fn with_pool(mut self, pool: Address, snapshot: PoolSnapshot, sqrt_price: U256) -> Self {
        self.pools.push(pool);
        self.snapshots.insert(pool, snapshot);
        self.sqrt_prices.insert(pool, sqrt_price);
        self
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

/// A snapshot whose fields are all distinct so a swapped field is caught
pub fn snapshot(seed: u64) -> PoolSnapshot {
    PoolSnapshot {
        token_a: addr(seed * 100 + 1),
        token_b: addr(seed * 100 + 2),
        tick_spacing: U256::from(seed * 100 + 3),
        lookback: U256::from(seed * 100 + 4),
        fee_a_in: U256::from(seed * 100 + 5),
        fee_b_in: U256::from(seed * 100 + 6),
        state: maverick_info::PoolState {
            reserve_a: (seed * 100 + 7) as u128,
            reserve_b: (seed * 100 + 8) as u128,
            last_twa_d8: -((seed * 100 + 9) as i64),
            last_log_price_d8: (seed * 100 + 10) as i64,
            last_timestamp: seed * 100 + 11,
            active_tick: -((seed * 100 + 12) as i32),
            is_locked: seed % 2 == 1,
            bin_counter: (seed * 100 + 13) as u32,
            protocol_fee_ratio_d3: (seed + 14) as u8,
        },
        current_twa: I256::try_from(-((seed * 100 + 15) as i64)).unwrap(),
    }
}

#[async_trait]
impl ChainReader for FakeChain {
    fn network(&self) -> Network {
        Network::Base
    }

    fn require_contract(&self, contract: ContractName) -> Result<Address> {
        if self.missing_contracts.contains(&contract) {
            return Err(InfoError::MissingContract {
                network: Network::Base,
                contract,
            });
        }
        Ok(addr(0xc0))
    }

    async fn pool_addresses(&self, window: Window) -> Result<Vec<Address>> {
        self.read();
        Ok(slice(&self.pools, window))
    }

    async fn pool_snapshot(&self, pool: Address) -> Result<PoolSnapshot> {
        self.read();
        self.snapshots.get(&pool).cloned().ok_or_else(|| missing("getState"))
    }

    async fn pool_sqrt_price(&self, pool: Address) -> Result<U256> {
        self.read();
        self.sqrt_prices.get(&pool).copied().ok_or_else(|| missing("getPoolSqrtPrice"))
    }

    async fn pool_tokens(&self, pool: Address) -> Result<(Address, Address)> {
        self.read();
        self.snapshots
            .get(&pool)
            .map(|snapshot| (snapshot.token_a, snapshot.token_b))
            .ok_or_else(|| missing("tokenA"))
    }

    async fn position_ids_of_owner(&self, owner: Address) -> Result<Vec<U256>> {
        self.read();
        Ok(self.position_ids.get(&owner).cloned().unwrap_or_default())
    }

    async fn position_information(&self, nft_id: U256, index: U256) -> Result<PositionInformation> {
        self.read();
        if !index.is_zero() {
            return Err(missing("bin index out of range"));
        }
        self.positions.get(&nft_id).cloned().ok_or_else(|| missing("tokenIdPositionInformation"))
    }

    async fn boosted_position_addresses(&self, window: Window) -> Result<Vec<Address>> {
        self.read();
        Ok(slice(&self.boosted_positions, window))
    }

    async fn boosted_position_user_information(
        &self,
        boosted_position: Address,
        user: Address,
    ) -> Result<BoostedPositionUserInformation> {
        self.read();
        self.boosted_info
            .get(&(boosted_position, user))
            .cloned()
            .ok_or_else(|| missing("boostedPositionUserInformation"))
    }

    async fn reward_addresses(&self, window: Window) -> Result<Vec<Address>> {
        self.read();
        Ok(slice(&self.rewards, window))
    }

    async fn reward_ids_of_owner(&self, reward: Address, owner: Address) -> Result<Vec<U256>> {
        self.read();
        Ok(self.reward_ids.get(&(reward, owner)).cloned().unwrap_or_default())
    }

    async fn reward_staking_token(&self, reward: Address) -> Result<Address> {
        self.read();
        self.staking_tokens.get(&reward).copied().ok_or_else(|| missing("stakingToken"))
    }

    async fn reward_stake_balance(&self, reward: Address, nft_id: U256) -> Result<U256> {
        self.read();
        self.stake_balances
            .get(&(reward, nft_id))
            .copied()
            .ok_or_else(|| missing("stakeBalanceOf"))
    }

    async fn reward_stake_total_supply(&self, reward: Address) -> Result<U256> {
        self.read();
        self.stake_supplies.get(&reward).copied().ok_or_else(|| missing("stakeTotalSupply"))
    }

    async fn voting_escrow_base_token(&self, voting_escrow: Address) -> Result<Address> {
        self.read();
        self.base_tokens.get(&voting_escrow).copied().ok_or_else(|| missing("baseToken"))
    }

    async fn voting_escrow_lockups(
        &self,
        voting_escrow: Address,
        user: Address,
        window: Window,
    ) -> Result<Vec<Lockup>> {
        self.read();
        let lockups = self.lockups.get(&(voting_escrow, user)).cloned().unwrap_or_default();
        let len = lockups.len() as u64;
        let start = window.start.min(len) as usize;
        let end = window.end.min(len) as usize;
        Ok(if start < end { lockups[start..end].to_vec() } else { Vec::new() })
    }
}

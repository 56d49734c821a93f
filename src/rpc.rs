use alloy::eips::BlockId;
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::debug;

use crate::builder::ReaderBuilder;
use crate::chain::{ContractName, Network, NetworkConfig};
use crate::errors::{InfoError, Result};
use crate::onchain::{
    IMaverickV2BoostedPositionFactory, IMaverickV2BoostedPositionLens, IMaverickV2Factory,
    IMaverickV2Pool, IMaverickV2PoolLens, IMaverickV2Position, IMaverickV2Reward,
    IMaverickV2RewardFactory, IMaverickV2VotingEscrow, IMaverickV2VotingEscrowLens,
};
use crate::reader::{
    BoostedPositionUserInformation, ChainReader, Lockup, PoolSnapshot, PositionInformation,
};
use crate::types::{PoolState, Window};

/// Reads protocol state over json-rpc
///
/// Every read first takes a permit from a shared limiter, so nested fan outs
/// never have more than `concurrency` reads in flight against the endpoint.
/// Reads target `latest` unless the reader is pinned to a block, in which case
/// every call (multicall included) sees the same state.
#[derive(Clone)]
pub struct RpcReader {
    provider: RootProvider,
    config: NetworkConfig,
    limiter: Arc<Semaphore>,
    block: BlockId,
}

impl RpcReader {
    /// Constructs a builder
    pub fn builder() -> ReaderBuilder {
        ReaderBuilder::default()
    }

    pub(crate) fn new(config: NetworkConfig, concurrency: usize, block: Option<u64>) -> Self {
        let provider = ProviderBuilder::default().connect_http(config.rpc_url.clone());
        Self::with_provider(provider, config, concurrency, block)
    }

    fn with_provider(
        provider: RootProvider,
        config: NetworkConfig,
        concurrency: usize,
        block: Option<u64>,
    ) -> Self {
        Self {
            provider,
            config,
            limiter: Arc::new(Semaphore::new(concurrency.max(1))),
            block: block.map(BlockId::number).unwrap_or_else(BlockId::latest),
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Block every read is issued against
    pub fn block(&self) -> BlockId {
        self.block
    }

    /// A reader sharing this connection but pinned to `block`
    pub fn at_block(&self, block: u64) -> Self {
        Self {
            block: BlockId::number(block),
            ..self.clone()
        }
    }

    /// Read the chain head once and pin a reader to it
    pub async fn pin_latest(&self) -> Result<Self> {
        let head = self.provider.get_block_number().await?;
        debug!(network = %self.config.network, head, "Pinned reader to head");
        Ok(self.at_block(head))
    }

    async fn permit(&self) -> Result<SemaphorePermit<'_>> {
        self.limiter
            .acquire()
            .await
            .map_err(|_| InfoError::LimiterClosed)
    }

    fn address(&self, contract: ContractName) -> Result<Address> {
        self.config.address(contract)
    }
}

fn window_bounds(window: Window) -> (U256, U256) {
    (U256::from(window.start), U256::from(window.end))
}

impl From<IMaverickV2Pool::State> for PoolState {
    fn from(state: IMaverickV2Pool::State) -> Self {
        Self {
            reserve_a: state.reserveA,
            reserve_b: state.reserveB,
            last_twa_d8: state.lastTwaD8,
            last_log_price_d8: state.lastLogPriceD8,
            last_timestamp: state.lastTimestamp.to::<u64>(),
            active_tick: state.activeTick,
            is_locked: state.isLocked,
            bin_counter: state.binCounter,
            protocol_fee_ratio_d3: state.protocolFeeRatioD3,
        }
    }
}

#[async_trait]
impl ChainReader for RpcReader {
    fn network(&self) -> Network {
        self.config.network
    }

    fn require_contract(&self, contract: ContractName) -> Result<Address> {
        self.address(contract)
    }

    async fn pool_addresses(&self, window: Window) -> Result<Vec<Address>> {
        let factory = self.address(ContractName::Factory)?;
        let (start, end) = window_bounds(window);
        let _permit = self.permit().await?;
        let pools = IMaverickV2Factory::new(factory, &self.provider)
            .lookup(start, end)
            .block(self.block)
            .call()
            .await?;
        Ok(pools)
    }

    async fn pool_snapshot(&self, pool: Address) -> Result<PoolSnapshot> {
        let contract = IMaverickV2Pool::new(pool, &self.provider);
        let _permit = self.permit().await?;

        // One round trip, all calls must succeed
        let (token_a, token_b, tick_spacing, lookback, fee_a_in, fee_b_in, state, current_twa) = self
            .provider
            .multicall()
            .add(contract.tokenA())
            .add(contract.tokenB())
            .add(contract.tickSpacing())
            .add(contract.lookback())
            .add(contract.fee(true))
            .add(contract.fee(false))
            .add(contract.getState())
            .add(contract.getCurrentTwa())
            .block(self.block)
            .aggregate()
            .await?;

        Ok(PoolSnapshot {
            token_a,
            token_b,
            tick_spacing,
            lookback,
            fee_a_in,
            fee_b_in,
            state: state.into(),
            current_twa,
        })
    }

    async fn pool_sqrt_price(&self, pool: Address) -> Result<U256> {
        let lens = self.address(ContractName::PoolLens)?;
        let _permit = self.permit().await?;
        let sqrt_price = IMaverickV2PoolLens::new(lens, &self.provider)
            .getPoolSqrtPrice(pool)
            .block(self.block)
            .call()
            .await?;
        Ok(sqrt_price)
    }

    async fn pool_tokens(&self, pool: Address) -> Result<(Address, Address)> {
        let contract = IMaverickV2Pool::new(pool, &self.provider);
        let _permit = self.permit().await?;
        let tokens = self
            .provider
            .multicall()
            .add(contract.tokenA())
            .add(contract.tokenB())
            .block(self.block)
            .aggregate()
            .await?;
        Ok(tokens)
    }

    async fn position_ids_of_owner(&self, owner: Address) -> Result<Vec<U256>> {
        let position = self.address(ContractName::Position)?;
        let _permit = self.permit().await?;
        let ids = IMaverickV2Position::new(position, &self.provider)
            .tokenIdsOfOwner(owner)
            .block(self.block)
            .call()
            .await?;
        Ok(ids)
    }

    async fn position_information(&self, nft_id: U256, index: U256) -> Result<PositionInformation> {
        let position = self.address(ContractName::Position)?;
        let _permit = self.permit().await?;
        let info = IMaverickV2Position::new(position, &self.provider)
            .tokenIdPositionInformation(nft_id, index)
            .block(self.block)
            .call()
            .await?;
        Ok(PositionInformation {
            pool: info.poolBinIds.pool,
            amount_a: info.amountA,
            amount_b: info.amountB,
        })
    }

    async fn boosted_position_addresses(&self, window: Window) -> Result<Vec<Address>> {
        let factory = self.address(ContractName::BoostedPositionFactory)?;
        let (start, end) = window_bounds(window);
        let _permit = self.permit().await?;
        let boosted_positions = IMaverickV2BoostedPositionFactory::new(factory, &self.provider)
            .lookup(start, end)
            .block(self.block)
            .call()
            .await?;
        Ok(boosted_positions)
    }

    async fn boosted_position_user_information(
        &self,
        boosted_position: Address,
        user: Address,
    ) -> Result<BoostedPositionUserInformation> {
        let lens = self.address(ContractName::BoostedPositionLens)?;
        let _permit = self.permit().await?;
        let user_info = IMaverickV2BoostedPositionLens::new(lens, &self.provider)
            .boostedPositionUserInformation(boosted_position, user)
            .block(self.block)
            .call()
            .await?;
        Ok(BoostedPositionUserInformation {
            token_a: user_info.info.tokenA,
            token_b: user_info.info.tokenB,
            user_amount_a: user_info.userAmountA,
            user_amount_b: user_info.userAmountB,
        })
    }

    async fn reward_addresses(&self, window: Window) -> Result<Vec<Address>> {
        let factory = self.address(ContractName::RewardFactory)?;
        let (start, end) = window_bounds(window);
        let _permit = self.permit().await?;
        let rewards = IMaverickV2RewardFactory::new(factory, &self.provider)
            .rewards(start, end)
            .block(self.block)
            .call()
            .await?;
        Ok(rewards)
    }

    async fn reward_ids_of_owner(&self, reward: Address, owner: Address) -> Result<Vec<U256>> {
        let _permit = self.permit().await?;
        let ids = IMaverickV2Reward::new(reward, &self.provider)
            .tokenIdsOfOwner(owner)
            .block(self.block)
            .call()
            .await?;
        Ok(ids)
    }

    async fn reward_staking_token(&self, reward: Address) -> Result<Address> {
        let _permit = self.permit().await?;
        let token = IMaverickV2Reward::new(reward, &self.provider)
            .stakingToken()
            .block(self.block)
            .call()
            .await?;
        Ok(token)
    }

    async fn reward_stake_balance(&self, reward: Address, nft_id: U256) -> Result<U256> {
        let _permit = self.permit().await?;
        let balance = IMaverickV2Reward::new(reward, &self.provider)
            .stakeBalanceOf(nft_id)
            .block(self.block)
            .call()
            .await?;
        Ok(balance)
    }

    async fn reward_stake_total_supply(&self, reward: Address) -> Result<U256> {
        let _permit = self.permit().await?;
        let supply = IMaverickV2Reward::new(reward, &self.provider)
            .stakeTotalSupply()
            .block(self.block)
            .call()
            .await?;
        Ok(supply)
    }

    async fn voting_escrow_base_token(&self, voting_escrow: Address) -> Result<Address> {
        let _permit = self.permit().await?;
        let token = IMaverickV2VotingEscrow::new(voting_escrow, &self.provider)
            .baseToken()
            .block(self.block)
            .call()
            .await?;
        Ok(token)
    }

    async fn voting_escrow_lockups(
        &self,
        voting_escrow: Address,
        user: Address,
        window: Window,
    ) -> Result<Vec<Lockup>> {
        let lens = self.address(ContractName::VotingEscrowLens)?;
        let (start, end) = window_bounds(window);
        let _permit = self.permit().await?;
        let lockups = IMaverickV2VotingEscrowLens::new(lens, &self.provider)
            .getLockups(voting_escrow, user, start, end)
            .block(self.block)
            .call()
            .await?;
        Ok(lockups
            .into_iter()
            .map(|lockup| Lockup {
                amount: U256::from(lockup.amount),
                end: lockup.end,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onchain::IMaverickV2BoostedPositionLens::{
        BoostedPositionInformation, UserBoostedPositionInformation,
    };
    use crate::onchain::IMaverickV2Position::{PositionFullInformation, PositionPoolBinIds};
    use alloy::primitives::aliases::U40;
    use alloy::primitives::{address, Bytes, I256};
    use alloy::sol_types::SolValue;
    use alloy::transports::mock::Asserter;

    const POOL: Address = address!("00000000000000000000000000000000000000aa");
    const TOKEN_A: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    const TOKEN_B: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

    // Reader whose eth_call results are queued on the returned asserter
    fn mocked_reader() -> (RpcReader, Asserter) {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::default().connect_mocked_client(asserter.clone());
        let config = Network::Base
            .config_with_endpoint("http://localhost:8545")
            .unwrap();
        (RpcReader::with_provider(provider, config, 4, None), asserter)
    }

    fn reader() -> RpcReader {
        RpcReader::builder()
            .network(Network::Base)
            .rpc_url("http://localhost:8545")
            .concurrency(4)
            .build()
            .unwrap()
    }

    #[test]
    fn pinning_keeps_connection_settings() {
        let reader = reader();
        assert_eq!(reader.block(), BlockId::latest());

        let pinned = reader.at_block(1_234);
        assert_eq!(pinned.block(), BlockId::number(1_234));
        assert_eq!(pinned.network(), Network::Base);
        assert!(Arc::ptr_eq(&pinned.limiter, &reader.limiter));
    }

    #[test]
    fn zero_concurrency_still_allows_reads() {
        let reader = RpcReader::builder()
            .network(Network::Base)
            .rpc_url("http://localhost:8545")
            .concurrency(0)
            .build()
            .unwrap();
        assert_eq!(reader.limiter.available_permits(), 1);
    }

    #[tokio::test]
    async fn permits_are_bounded() {
        let reader = reader();
        let first = reader.permit().await.unwrap();
        let _second = reader.permit().await.unwrap();
        assert_eq!(reader.limiter.available_permits(), 2);
        drop(first);
        assert_eq!(reader.limiter.available_permits(), 3);
    }

    #[test]
    fn state_struct_maps_field_by_field() {
        let state = IMaverickV2Pool::State {
            reserveA: 10,
            reserveB: 20,
            lastTwaD8: -3,
            lastLogPriceD8: 4,
            lastTimestamp: alloy::primitives::aliases::U40::from(1_700_000_000u64),
            activeTick: -7,
            isLocked: true,
            binCounter: 9,
            protocolFeeRatioD3: 2,
        };
        let mapped = PoolState::from(state);
        assert_eq!(
            mapped,
            PoolState {
                reserve_a: 10,
                reserve_b: 20,
                last_twa_d8: -3,
                last_log_price_d8: 4,
                last_timestamp: 1_700_000_000,
                active_tick: -7,
                is_locked: true,
                bin_counter: 9,
                protocol_fee_ratio_d3: 2,
            }
        );
    }

    #[tokio::test]
    async fn pool_snapshot_maps_multicall_results_in_order() {
        let (reader, asserter) = mocked_reader();
        let state = IMaverickV2Pool::State {
            reserveA: 1_000,
            reserveB: 2_000,
            lastTwaD8: -30,
            lastLogPriceD8: 40,
            lastTimestamp: U40::from(5u64),
            activeTick: -6,
            isLocked: false,
            binCounter: 77,
            protocolFeeRatioD3: 8,
        };
        let returns: Vec<Bytes> = vec![
            TOKEN_A.abi_encode().into(),
            TOKEN_B.abi_encode().into(),
            U256::from(10).abi_encode().into(),
            U256::from(11).abi_encode().into(),
            U256::from(111).abi_encode().into(),
            U256::from(222).abi_encode().into(),
            state.abi_encode().into(),
            I256::try_from(-9).unwrap().abi_encode().into(),
        ];
        asserter.push_success(&Bytes::from((U256::from(1), returns).abi_encode_params()));

        let snapshot = reader.pool_snapshot(POOL).await.unwrap();
        assert_eq!(
            snapshot,
            PoolSnapshot {
                token_a: TOKEN_A,
                token_b: TOKEN_B,
                tick_spacing: U256::from(10),
                lookback: U256::from(11),
                fee_a_in: U256::from(111),
                fee_b_in: U256::from(222),
                state: PoolState {
                    reserve_a: 1_000,
                    reserve_b: 2_000,
                    last_twa_d8: -30,
                    last_log_price_d8: 40,
                    last_timestamp: 5,
                    active_tick: -6,
                    is_locked: false,
                    bin_counter: 77,
                    protocol_fee_ratio_d3: 8,
                },
                current_twa: I256::try_from(-9).unwrap(),
            }
        );
    }

    #[tokio::test]
    async fn position_information_reads_pool_and_amounts() {
        let (reader, asserter) = mocked_reader();
        let info = PositionFullInformation {
            poolBinIds: PositionPoolBinIds {
                pool: POOL,
                binIds: vec![3, 4],
            },
            amountA: U256::from(7),
            amountB: U256::from(8),
            binAAmounts: vec![U256::from(1)],
            binBAmounts: vec![U256::from(2)],
            ticks: vec![-1],
            liquidities: vec![U256::from(99)],
        };
        asserter.push_success(&Bytes::from(info.abi_encode()));

        let position = reader
            .position_information(U256::from(42), U256::ZERO)
            .await
            .unwrap();
        assert_eq!(
            position,
            PositionInformation {
                pool: POOL,
                amount_a: U256::from(7),
                amount_b: U256::from(8),
            }
        );
    }

    #[tokio::test]
    async fn boosted_user_information_takes_user_amounts() {
        let (reader, asserter) = mocked_reader();
        let user_info = UserBoostedPositionInformation {
            info: BoostedPositionInformation {
                boostedPosition: address!("00000000000000000000000000000000000000b0"),
                pool: POOL,
                kind: 1,
                binIds: vec![5],
                ratios: vec![1],
                totalSupply: U256::from(1_000),
                tokenA: TOKEN_A,
                tokenB: TOKEN_B,
                amountA: U256::from(5_000),
                amountB: U256::from(6_000),
            },
            userBalance: U256::from(10),
            userAmountA: U256::from(50),
            userAmountB: U256::from(60),
        };
        asserter.push_success(&Bytes::from(user_info.abi_encode()));

        let info = reader
            .boosted_position_user_information(POOL, TOKEN_A)
            .await
            .unwrap();
        assert_eq!(
            info,
            BoostedPositionUserInformation {
                token_a: TOKEN_A,
                token_b: TOKEN_B,
                user_amount_a: U256::from(50),
                user_amount_b: U256::from(60),
            }
        );
    }

    #[tokio::test]
    async fn lockups_keep_amount_and_full_end() {
        let (reader, asserter) = mocked_reader();
        let lockups = vec![
            IMaverickV2VotingEscrowLens::Lockup {
                amount: u128::MAX,
                end: u128::MAX,
                votes: U256::from(9),
            },
            IMaverickV2VotingEscrowLens::Lockup {
                amount: 3,
                end: 1_800_000_000,
                votes: U256::ZERO,
            },
        ];
        asserter.push_success(&Bytes::from(lockups.abi_encode()));

        let read = reader
            .voting_escrow_lockups(POOL, TOKEN_A, Window::default())
            .await
            .unwrap();
        assert_eq!(
            read,
            vec![
                Lockup {
                    amount: U256::from(u128::MAX),
                    end: u128::MAX,
                },
                Lockup {
                    amount: U256::from(3),
                    end: 1_800_000_000,
                },
            ]
        );
    }
}

use alloy::primitives::{Address, U256};
use futures::future::try_join_all;
use tracing::debug;

use super::boosted_position::{fetch_boosted_position_details, make_asset};
use super::{mul_div, require_contracts};
use crate::chain::ContractName;
use crate::errors::{InfoError, Result};
use crate::reader::ChainReader;
use crate::types::{Asset, RewardContractPositions, RewardPosition, Window};

/// Fetch `user`'s reward positions in every reward contract listed inside
/// `window`. Results stay grouped by reward contract, in factory order.
pub async fn fetch_all_reward_data_for_user<R>(
    reader: &R,
    user: Address,
    window: Window,
) -> Result<Vec<RewardContractPositions>>
where
    R: ChainReader + ?Sized,
{
    require_contracts(
        reader,
        &[ContractName::RewardFactory, ContractName::BoostedPositionLens],
    )?;
    if window.is_empty() {
        return Ok(Vec::new());
    }

    let rewards = reader.reward_addresses(window).await?;
    debug!(network = %reader.network(), %user, count = rewards.len(), "Fetched reward addresses");

    try_join_all(rewards.into_iter().map(|reward| async move {
        let positions = fetch_reward_position_nft_id_data_for_user(reader, reward, user).await?;
        Ok::<_, InfoError>(RewardContractPositions { reward, positions })
    }))
    .await
}

/// Fetch every nft `user` has staked in one reward contract
pub async fn fetch_reward_position_nft_id_data_for_user<R>(
    reader: &R,
    reward: Address,
    user: Address,
) -> Result<Vec<RewardPosition>>
where
    R: ChainReader + ?Sized,
{
    require_contracts(reader, &[ContractName::BoostedPositionLens])?;
    let nft_ids = reader.reward_ids_of_owner(reward, user).await?;
    debug!(%reward, %user, count = nft_ids.len(), "Fetched reward position ids");

    try_join_all(
        nft_ids
            .into_iter()
            .map(|nft_id| fetch_reward_position_details(reader, reward, nft_id)),
    )
    .await
}

/// Value one staked nft. The reward contract holds the boosted position
/// tokens, so its holdings are scaled by the nft's share of the total stake.
pub async fn fetch_reward_position_details<R>(
    reader: &R,
    reward: Address,
    nft_id: U256,
) -> Result<RewardPosition>
where
    R: ChainReader + ?Sized,
{
    require_contracts(reader, &[ContractName::BoostedPositionLens])?;
    let staking_token = reader.reward_staking_token(reward).await?;
    let (boosted_position, stake_balance, stake_total_supply) = futures::try_join!(
        fetch_boosted_position_details(reader, staking_token, reward),
        reader.reward_stake_balance(reward, nft_id),
        reader.reward_stake_total_supply(reward),
    )?;

    let token_assets = scale_assets(
        reward,
        &boosted_position.token_assets,
        stake_balance,
        stake_total_supply,
    )?;

    Ok(RewardPosition {
        reward,
        nft_id,
        network: reader.network(),
        boosted_position,
        token_assets,
    })
}

/// Scale every amount to `floor(amount * stake_balance / stake_total_supply)`.
/// A reward contract with nothing staked has no defined share and is an error.
pub fn scale_assets(
    reward: Address,
    assets: &[Asset],
    stake_balance: U256,
    stake_total_supply: U256,
) -> Result<Vec<Asset>> {
    if stake_total_supply.is_zero() {
        return Err(InfoError::ZeroStakeSupply(reward));
    }
    assets
        .iter()
        .map(|asset| {
            mul_div(asset.amount, stake_balance, stake_total_supply)
                .map(|amount| make_asset(asset.token, amount))
                .ok_or(InfoError::AmountOverflow)
        })
        .collect()
}

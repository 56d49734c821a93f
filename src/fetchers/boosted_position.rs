use alloy::primitives::{Address, U256};
use futures::future::try_join_all;
use tracing::debug;

use super::require_contracts;
use crate::chain::ContractName;
use crate::errors::Result;
use crate::reader::ChainReader;
use crate::types::{Asset, BoostedPosition, Window};

/// Build an [`Asset`]. Every fetcher goes through here so the record shape is
/// the same everywhere.
pub fn make_asset(token: Address, amount: U256) -> Asset {
    Asset { token, amount }
}

/// Fetch `user`'s share of every boosted position listed inside `window`,
/// in factory order
pub async fn fetch_all_boosted_position_data_for_user<R>(
    reader: &R,
    user: Address,
    window: Window,
) -> Result<Vec<BoostedPosition>>
where
    R: ChainReader + ?Sized,
{
    require_contracts(
        reader,
        &[ContractName::BoostedPositionFactory, ContractName::BoostedPositionLens],
    )?;
    if window.is_empty() {
        return Ok(Vec::new());
    }

    let boosted_positions = reader.boosted_position_addresses(window).await?;
    debug!(
        network = %reader.network(),
        %user,
        count = boosted_positions.len(),
        "Fetched boosted position addresses"
    );

    try_join_all(
        boosted_positions
            .into_iter()
            .map(|boosted_position| fetch_boosted_position_details(reader, boosted_position, user)),
    )
    .await
}

/// Token amounts `holder` owns in one boosted position
pub async fn fetch_boosted_position_details<R>(
    reader: &R,
    boosted_position: Address,
    holder: Address,
) -> Result<BoostedPosition>
where
    R: ChainReader + ?Sized,
{
    require_contracts(reader, &[ContractName::BoostedPositionLens])?;
    let info = reader
        .boosted_position_user_information(boosted_position, holder)
        .await?;

    Ok(BoostedPosition {
        boosted_position,
        network: reader.network(),
        token_assets: vec![
            make_asset(info.token_a, info.user_amount_a),
            make_asset(info.token_b, info.user_amount_b),
        ],
    })
}

use alloy::primitives::{Address, U256};
use futures::future::try_join_all;
use tracing::debug;

use super::boosted_position::make_asset;
use super::require_contracts;
use crate::chain::ContractName;
use crate::errors::Result;
use crate::reader::ChainReader;
use crate::types::Position;

/// Only the first bin group of a position is read
const BIN_INDEX: U256 = U256::ZERO;

/// Fetch every position nft held by `owner`, in the order the position
/// contract enumerates them
pub async fn fetch_all_position_nft_id_data_for_user<R>(
    reader: &R,
    owner: Address,
) -> Result<Vec<Position>>
where
    R: ChainReader + ?Sized,
{
    require_contracts(reader, &[ContractName::Position])?;
    let nft_ids = reader.position_ids_of_owner(owner).await?;
    debug!(network = %reader.network(), %owner, count = nft_ids.len(), "Fetched position ids");

    try_join_all(
        nft_ids
            .into_iter()
            .map(|nft_id| fetch_position_details(reader, nft_id)),
    )
    .await
}

/// Read one position nft and the tokens of the pool it sits in
pub async fn fetch_position_details<R>(reader: &R, nft_id: U256) -> Result<Position>
where
    R: ChainReader + ?Sized,
{
    require_contracts(reader, &[ContractName::Position])?;
    let info = reader.position_information(nft_id, BIN_INDEX).await?;
    let (token_a, token_b) = reader.pool_tokens(info.pool).await?;

    Ok(Position {
        nft_id,
        network: reader.network(),
        pool: info.pool,
        token_assets: vec![
            make_asset(token_a, info.amount_a),
            make_asset(token_b, info.amount_b),
        ],
    })
}

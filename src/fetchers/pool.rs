use alloy::primitives::{Address, U256};
use futures::future::try_join_all;
use tracing::{debug, info};

use super::{mul_div, require_contracts};
use crate::chain::ContractName;
use crate::errors::{InfoError, Result};
use crate::reader::ChainReader;
use crate::types::{Pool, Window};

/// Fixed point scale of the lens sqrt price
pub const PRICE_SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Fetch every pool the factory lists inside `window`, in factory order.
/// [`crate::POOL_WINDOW`] is the small default listing.
pub async fn fetch_all_pools<R>(reader: &R, window: Window) -> Result<Vec<Pool>>
where
    R: ChainReader + ?Sized,
{
    require_contracts(reader, &[ContractName::Factory, ContractName::PoolLens])?;
    if window.is_empty() {
        return Ok(Vec::new());
    }

    let addresses = reader.pool_addresses(window).await?;
    debug!(network = %reader.network(), count = addresses.len(), "Fetched pool addresses");

    let pools = try_join_all(
        addresses
            .into_iter()
            .map(|pool| fetch_pool_details(reader, pool)),
    )
    .await?;

    info!(network = %reader.network(), count = pools.len(), "Fetched pools");
    Ok(pools)
}

/// Read one pool: a single multicall batch for the pool itself plus the lens
/// sqrt price, which the spot price is derived from.
pub async fn fetch_pool_details<R>(reader: &R, pool: Address) -> Result<Pool>
where
    R: ChainReader + ?Sized,
{
    require_contracts(reader, &[ContractName::PoolLens])?;
    let (snapshot, sqrt_price) =
        futures::try_join!(reader.pool_snapshot(pool), reader.pool_sqrt_price(pool))?;
    let price = spot_price(sqrt_price)?;

    debug!(%pool, %sqrt_price, %price, "Fetched pool details");
    Ok(Pool {
        address: pool,
        token_a: snapshot.token_a,
        token_b: snapshot.token_b,
        tick_spacing: snapshot.tick_spacing,
        lookback: snapshot.lookback,
        fee_a_in: snapshot.fee_a_in,
        fee_b_in: snapshot.fee_b_in,
        state: snapshot.state,
        current_twa: snapshot.current_twa,
        sqrt_price,
        price,
    })
}

/// `floor(sqrt_price^2 / 1e18)`, squared before dividing so nothing is lost
pub fn spot_price(sqrt_price: U256) -> Result<U256> {
    mul_div(sqrt_price, sqrt_price, PRICE_SCALE).ok_or(InfoError::PriceOverflow(sqrt_price))
}

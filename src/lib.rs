//! Read only views of Maverick V2 protocol state
//!
//! Build an [`RpcReader`] for a network, then hand it to the fetchers to list
//! pools, a user's positions, boosted positions, reward positions and voting
//! escrow lockups.
//!
//! ```no_run
//! use maverick_info::{fetch_all_pools, Network, RpcReader, POOL_WINDOW};
//!
//! # async fn run() -> maverick_info::Result<()> {
//! let reader = RpcReader::builder().network(Network::Base).concurrency(8).build()?;
//! let pools = fetch_all_pools(&reader, POOL_WINDOW).await?;
//! # Ok(())
//! # }
//! ```

pub use builder::{ReaderBuilder, DEFAULT_CONCURRENCY};
pub use chain::{ContractName, ContractTable, Network, NetworkConfig};
pub use errors::{InfoError, Result};
pub use fetchers::boosted_position::{
    fetch_all_boosted_position_data_for_user, fetch_boosted_position_details, make_asset,
};
pub use fetchers::pool::{fetch_all_pools, fetch_pool_details, spot_price, PRICE_SCALE};
pub use fetchers::position::{fetch_all_position_nft_id_data_for_user, fetch_position_details};
pub use fetchers::reward_position::{
    fetch_all_reward_data_for_user, fetch_reward_position_details,
    fetch_reward_position_nft_id_data_for_user, scale_assets,
};
pub use fetchers::voting_escrow::{
    default_voting_escrow, fetch_total_voting_escrow_assets, summarize_lockups,
};
pub use reader::{
    BoostedPositionUserInformation, ChainReader, Lockup, PoolSnapshot, PositionInformation,
};
pub use rpc::RpcReader;
pub use types::*;

mod builder;
mod chain;
mod errors;
mod fetchers;
pub mod onchain;
mod reader;
mod rpc;
mod types;

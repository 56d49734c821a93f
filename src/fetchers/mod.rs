//! Domain fetchers
//!
//! Each fetcher enumerates entities through a factory or owner lookup, then reads
//! every entity concurrently and reshapes the results into the records in
//! [`crate::types`]. A fan out is all or nothing: the first failed read fails
//! the whole call and the remaining reads are dropped.
//!
//! Enumeration and the per entity reads are separate calls. Unless the reader is
//! pinned to a block, state can change between them (a position can be
//! transferred, a lockup withdrawn) so results are a best effort view rather
//! than a single point in time.

use alloy::primitives::aliases::U512;
use alloy::primitives::U256;

use crate::chain::ContractName;
use crate::errors::Result;
use crate::reader::ChainReader;

pub mod boosted_position;
pub mod pool;
pub mod position;
pub mod reward_position;
pub mod voting_escrow;

/// Fail on the first of `contracts` the reader has no address for
pub(crate) fn require_contracts<R>(reader: &R, contracts: &[ContractName]) -> Result<()>
where
    R: ChainReader + ?Sized,
{
    contracts
        .iter()
        .try_for_each(|contract| reader.require_contract(*contract).map(|_| ()))
}

/// Narrow a 512 bit intermediate back into 256 bits
pub(crate) fn narrow(value: U512) -> Option<U256> {
    (value <= U512::from(U256::MAX)).then(|| value.to::<U256>())
}

/// `floor(a * b / denominator)` with a 512 bit intermediate product.
/// `None` on a zero denominator or a result wider than 256 bits.
pub(crate) fn mul_div(a: U256, b: U256, denominator: U256) -> Option<U256> {
    if denominator.is_zero() {
        return None;
    }
    let product = U512::from(a) * U512::from(b);
    narrow(product / U512::from(denominator))
}

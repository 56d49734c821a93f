use alloy::primitives::{Address, U256};
use tracing::debug;

use super::boosted_position::make_asset;
use super::require_contracts;
use crate::chain::{ContractName, Network};
use crate::errors::{InfoError, Result};
use crate::reader::{ChainReader, Lockup};
use crate::types::{LockupInfo, VeLockupInfo, Window};

/// The network's v2 vote escrow, for callers that do not name one
pub fn default_voting_escrow(network: Network) -> Result<Address> {
    network
        .contracts()
        .get(ContractName::VotingEscrow)
        .ok_or(InfoError::MissingContract {
            network,
            contract: ContractName::VotingEscrow,
        })
}

/// Sum `user`'s lockups inside `window` of a voting escrow
pub async fn fetch_total_voting_escrow_assets<R>(
    reader: &R,
    user: Address,
    voting_escrow: Address,
    window: Window,
) -> Result<VeLockupInfo>
where
    R: ChainReader + ?Sized,
{
    require_contracts(reader, &[ContractName::VotingEscrowLens])?;
    let token = reader.voting_escrow_base_token(voting_escrow).await?;
    let lockups = if window.is_empty() {
        Vec::new()
    } else {
        reader
            .voting_escrow_lockups(voting_escrow, user, window)
            .await?
    };
    debug!(%voting_escrow, %user, count = lockups.len(), "Fetched lockups");

    let (total, lockups) = summarize_lockups(token, &lockups)?;
    Ok(VeLockupInfo {
        voting_escrow,
        network: reader.network(),
        total_token_assets: make_asset(token, total),
        lockups,
    })
}

/// Itemize lockups by their position in `lockups` and sum them exactly
pub fn summarize_lockups(token: Address, lockups: &[Lockup]) -> Result<(U256, Vec<LockupInfo>)> {
    let mut total = U256::ZERO;
    let mut infos = Vec::with_capacity(lockups.len());
    for (lockup_id, lockup) in lockups.iter().enumerate() {
        total = total
            .checked_add(lockup.amount)
            .ok_or(InfoError::AmountOverflow)?;
        infos.push(LockupInfo {
            lockup_id,
            token_assets: make_asset(token, lockup.amount),
            end: lockup.end,
        });
    }
    Ok((total, infos))
}

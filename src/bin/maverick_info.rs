//! Maverick Info
//!
//! Reads pools, positions, boosted positions, reward positions and voting
//! escrow lockups from a network and prints them as json.
use alloy::primitives::Address;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use maverick_info::{
    default_voting_escrow, fetch_all_boosted_position_data_for_user, fetch_all_pools,
    fetch_all_position_nft_id_data_for_user, fetch_all_reward_data_for_user,
    fetch_total_voting_escrow_assets, Network, RpcReader, Window, DEFAULT_CONCURRENCY,
    POOL_WINDOW,
};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "maverick-info", about = "Read only views of Maverick V2 state")]
struct Cli {
    /// Network name or chain id
    #[arg(long, env = "MAVERICK_NETWORK", default_value = "base")]
    network: Network,

    /// Rpc endpoint, defaults to MAVERICK_RPC_<NETWORK> or a public endpoint
    #[arg(long)]
    rpc_url: Option<String>,

    /// Maximum reads in flight
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Pin every read to this block number
    #[arg(long, conflicts_with = "pin_latest")]
    block: Option<u64>,

    /// Pin every read to the current head
    #[arg(long)]
    pin_latest: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List pools from the factory
    Pools(WindowArgs),
    /// Position nfts held by an address
    Positions { user: Address },
    /// Share of every boosted position held by an address
    Boosted {
        user: Address,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Staked reward positions of an address, grouped by reward contract
    Rewards {
        user: Address,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Voting escrow lockups of an address
    Ve {
        user: Address,
        /// Voting escrow contract, defaults to the network's veMAV
        #[arg(long)]
        voting_escrow: Option<Address>,
        #[command(flatten)]
        window: WindowArgs,
    },
}

#[derive(Args)]
struct WindowArgs {
    /// First index of the enumeration window
    #[arg(long)]
    start: Option<u64>,
    /// End of the enumeration window, exclusive
    #[arg(long)]
    end: Option<u64>,
}

impl WindowArgs {
    fn or(&self, default: Window) -> Window {
        Window::new(
            self.start.unwrap_or(default.start),
            self.end.unwrap_or(default.end),
        )
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,alloy_transport_http=off,alloy_rpc_client=off,hyper_util=off,reqwest=off"))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();

    let mut builder = RpcReader::builder()
        .network(cli.network)
        .concurrency(cli.concurrency);
    if let Some(rpc_url) = cli.rpc_url {
        builder = builder.rpc_url(rpc_url);
    }
    if let Some(block) = cli.block {
        builder = builder.at_block(block);
    }
    let mut reader = builder.build().context("Failed to configure reader")?;
    if cli.pin_latest {
        reader = reader.pin_latest().await.context("Failed to read chain head")?;
    }

    match cli.command {
        Command::Pools(window) => {
            let pools = fetch_all_pools(&reader, window.or(POOL_WINDOW))
                .await
                .context("Failed to fetch pools")?;
            print_json(&pools)
        }
        Command::Positions { user } => {
            let positions = fetch_all_position_nft_id_data_for_user(&reader, user)
                .await
                .context("Failed to fetch positions")?;
            print_json(&positions)
        }
        Command::Boosted { user, window } => {
            let boosted = fetch_all_boosted_position_data_for_user(&reader, user, window.or(Window::default()))
                .await
                .context("Failed to fetch boosted positions")?;
            print_json(&boosted)
        }
        Command::Rewards { user, window } => {
            let rewards = fetch_all_reward_data_for_user(&reader, user, window.or(Window::default()))
                .await
                .context("Failed to fetch reward positions")?;
            print_json(&rewards)
        }
        Command::Ve {
            user,
            voting_escrow,
            window,
        } => {
            let voting_escrow = match voting_escrow {
                Some(voting_escrow) => voting_escrow,
                None => default_voting_escrow(cli.network)?,
            };
            let lockups = fetch_total_voting_escrow_assets(&reader, user, voting_escrow, window.or(Window::default()))
                .await
                .context("Failed to fetch voting escrow lockups")?;
            print_json(&lockups)
        }
    }
}

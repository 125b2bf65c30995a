use anyhow::Context;
use clap::{Parser, Subcommand};
use raydium_swap_core::address::{parse_address, parse_addresses};
use raydium_swap_core::{AmmSwapClient, ClientConfig, ParsedPool, PoolDirectory};
use solana_client::nonblocking::rpc_client::RpcClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Read-only inspection of Raydium pools and token accounts.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look a pool up in the directory and print its vault reserves.
    Pool { id: String },
    /// Show which of the owner's token accounts exist.
    Resolve {
        owner: String,
        #[arg(required = true)]
        mints: Vec<String>,
    },
    /// Print the balance of every address.
    Balances {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("Failed to load config")?;
    let rpc = RpcClient::new(config.rpc_url.clone());
    let client = AmmSwapClient::new(&rpc, &config);

    match cli.command {
        Command::Pool { id } => {
            let pool = PoolDirectory::new(&config.pools_url)
                .find_pool_by_id(&id)
                .await?;
            let pool = ParsedPool::try_from(&pool)?;
            let reserves = client
                .pool_reserves(&pool)
                .await
                .context("Error fetching rpc pool info")?;
            info!("Pool {:?}", pool);
            println!(
                "base {} reserve {}\nquote {} reserve {}",
                pool.base_mint, reserves.base_reserve, pool.quote_mint, reserves.quote_reserve
            );
        }
        Command::Resolve { owner, mints } => {
            let owner = parse_address(&owner)?;
            let mints = parse_addresses(mints.as_slice())?;
            let resolved = client.resolve_token_accounts(&owner, &mints).await?;
            for (mint, account) in &resolved.existing {
                println!("{mint} {account} existing");
            }
            for (mint, account) in &resolved.missing {
                println!("{mint} {account} missing");
            }
        }
        Command::Balances { addresses } => {
            let addresses = parse_addresses(addresses.as_slice())?;
            let balances = client.token_accounts_balance(&addresses).await?;
            for address in &addresses {
                if let Some(balance) = balances.get(address) {
                    println!("{address} {balance}");
                }
            }
        }
    }
    Ok(())
}

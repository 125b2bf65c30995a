//! Account resolution and transaction orchestration for Raydium AMM swaps on Solana.
//!
//! This crate provides:
//! - Resolution of an owner's token accounts for a set of mints (`AccountResolver`).
//! - Batched balance reads for token and native accounts (`BalanceReader`).
//! - Transaction assembly and signing from opaque instructions (`TransactionBuilder`).
//! - Submission with optional finalized confirmation (`Executor`).
//! - Retrieval of the Raydium pool directory (`PoolDirectory`).
//!
//! # Examples
//!
//! ```no_run
//! use raydium_swap_core::{AmmSwapClient, ClientConfig};
//! use solana_client::nonblocking::rpc_client::RpcClient;
//! # async fn run(owner: solana_sdk::pubkey::Pubkey, mints: Vec<solana_sdk::pubkey::Pubkey>) -> raydium_swap_core::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let rpc = RpcClient::new(config.rpc_url.clone());
//! let client = AmmSwapClient::new(&rpc, &config);
//! let resolved = client.resolve_token_accounts(&owner, &mints).await?;
//! println!("{} token accounts must be created", resolved.missing.len());
//! # Ok(())
//! # }
//! ```
pub mod address;
pub mod balance;
pub mod client;
pub mod config;
pub mod consts;
pub mod error;
pub mod executor;
pub mod interface;
pub mod raydium;
pub mod resolver;
pub mod rpc;
pub mod token;
pub mod transaction;

pub use address::parse_address;
pub use balance::BalanceReader;
pub use client::{AmmSwapClient, PoolReserves};
pub use config::{ClientConfig, KnownAddresses};
pub use error::{Result, SwapError};
pub use executor::{Executor, PubsubConfirmer, SignatureConfirmer};
pub use interface::{ParsedPool, Pool, PoolList};
pub use raydium::PoolDirectory;
pub use resolver::{AccountResolver, ResolvedAccounts, TokenAccountInfo};
pub use rpc::{AccountRecord, LedgerRpc};
pub use token::{TokenInfo, unpack_token_account};
pub use transaction::TransactionBuilder;

//! Client configuration and the table of well-known addresses.

use crate::consts::{
    ASSOCIATED_TOKEN_PROGRAM, AMM_V4, DEFAULT_CONFIRM_TIMEOUT_SECS, MAINNET_RPC_URL, NATIVE_SOL,
    POOLS_URL, SOL_MINT, TOKEN_PROGRAM,
};
use crate::error::{Result, SwapError};
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::time::Duration;

/// Program IDs and reserved mints the pipeline depends on.
///
/// Built once at startup and passed by reference; nothing reads these from globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownAddresses {
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
    /// Mint whose "token account" is the owner wallet itself.
    pub native_mint: Pubkey,
    pub wrapped_sol_mint: Pubkey,
    pub amm_v4_program: Pubkey,
}

impl Default for KnownAddresses {
    fn default() -> Self {
        Self {
            token_program: Pubkey::from_str_const(TOKEN_PROGRAM),
            associated_token_program: Pubkey::from_str_const(ASSOCIATED_TOKEN_PROGRAM),
            native_mint: Pubkey::from_str_const(NATIVE_SOL),
            wrapped_sol_mint: Pubkey::from_str_const(SOL_MINT),
            amm_v4_program: Pubkey::from_str_const(AMM_V4),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rpc_url: String,
    /// Websocket endpoint for signature subscriptions.
    pub ws_url: String,
    pub pools_url: String,
    pub confirm_timeout: Duration,
    /// Skip the node's simulation before accepting a transaction.
    pub skip_preflight: bool,
    pub addresses: KnownAddresses,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(MAINNET_RPC_URL)
    }
}

impl ClientConfig {
    pub fn new(rpc_url: &str) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            ws_url: ws_url_from_rpc(rpc_url),
            pools_url: POOLS_URL.to_string(),
            confirm_timeout: Duration::from_secs(DEFAULT_CONFIRM_TIMEOUT_SECS),
            skip_preflight: false,
            addresses: KnownAddresses::default(),
        }
    }

    /// Loads the config from the process environment (and `.env`, if present).
    ///
    /// Recognised variables: `RPC_URL`, `WS_URL`, `POOLS_URL`,
    /// `CONFIRM_TIMEOUT_SECS`, `SKIP_PREFLIGHT`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let rpc_url = lookup("RPC_URL").unwrap_or_else(|| MAINNET_RPC_URL.to_string());
        let mut config = Self::new(&rpc_url);
        if let Some(ws_url) = lookup("WS_URL") {
            config.ws_url = ws_url;
        }
        if let Some(pools_url) = lookup("POOLS_URL") {
            config.pools_url = pools_url;
        }
        if let Some(secs) = lookup("CONFIRM_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| SwapError::Config(format!("CONFIRM_TIMEOUT_SECS={secs:?}")))?;
            config.confirm_timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = lookup("SKIP_PREFLIGHT") {
            config.skip_preflight = flag
                .parse()
                .map_err(|_| SwapError::Config(format!("SKIP_PREFLIGHT={flag:?}")))?;
        }
        Ok(config)
    }
}

/// `https://host` -> `wss://host`, `http://host` -> `ws://host`.
fn ws_url_from_rpc(rpc_url: &str) -> String {
    if let Some(rest) = rpc_url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = rpc_url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        rpc_url.to_string()
    }
}

//! Common constants used across the swap pipeline.

/// The native SOL "mint". Token accounts for it resolve to the owner wallet itself.
pub const NATIVE_SOL: &str = "11111111111111111111111111111111";

/// The Solana native token mint (wrapped SOL).
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// SPL Token program.
pub const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// SPL Associated Token Account program.
pub const ASSOCIATED_TOKEN_PROGRAM: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

/// Program ID for Raydium AMM V4.
pub const AMM_V4: &str = "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8";

/// Size of an SPL token account without extensions.
pub const TOKEN_ACCOUNT_LEN: usize = 165;

/// Raydium liquidity pool directory.
pub const POOLS_URL: &str = "https://api.raydium.io/v2/sdk/liquidity/mainnet.json";

/// Default mainnet RPC endpoint.
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Seconds to wait for a finalized notification before giving up.
pub const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 90;

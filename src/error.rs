//! Error taxonomy for the swap pipeline.

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SwapError>;

/// Every failure the pipeline can surface.
///
/// `Network` failures of reads (`resolve`, `read_balances`, pool lookups) are safe to
/// retry. A failed `build` + `submit` must be retried from `build` so a fresh
/// blockhash is used.
#[derive(Error, Debug)]
pub enum SwapError {
    /// Transport or timeout talking to the RPC node, websocket or pool API.
    #[error("network error: {0}")]
    Network(String),

    /// Malformed account payload, JSON body, or a response shaped differently
    /// from the request.
    #[error("decode error: {0}")]
    Decode(String),

    /// A queried account does not exist on the ledger.
    #[error("account {0} does not exist")]
    AccountNotFound(Pubkey),

    /// Pool absent from the directory.
    #[error("pool was not found by id [{0}]")]
    NotFound(String),

    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: String },

    /// A required signer slot has no matching key.
    #[error("signing error: {0}")]
    Signing(String),

    /// The node refused the transaction (preflight simulation, stale blockhash,
    /// insufficient funds). A stale blockhash is only caught here when preflight
    /// runs; with `skip_preflight` it surfaces as `Confirmation` after the timeout.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// Submission succeeded but the confirmation channel failed. The transaction
    /// may or may not have landed; query its status by signature before resending.
    #[error("confirmation of {signature} failed, landed status unknown: {reason}")]
    Confirmation { signature: Signature, reason: String },

    /// The transaction was finalized with an execution error.
    #[error("transaction {signature} failed on chain: {reason}")]
    TransactionFailed { signature: Signature, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl SwapError {
    /// The signature of a transaction that was already submitted, if any.
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            SwapError::Confirmation { signature, .. }
            | SwapError::TransactionFailed { signature, .. } => Some(signature),
            _ => None,
        }
    }

    pub fn is_retryable_read(&self) -> bool {
        matches!(self, SwapError::Network(_))
    }
}

impl From<reqwest::Error> for SwapError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SwapError::Decode(e.to_string())
        } else {
            SwapError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(e: serde_json::Error) -> Self {
        SwapError::Decode(e.to_string())
    }
}

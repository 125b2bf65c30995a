//! The slice of the ledger RPC surface the pipeline consumes.

use crate::error::{Result, SwapError};
use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_client::rpc_request::RpcError;
use solana_commitment_config::{CommitmentConfig, CommitmentLevel};
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;

/// One slot of a batched account lookup. `None` means the account does not exist.
pub type AccountRecord = Option<Account>;

/// Ledger reads and writes, borrowed by every component for the span of one call.
///
/// Implementations must return `get_multiple_accounts` results in request order;
/// callers still verify the length.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    async fn get_multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<AccountRecord>>;

    /// A blockhash at finalized commitment. Never cached.
    async fn get_finalized_blockhash(&self) -> Result<Hash>;

    async fn send_transaction(
        &self,
        transaction: &Transaction,
        skip_preflight: bool,
    ) -> Result<Signature>;
}

#[async_trait]
impl LedgerRpc for RpcClient {
    async fn get_multiple_accounts(&self, addresses: &[Pubkey]) -> Result<Vec<AccountRecord>> {
        RpcClient::get_multiple_accounts(self, addresses)
            .await
            .map_err(classify_read_error)
    }

    async fn get_finalized_blockhash(&self) -> Result<Hash> {
        let (hash, _last_valid_height) = self
            .get_latest_blockhash_with_commitment(CommitmentConfig::finalized())
            .await
            .map_err(classify_read_error)?;
        Ok(hash)
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
        skip_preflight: bool,
    ) -> Result<Signature> {
        let config = RpcSendTransactionConfig {
            skip_preflight,
            preflight_commitment: Some(CommitmentLevel::Finalized),
            ..RpcSendTransactionConfig::default()
        };
        self.send_transaction_with_config(transaction, config)
            .await
            .map_err(classify_send_error)
    }
}

fn classify_read_error(e: ClientError) -> SwapError {
    match e.kind() {
        ClientErrorKind::SerdeJson(_) => SwapError::Decode(e.to_string()),
        _ => SwapError::Network(e.to_string()),
    }
}

/// Node-side refusals become `Rejected`; anything that never got an answer is
/// `Network`.
fn classify_send_error(e: ClientError) -> SwapError {
    match e.kind() {
        ClientErrorKind::TransactionError(_)
        | ClientErrorKind::RpcError(RpcError::RpcResponseError { .. }) => {
            SwapError::Rejected(e.to_string())
        }
        _ => SwapError::Network(e.to_string()),
    }
}

/// Pairs every requested address with its record, or fails if the node answered
/// with a different number of slots.
pub(crate) fn zip_records<'a>(
    requested: &'a [Pubkey],
    records: Vec<AccountRecord>,
) -> Result<impl Iterator<Item = (&'a Pubkey, AccountRecord)>> {
    if records.len() != requested.len() {
        return Err(SwapError::Decode(format!(
            "requested {} accounts, node returned {}",
            requested.len(),
            records.len()
        )));
    }
    Ok(requested.iter().zip(records))
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted in-memory ledger that records every call.
    #[derive(Default)]
    pub struct MockLedger {
        pub accounts: Mutex<HashMap<Pubkey, Account>>,
        pub lookups: Mutex<Vec<Vec<Pubkey>>>,
        /// Drop this many trailing records from every lookup response.
        pub truncate_by: usize,
        pub blockhashes: Mutex<Vec<Hash>>,
        pub blockhash_calls: Mutex<usize>,
        pub fail_blockhash: bool,
        pub send_error: Option<fn() -> SwapError>,
        pub sent: Mutex<Vec<Transaction>>,
    }

    impl MockLedger {
        pub fn with_account(self, address: Pubkey, account: Account) -> Self {
            self.accounts.lock().unwrap().insert(address, account);
            self
        }

        pub fn lookup_count(&self) -> usize {
            self.lookups.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LedgerRpc for MockLedger {
        async fn get_multiple_accounts(
            &self,
            addresses: &[Pubkey],
        ) -> Result<Vec<AccountRecord>> {
            self.lookups.lock().unwrap().push(addresses.to_vec());
            let accounts = self.accounts.lock().unwrap();
            let mut records: Vec<AccountRecord> =
                addresses.iter().map(|a| accounts.get(a).cloned()).collect();
            records.truncate(records.len().saturating_sub(self.truncate_by));
            Ok(records)
        }

        async fn get_finalized_blockhash(&self) -> Result<Hash> {
            let mut calls = self.blockhash_calls.lock().unwrap();
            *calls += 1;
            if self.fail_blockhash {
                return Err(SwapError::Network("connection refused".to_string()));
            }
            let scripted = self.blockhashes.lock().unwrap();
            Ok(scripted
                .get(*calls - 1)
                .copied()
                .unwrap_or_else(|| Hash::new_from_array([*calls as u8; 32])))
        }

        async fn send_transaction(
            &self,
            transaction: &Transaction,
            _skip_preflight: bool,
        ) -> Result<Signature> {
            if let Some(make_error) = self.send_error {
                return Err(make_error());
            }
            self.sent.lock().unwrap().push(transaction.clone());
            Ok(transaction.signatures[0])
        }
    }
}

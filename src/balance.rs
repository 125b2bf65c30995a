//! Batched balance reads for token and native accounts.

use crate::config::KnownAddresses;
use crate::error::{Result, SwapError};
use crate::rpc::{LedgerRpc, zip_records};
use crate::token::unpack_token_account;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use tracing::debug;

/// Reads balances of pools, vaults and wallets in one round trip.
pub struct BalanceReader<'a> {
    addresses: &'a KnownAddresses,
}

impl<'a> BalanceReader<'a> {
    pub fn new(addresses: &'a KnownAddresses) -> Self {
        Self { addresses }
    }

    /// Token-program accounts report their token `amount`; every other account
    /// reports its lamports.
    ///
    /// Duplicate addresses collapse into one entry. Every address must exist.
    ///
    /// # Errors
    /// - `AccountNotFound` for the first address with no account.
    /// - `Decode` on a response length mismatch or a malformed token account.
    pub async fn read_balances<R: LedgerRpc + ?Sized>(
        &self,
        rpc: &R,
        addresses: &[Pubkey],
    ) -> Result<HashMap<Pubkey, u64>> {
        let records = rpc.get_multiple_accounts(addresses).await?;
        let mut balances = HashMap::with_capacity(addresses.len());
        for (address, record) in zip_records(addresses, records)? {
            let account = record.ok_or(SwapError::AccountNotFound(*address))?;
            let balance = if account.owner == self.addresses.token_program {
                unpack_token_account(&account.data)?.amount
            } else {
                account.lamports
            };
            debug!("Address {address}, balance {balance}");
            balances.insert(*address, balance);
        }
        Ok(balances)
    }
}

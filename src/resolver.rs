//! Resolution of an owner's token accounts for a set of mints.

use crate::config::KnownAddresses;
use crate::error::Result;
use crate::rpc::{LedgerRpc, zip_records};
use crate::token::unpack_token_account;
use solana_sdk::pubkey::Pubkey;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A mint paired with the account that holds the owner's balance of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccountInfo {
    pub mint: Pubkey,
    pub account: Pubkey,
}

/// Mint -> account, split by whether the account exists on chain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolvedAccounts {
    pub existing: HashMap<Pubkey, Pubkey>,
    pub missing: HashMap<Pubkey, Pubkey>,
}

impl ResolvedAccounts {
    /// The account for `mint`, whether or not it exists yet.
    pub fn account_for(&self, mint: &Pubkey) -> Option<&Pubkey> {
        self.existing.get(mint).or_else(|| self.missing.get(mint))
    }
}

pub struct AccountResolver<'a> {
    addresses: &'a KnownAddresses,
}

impl<'a> AccountResolver<'a> {
    pub fn new(addresses: &'a KnownAddresses) -> Self {
        Self { addresses }
    }

    /// Associated token account of `owner` for `mint`. The native mint maps to
    /// `owner` itself.
    pub fn derive(&self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        if *mint == self.addresses.native_mint {
            return *owner;
        }
        // The associated token program id is injected, so the spl helper (which
        // hard-codes it) cannot be used.
        let (address, _bump) = Pubkey::find_program_address(
            &[
                owner.as_ref(),
                self.addresses.token_program.as_ref(),
                mint.as_ref(),
            ],
            &self.addresses.associated_token_program,
        );
        address
    }

    /// Resolves every distinct mint in `mints` with a single batched lookup.
    ///
    /// # Errors
    /// - `Network` if the lookup fails.
    /// - `Decode` if the node returns the wrong number of records or an existing
    ///   account is not a token account.
    pub async fn resolve<R: LedgerRpc + ?Sized>(
        &self,
        rpc: &R,
        owner: &Pubkey,
        mints: &[Pubkey],
    ) -> Result<ResolvedAccounts> {
        let mut seen = HashSet::with_capacity(mints.len());
        let infos: Vec<TokenAccountInfo> = mints
            .iter()
            .filter(|mint| seen.insert(**mint))
            .map(|mint| TokenAccountInfo {
                mint: *mint,
                account: self.derive(owner, mint),
            })
            .collect();
        let accounts: Vec<Pubkey> = infos.iter().map(|info| info.account).collect();
        debug!("Resolving {} token accounts for {owner}", accounts.len());

        let records = rpc.get_multiple_accounts(&accounts).await?;

        let mut resolved = ResolvedAccounts::default();
        for (info, (_, record)) in infos.iter().zip(zip_records(&accounts, records)?) {
            let Some(account) = record else {
                debug!("Missing token account {} for mint {}", info.account, info.mint);
                resolved.missing.entry(info.mint).or_insert(info.account);
                continue;
            };
            if info.mint != self.addresses.native_mint {
                unpack_token_account(&account.data)?;
            }
            resolved.existing.entry(info.mint).or_insert(info.account);
        }
        Ok(resolved)
    }
}

use crate::balance::BalanceReader;
use crate::config::ClientConfig;
use crate::error::{Result, SwapError};
use crate::executor::{Executor, PubsubConfirmer, SignatureConfirmer};
use crate::interface::ParsedPool;
use crate::resolver::{AccountResolver, ResolvedAccounts};
use crate::rpc::LedgerRpc;
use crate::token::create_missing_token_accounts;
use crate::transaction::TransactionBuilder;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use std::collections::HashMap;
use tracing::info;

/// On‑chain reserves for a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolReserves {
    pub base_reserve: u64,
    pub quote_reserve: u64,
}

/// Wires the pipeline stages together over a borrowed RPC transport.
pub struct AmmSwapClient<'a, R: LedgerRpc + ?Sized> {
    rpc: &'a R,
    config: &'a ClientConfig,
}

impl<'a, R: LedgerRpc + ?Sized> AmmSwapClient<'a, R> {
    pub fn new(rpc: &'a R, config: &'a ClientConfig) -> Self {
        Self { rpc, config }
    }

    pub async fn resolve_token_accounts(
        &self,
        owner: &Pubkey,
        mints: &[Pubkey],
    ) -> Result<ResolvedAccounts> {
        AccountResolver::new(&self.config.addresses)
            .resolve(self.rpc, owner, mints)
            .await
    }

    /// Instructions creating the owner's missing token accounts, paid by `funding`.
    pub fn create_missing_accounts(
        &self,
        funding: &Pubkey,
        owner: &Pubkey,
        resolved: &ResolvedAccounts,
    ) -> Vec<Instruction> {
        let addresses = &self.config.addresses;
        create_missing_token_accounts(
            funding,
            owner,
            resolved.missing.keys(),
            &addresses.native_mint,
            &addresses.token_program,
        )
    }

    pub async fn token_accounts_balance(
        &self,
        accounts: &[Pubkey],
    ) -> Result<HashMap<Pubkey, u64>> {
        BalanceReader::new(&self.config.addresses)
            .read_balances(self.rpc, accounts)
            .await
    }

    /// Vault balances of `pool`, read in one lookup.
    pub async fn pool_reserves(&self, pool: &ParsedPool) -> Result<PoolReserves> {
        let balances = self.token_accounts_balance(&pool.vaults()).await?;
        let reserve = |vault: &Pubkey| {
            balances
                .get(vault)
                .copied()
                .ok_or(SwapError::AccountNotFound(*vault))
        };
        Ok(PoolReserves {
            base_reserve: reserve(&pool.base_vault)?,
            quote_reserve: reserve(&pool.quote_vault)?,
        })
    }

    /// Builds with a fresh blockhash and submits. The first signer pays fees.
    pub async fn execute_instructions(
        &self,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> Result<Signature> {
        let fee_payer = Self::fee_payer(signers)?;
        let transaction = TransactionBuilder::new()
            .build(self.rpc, signers, &fee_payer, instructions)
            .await?;
        Executor::new(self.config.skip_preflight)
            .submit(self.rpc, &transaction)
            .await
    }

    /// Like [`execute_instructions`](Self::execute_instructions), then waits for
    /// finalization over the configured websocket.
    pub async fn execute_instructions_and_confirm(
        &self,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> Result<Signature> {
        let confirmer = PubsubConfirmer::new(&self.config.ws_url, self.config.confirm_timeout);
        self.execute_instructions_with_confirmer(&confirmer, signers, instructions)
            .await
    }

    pub async fn execute_instructions_with_confirmer<C: SignatureConfirmer + ?Sized>(
        &self,
        confirmer: &C,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> Result<Signature> {
        let fee_payer = Self::fee_payer(signers)?;
        let transaction = TransactionBuilder::new()
            .build(self.rpc, signers, &fee_payer, instructions)
            .await?;
        let signature = Executor::new(self.config.skip_preflight)
            .submit_and_confirm(self.rpc, confirmer, &transaction)
            .await?;
        info!("Executed with Signature {signature}");
        Ok(signature)
    }

    fn fee_payer(signers: &[&Keypair]) -> Result<Pubkey> {
        signers
            .first()
            .map(|payer| payer.pubkey())
            .ok_or_else(|| SwapError::Signing("no signers provided".to_string()))
    }
}

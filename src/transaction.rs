//! Assembly and signing of transactions from opaque instructions.

use crate::error::{Result, SwapError};
use crate::rpc::LedgerRpc;
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct TransactionBuilder;

impl TransactionBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Fetches a finalized blockhash and returns a fully signed transaction.
    ///
    /// The blockhash is fetched on every call; a retry after a failed submit must
    /// call this again.
    ///
    /// # Errors
    /// - `Network` if the blockhash cannot be fetched.
    /// - `Signing` if a required signer has no key in `signers`.
    pub async fn build<R: LedgerRpc + ?Sized>(
        &self,
        rpc: &R,
        signers: &[&Keypair],
        fee_payer: &Pubkey,
        instructions: &[Instruction],
    ) -> Result<Transaction> {
        let recent_blockhash = rpc.get_finalized_blockhash().await?;
        self.build_with_blockhash(signers, fee_payer, instructions, recent_blockhash)
    }

    /// Same as [`build`](Self::build) with a caller-supplied blockhash.
    ///
    /// Instructions keep their order. Each required signer slot is signed by the
    /// first key in `signers` with the same pubkey; keys nobody asked for are
    /// ignored.
    pub fn build_with_blockhash(
        &self,
        signers: &[&Keypair],
        fee_payer: &Pubkey,
        instructions: &[Instruction],
        recent_blockhash: Hash,
    ) -> Result<Transaction> {
        let message = Message::new_with_blockhash(instructions, Some(fee_payer), &recent_blockhash);
        let required = message.header.num_required_signatures as usize;

        let slot_signers = message.account_keys[..required]
            .iter()
            .map(|slot| {
                signers
                    .iter()
                    .find(|keypair| keypair.pubkey() == *slot)
                    .map(|keypair| *keypair as &dyn Signer)
                    .ok_or_else(|| SwapError::Signing(format!("no private key for signer {slot}")))
            })
            .collect::<Result<Vec<&dyn Signer>>>()?;

        let mut transaction = Transaction::new_unsigned(message);
        transaction
            .try_sign(&slot_signers, recent_blockhash)
            .map_err(|e| SwapError::Signing(e.to_string()))?;
        debug!(
            "Built transaction with {} instructions, {} signatures, blockhash {recent_blockhash}",
            instructions.len(),
            transaction.signatures.len()
        );
        Ok(transaction)
    }
}

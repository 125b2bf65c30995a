use crate::consts::TOKEN_ACCOUNT_LEN;
use crate::error::{Result, SwapError};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::Account as TokenAccount;

/// Decodes the base token account state. Trailing extension bytes are ignored.
///
/// Fails with [`SwapError::Decode`] on short payloads, malformed option tags and
/// uninitialized accounts.
pub fn unpack_token_account(data: &[u8]) -> Result<TokenAccount> {
    // Mint accounts are 82 bytes; anything shorter than a token account is the
    // wrong kind of account.
    if data.len() < TOKEN_ACCOUNT_LEN {
        return Err(SwapError::Decode(format!(
            "invalid token account length: expected at least {TOKEN_ACCOUNT_LEN}, got {}",
            data.len()
        )));
    }
    TokenAccount::unpack(&data[..TOKEN_ACCOUNT_LEN])
        .map_err(|e| SwapError::Decode(format!("Failed to decode token account: {e}")))
}

/// Idempotent create-ATA instructions for accounts the resolver reported missing.
///
/// `native_mint` is skipped: its "account" is the owner wallet.
pub fn create_missing_token_accounts<'a>(
    funding: &Pubkey,
    owner: &Pubkey,
    missing_mints: impl IntoIterator<Item = &'a Pubkey>,
    native_mint: &Pubkey,
    token_program: &Pubkey,
) -> Vec<Instruction> {
    missing_mints
        .into_iter()
        .filter(|mint| *mint != native_mint)
        .map(|mint| {
            spl_associated_token_account::instruction::create_associated_token_account_idempotent(
                funding,
                owner,
                mint,
                token_program,
            )
        })
        .collect()
}

/// Symbol and decimals of a token, for converting between UI and raw amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub symbol: String,
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(symbol: &str, decimals: u8) -> Self {
        Self {
            symbol: symbol.to_string(),
            decimals,
        }
    }

    pub fn pow(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }

    pub fn to_float(&self, amount: u64) -> f64 {
        amount as f64 / self.pow()
    }

    /// Truncates toward zero; negative input saturates to 0.
    pub fn from_float(&self, amount: f64) -> u64 {
        (amount * self.pow()) as u64
    }
}

#[cfg(test)]
pub(crate) fn token_account_bytes(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
    data[..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    // initialized
    data[108] = 1;
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use spl_token::state::AccountState;

    #[test]
    fn unpacks_token_account() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let account = unpack_token_account(&token_account_bytes(&mint, &owner, 42)).unwrap();
        assert_eq!(account.mint, mint);
        assert_eq!(account.owner, owner);
        assert_eq!(account.amount, 42);
        assert_eq!(account.state, AccountState::Initialized);
    }

    #[test]
    fn ignores_extension_bytes() {
        let mut data = token_account_bytes(&Pubkey::new_unique(), &Pubkey::new_unique(), 7);
        data.extend_from_slice(&[2, 0, 0, 0]);
        assert_eq!(unpack_token_account(&data).unwrap().amount, 7);
    }

    #[test]
    fn rejects_mint_sized_payload() {
        let err = unpack_token_account(&[0u8; 82]).unwrap_err();
        assert!(matches!(err, SwapError::Decode(_)));
    }

    #[test]
    fn rejects_malformed_delegate_tag() {
        let mut data = token_account_bytes(&Pubkey::new_unique(), &Pubkey::new_unique(), 1);
        data[72] = 7;
        let err = unpack_token_account(&data).unwrap_err();
        assert!(matches!(err, SwapError::Decode(_)));
    }

    #[test]
    fn rejects_uninitialized_account() {
        let err = unpack_token_account(&[0u8; TOKEN_ACCOUNT_LEN]).unwrap_err();
        assert!(matches!(err, SwapError::Decode(_)));
    }

    #[test]
    fn skips_native_mint_when_creating_accounts() {
        let payer = Pubkey::new_unique();
        let native = Pubkey::new_from_array([0; 32]);
        let mint = Pubkey::new_unique();
        let ixs = create_missing_token_accounts(
            &payer,
            &payer,
            [&native, &mint],
            &native,
            &spl_token::id(),
        );
        assert_eq!(ixs.len(), 1);
        assert_eq!(ixs[0].accounts[3].pubkey, mint);
    }

    #[test]
    fn converts_amounts() {
        let usdc = TokenInfo::new("USDC", 6);
        assert_eq!(usdc.to_float(1_500_000), 1.5);
        assert_eq!(usdc.from_float(2.25), 2_250_000);
        assert_eq!(usdc.from_float(-1.0), 0);
    }
}

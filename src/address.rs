//! Parsing of textual base58 addresses.

use crate::error::{Result, SwapError};
use solana_sdk::pubkey::Pubkey;

/// Decodes a base58 address into a 32-byte `Pubkey`.
///
/// # Errors
/// `SwapError::InvalidAddress` when the text is not base58 or does not decode to
/// exactly 32 bytes.
pub fn parse_address(input: &str) -> Result<Pubkey> {
    let invalid = |reason: String| SwapError::InvalidAddress {
        input: input.to_string(),
        reason,
    };
    let bytes = bs58::decode(input.trim())
        .into_vec()
        .map_err(|e| invalid(e.to_string()))?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|b: Vec<u8>| invalid(format!("expected 32 bytes, got {}", b.len())))?;
    Ok(Pubkey::new_from_array(bytes))
}

pub fn parse_addresses<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Pubkey>> {
    inputs.iter().map(|s| parse_address(s.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{AMM_V4, NATIVE_SOL};

    #[test]
    fn parses_well_known_addresses() {
        assert_eq!(parse_address(NATIVE_SOL).unwrap(), Pubkey::new_from_array([0; 32]));
        let amm = parse_address(AMM_V4).unwrap();
        assert_eq!(amm.to_string(), AMM_V4);
    }

    #[test]
    fn round_trips_display() {
        let key = Pubkey::new_unique();
        assert_eq!(parse_address(&key.to_string()).unwrap(), key);
    }

    #[test]
    fn rejects_bad_alphabet_and_length() {
        assert!(matches!(
            parse_address("0OIl"),
            Err(SwapError::InvalidAddress { .. })
        ));
        // valid base58, but only a few bytes long
        assert!(matches!(
            parse_address("abc"),
            Err(SwapError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn parse_addresses_fails_on_first_bad_entry() {
        let inputs = [AMM_V4, "not-an-address"];
        assert!(parse_addresses(&inputs).is_err());
    }
}

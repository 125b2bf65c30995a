//! Types for deserializing the Raydium liquidity pool directory.

use crate::address::parse_address;
use crate::error::{Result, SwapError};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;

/// Response from `/v2/sdk/liquidity/mainnet.json`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PoolList {
    #[serde(default)]
    pub name: String,
    pub official: Vec<Pool>,
    pub un_official: Vec<Pool>,
}

impl PoolList {
    /// Official pools first, then unofficial ones.
    pub fn iter(&self) -> impl Iterator<Item = &Pool> {
        self.official.iter().chain(self.un_official.iter())
    }

    pub fn find_by_id(&self, id: &str) -> Result<&Pool> {
        self.iter()
            .find(|pool| pool.id == id)
            .ok_or_else(|| SwapError::NotFound(id.to_string()))
    }

    /// Every pool with its addresses parsed. One malformed address fails the call.
    pub fn parsed(&self) -> Result<Vec<ParsedPool>> {
        self.iter().map(ParsedPool::try_from).collect()
    }
}

/// A pool as published, with addresses as base58 strings.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub base_mint: String,
    pub quote_mint: String,
    pub lp_mint: String,
    pub base_decimals: u8,
    pub quote_decimals: u8,
    pub lp_decimals: u8,
    pub version: u32,
    pub program_id: String,
    pub authority: String,
    pub open_orders: String,
    pub target_orders: String,
    pub base_vault: String,
    pub quote_vault: String,
    pub withdraw_queue: String,
    pub lp_vault: String,
    pub market_version: u32,
    pub market_program_id: String,
    pub market_id: String,
    pub market_authority: String,
    pub market_base_vault: String,
    pub market_quote_vault: String,
    pub market_bids: String,
    pub market_asks: String,
    pub market_event_queue: String,
    #[serde(default)]
    pub lookup_table_account: String,
}

/// On‑chain account addresses needed for swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedPool {
    pub id: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub base_decimals: u8,
    pub quote_decimals: u8,
    pub lp_decimals: u8,
    pub version: u32,
    pub program_id: Pubkey,
    pub authority: Pubkey,
    pub open_orders: Pubkey,
    pub target_orders: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub withdraw_queue: Pubkey,
    pub lp_vault: Pubkey,
    pub market_version: u32,
    pub market_program_id: Pubkey,
    pub market_id: Pubkey,
    pub market_authority: Pubkey,
    pub market_base_vault: Pubkey,
    pub market_quote_vault: Pubkey,
    pub market_bids: Pubkey,
    pub market_asks: Pubkey,
    pub market_event_queue: Pubkey,
    /// `None` for pools published without a lookup table.
    pub lookup_table_account: Option<Pubkey>,
}

impl ParsedPool {
    /// The two vaults whose balances are the pool reserves.
    pub fn vaults(&self) -> [Pubkey; 2] {
        [self.base_vault, self.quote_vault]
    }
}

impl TryFrom<&Pool> for ParsedPool {
    type Error = SwapError;

    fn try_from(pool: &Pool) -> Result<Self> {
        let lookup_table_account = match pool.lookup_table_account.as_str() {
            "" => None,
            address => Some(parse_address(address)?),
        };
        Ok(Self {
            id: parse_address(&pool.id)?,
            base_mint: parse_address(&pool.base_mint)?,
            quote_mint: parse_address(&pool.quote_mint)?,
            lp_mint: parse_address(&pool.lp_mint)?,
            base_decimals: pool.base_decimals,
            quote_decimals: pool.quote_decimals,
            lp_decimals: pool.lp_decimals,
            version: pool.version,
            program_id: parse_address(&pool.program_id)?,
            authority: parse_address(&pool.authority)?,
            open_orders: parse_address(&pool.open_orders)?,
            target_orders: parse_address(&pool.target_orders)?,
            base_vault: parse_address(&pool.base_vault)?,
            quote_vault: parse_address(&pool.quote_vault)?,
            withdraw_queue: parse_address(&pool.withdraw_queue)?,
            lp_vault: parse_address(&pool.lp_vault)?,
            market_version: pool.market_version,
            market_program_id: parse_address(&pool.market_program_id)?,
            market_id: parse_address(&pool.market_id)?,
            market_authority: parse_address(&pool.market_authority)?,
            market_base_vault: parse_address(&pool.market_base_vault)?,
            market_quote_vault: parse_address(&pool.market_quote_vault)?,
            market_bids: parse_address(&pool.market_bids)?,
            market_asks: parse_address(&pool.market_asks)?,
            market_event_queue: parse_address(&pool.market_event_queue)?,
            lookup_table_account,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_pool(id: &Pubkey) -> Pool {
    let key = || Pubkey::new_unique().to_string();
    Pool {
        id: id.to_string(),
        base_mint: crate::consts::SOL_MINT.to_string(),
        quote_mint: key(),
        lp_mint: key(),
        base_decimals: 9,
        quote_decimals: 6,
        lp_decimals: 9,
        version: 4,
        program_id: crate::consts::AMM_V4.to_string(),
        authority: key(),
        open_orders: key(),
        target_orders: key(),
        base_vault: key(),
        quote_vault: key(),
        withdraw_queue: crate::consts::NATIVE_SOL.to_string(),
        lp_vault: crate::consts::NATIVE_SOL.to_string(),
        market_version: 4,
        market_program_id: key(),
        market_id: key(),
        market_authority: key(),
        market_base_vault: key(),
        market_quote_vault: key(),
        market_bids: key(),
        market_asks: key(),
        market_event_queue: key(),
        lookup_table_account: key(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_directory_json() {
        let id = Pubkey::new_unique();
        let pool = sample_pool(&id);
        let body = format!(
            r#"{{"name":"Raydium Mainnet Liquidity Pools","official":[{{
                "id":"{}","baseMint":"{}","quoteMint":"{}","lpMint":"{}",
                "baseDecimals":9,"quoteDecimals":6,"lpDecimals":9,"version":4,
                "programId":"{}","authority":"{}","openOrders":"{}","targetOrders":"{}",
                "baseVault":"{}","quoteVault":"{}","withdrawQueue":"{}","lpVault":"{}",
                "marketVersion":4,"marketProgramId":"{}","marketId":"{}",
                "marketAuthority":"{}","marketBaseVault":"{}","marketQuoteVault":"{}",
                "marketBids":"{}","marketAsks":"{}","marketEventQueue":"{}",
                "lookupTableAccount":"{}"}}],"unOfficial":[]}}"#,
            pool.id,
            pool.base_mint,
            pool.quote_mint,
            pool.lp_mint,
            pool.program_id,
            pool.authority,
            pool.open_orders,
            pool.target_orders,
            pool.base_vault,
            pool.quote_vault,
            pool.withdraw_queue,
            pool.lp_vault,
            pool.market_program_id,
            pool.market_id,
            pool.market_authority,
            pool.market_base_vault,
            pool.market_quote_vault,
            pool.market_bids,
            pool.market_asks,
            pool.market_event_queue,
            pool.lookup_table_account,
        );
        let list: PoolList = serde_json::from_str(&body).unwrap();
        assert_eq!(list.official, vec![pool]);
        assert!(list.un_official.is_empty());
    }

    #[test]
    fn finds_unofficial_pools_too() {
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let list = PoolList {
            name: String::new(),
            official: vec![sample_pool(&a)],
            un_official: vec![sample_pool(&b)],
        };
        assert_eq!(list.find_by_id(&b.to_string()).unwrap().id, b.to_string());
        let missing = Pubkey::new_unique().to_string();
        assert!(matches!(list.find_by_id(&missing), Err(SwapError::NotFound(id)) if id == missing));
    }

    #[test]
    fn parses_every_address() {
        let id = Pubkey::new_unique();
        let mut pool = sample_pool(&id);
        pool.lookup_table_account = String::new();
        let parsed = ParsedPool::try_from(&pool).unwrap();
        assert_eq!(parsed.id, id);
        assert_eq!(parsed.program_id.to_string(), crate::consts::AMM_V4);
        assert_eq!(parsed.lookup_table_account, None);
        assert_eq!(parsed.vaults()[1].to_string(), pool.quote_vault);
    }

    #[test]
    fn one_bad_address_fails_the_list() {
        let mut bad = sample_pool(&Pubkey::new_unique());
        bad.market_bids = "bids".to_string();
        let list = PoolList {
            name: String::new(),
            official: vec![sample_pool(&Pubkey::new_unique())],
            un_official: vec![bad],
        };
        assert!(matches!(list.parsed(), Err(SwapError::InvalidAddress { .. })));
    }
}

use anchor_lang::prelude::*;

use crate::state::Outcome;

// --- REGISTRY ---
#[event]
pub struct ConfigInitialized {
    pub admin: Pubkey,
    pub fee_recipient: Pubkey,
    pub asset_mint: Pubkey,
    pub max_fee_basis_points: u16,
}

#[event]
pub struct ConfigUpdated {
    pub fee_recipient: Pubkey,
    pub max_fee_basis_points: u16,
}

#[event]
pub struct PauseChanged {
    pub is_paused: bool,
}

#[event]
pub struct AdminTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct MarketCreated {
    pub market_id: u64,
    pub market: Pubkey,
    pub creator: Pubkey,
    pub question: String,
    pub resolution_timestamp: i64,
    pub creation_fee: u64,
}

// --- BETTING ---
#[event]
pub struct BetPlaced {
    pub market_id: u64,
    pub user: Pubkey,
    pub outcome: Outcome,
    pub amount: u64,
    pub yes_pool: u64,
    pub no_pool: u64,
}

// --- SETTLEMENT ---
#[event]
pub struct MarketResolved {
    pub market_id: u64,
    pub outcome: Outcome,
    pub yes_pool: u64,
    pub no_pool: u64,
}

#[event]
pub struct MarketCancelled {
    pub market_id: u64,
    pub yes_pool: u64,
    pub no_pool: u64,
}

#[event]
pub struct WinningsClaimed {
    pub market_id: u64,
    pub user: Pubkey,
    pub payout: u64,
    pub refund: bool,
}

#[event]
pub struct BatchClaimed {
    pub user: Pubkey,
    pub claimed: u32,
    pub skipped: u32,
    pub total_payout: u64,
}

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
#[cfg(test)]
mod fixtures;
pub mod funding;
pub mod guard;
pub mod instructions;
pub mod state;

use instructions::*;
use state::*;

declare_id!("74gPnN1b6yrzgpuVQMVGGFexfQGukJCyCATLY7DGTLxF");

#[program]
pub mod pot_markets {
    use super::*;

    // --- REGISTRY ---

    /// Create the global config. The signer becomes admin and `asset_mint`
    /// becomes the settlement asset for every market.
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        fee_recipient: Pubkey,
        max_fee_basis_points: u16,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, fee_recipient, max_fee_basis_points)
    }

    /// Create a new binary pot market and return its id.
    ///
    /// A non-zero `fee_amount` is moved from the creator to the fee
    /// recipient as a flat fee.
    pub fn create_market(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<u64> {
        instructions::create_market::handler(ctx, params)
    }

    pub fn update_config(
        ctx: Context<AdminConfig>,
        fee_recipient: Pubkey,
        max_fee_basis_points: u16,
    ) -> Result<()> {
        instructions::admin::update_config(ctx, fee_recipient, max_fee_basis_points)
    }

    pub fn pause(ctx: Context<AdminConfig>) -> Result<()> {
        instructions::admin::set_pause(ctx, true)
    }

    pub fn unpause(ctx: Context<AdminConfig>) -> Result<()> {
        instructions::admin::set_pause(ctx, false)
    }

    pub fn transfer_admin(ctx: Context<AdminConfig>, new_admin: Pubkey) -> Result<()> {
        instructions::admin::transfer_admin(ctx, new_admin)
    }

    // --- SETTLEMENT ---

    /// Place a bet on YES or NO.
    ///
    /// Transfers `amount` from the bettor into the market vault and adds it
    /// to the bettor's position on that side.
    pub fn place_bet(
        ctx: Context<PlaceBet>,
        market_id: u64,
        outcome: Outcome,
        amount: u64,
    ) -> Result<()> {
        instructions::place_bet::handler(ctx, market_id, outcome, amount)
    }

    /// Resolve the market outcome (admin, after the resolution timestamp,
    /// both pools non-empty).
    pub fn resolve_market(ctx: Context<ResolveMarket>, market_id: u64, outcome: Outcome) -> Result<()> {
        instructions::resolve::handler(ctx, market_id, outcome)
    }

    /// Cancel a market after its resolution timestamp. Every stake becomes
    /// refundable through `claim_winnings`.
    pub fn cancel_market(ctx: Context<CancelMarket>, market_id: u64) -> Result<()> {
        instructions::cancel::handler(ctx, market_id)
    }

    /// Claim the payout (resolved) or refund (cancelled) for one market.
    ///
    ///   payout = stake + stake × losing_pool / winning_pool
    ///   refund = yes_bet + no_bet
    pub fn claim_winnings(ctx: Context<ClaimWinnings>, market_id: u64) -> Result<u64> {
        instructions::claim::handler(ctx, market_id)
    }

    /// Claim across several markets, skipping ineligible entries.
    pub fn claim_multiple<'info>(
        ctx: Context<'_, '_, '_, 'info, ClaimMultiple<'info>>,
        market_ids: Vec<u64>,
    ) -> Result<u64> {
        instructions::claim_multiple::handler(ctx, market_ids)
    }

    // --- VIEWS ---

    pub fn get_market(ctx: Context<ReadMarket>, market_id: u64) -> Result<Market> {
        instructions::views::get_market(ctx, market_id)
    }

    pub fn get_user_position(ctx: Context<ReadPosition>, market_id: u64) -> Result<UserPosition> {
        instructions::views::get_user_position(ctx, market_id)
    }

    pub fn calculate_payout(ctx: Context<ReadPosition>, market_id: u64) -> Result<u64> {
        instructions::views::calculate_payout(ctx, market_id)
    }

    pub fn get_config(ctx: Context<ReadConfig>) -> Result<GlobalConfig> {
        instructions::views::get_config(ctx)
    }

    pub fn get_market_count(ctx: Context<ReadConfig>) -> Result<u64> {
        instructions::views::get_market_count(ctx)
    }
}

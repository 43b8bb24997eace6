use anchor_lang::prelude::*;

use crate::constants::{SEED_CONFIG, SEED_MARKET};
use crate::events::MarketResolved;
use crate::guard::ReentrancyGuard;
use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct ResolveMarket<'info> {
    /// Protocol admin — the only account authorized to resolve.
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The market to resolve.
    #[account(
        mut,
        seeds = [SEED_MARKET, market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<ResolveMarket>, market_id: u64, outcome: Outcome) -> Result<()> {
    let clock = Clock::get()?;
    let admin = ctx.accounts.admin.key();

    let config = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
    config.ensure_admin(&admin)?;
    config.ensure_market_exists(market_id)?;

    // No funds move here; payouts are computed at claim time.
    let market = &mut ctx.accounts.market;
    market.resolve(outcome, clock.unix_timestamp)?;

    msg!(
        "Market #{} resolved: outcome={:?}, yes_pool={}, no_pool={}",
        market.market_id,
        outcome,
        market.yes_pool,
        market.no_pool,
    );

    emit!(MarketResolved {
        market_id: market.market_id,
        outcome,
        yes_pool: market.yes_pool,
        no_pool: market.no_pool,
    });

    Ok(())
}

use anchor_lang::prelude::*;

use crate::constants::{SEED_CONFIG, SEED_MARKET};
use crate::events::MarketCancelled;
use crate::guard::ReentrancyGuard;
use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct CancelMarket<'info> {
    /// Protocol admin.
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The market to cancel.
    #[account(
        mut,
        seeds = [SEED_MARKET, market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<CancelMarket>, market_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    let admin = ctx.accounts.admin.key();

    let config = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
    config.ensure_admin(&admin)?;
    config.ensure_market_exists(market_id)?;

    let market = &mut ctx.accounts.market;
    market.cancel(clock.unix_timestamp)?;

    msg!(
        "Market #{} cancelled by {} (yes_pool={}, no_pool={})",
        market.market_id,
        admin,
        market.yes_pool,
        market.no_pool,
    );

    emit!(MarketCancelled {
        market_id: market.market_id,
        yes_pool: market.yes_pool,
        no_pool: market.no_pool,
    });

    Ok(())
}

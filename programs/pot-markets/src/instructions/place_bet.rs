use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{SEED_CONFIG, SEED_MARKET, SEED_POSITION};
use crate::errors::MarketError;
use crate::events::BetPlaced;
use crate::funding;
use crate::guard::ReentrancyGuard;
use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct PlaceBet<'info> {
    /// The bettor placing the wager.
    #[account(mut)]
    pub bettor: Signer<'info>,

    /// Global config — pause flag and volume tracking.
    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The prediction market.
    #[account(
        mut,
        seeds = [SEED_MARKET, market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// User position PDA — created on first bet, updated on subsequent bets.
    #[account(
        init_if_needed,
        payer = bettor,
        space = UserPosition::SIZE,
        seeds = [SEED_POSITION, market.key().as_ref(), bettor.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, UserPosition>,

    /// Market vault — receives the stake.
    #[account(
        mut,
        address = market.vault,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Bettor's token account for the settlement asset.
    #[account(
        mut,
        constraint = bettor_token_account.mint == config.asset_mint @ MarketError::InvalidMint,
    )]
    pub bettor_token_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<PlaceBet>, market_id: u64, outcome: Outcome, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let bettor = ctx.accounts.bettor.key();
    let market_key = ctx.accounts.market.key();

    let mut config = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
    config.ensure_not_paused()?;
    config.ensure_market_exists(market_id)?;

    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    if position.user == Pubkey::default() {
        // First bet — initialize
        position.market = market_key;
        position.user = bettor;
        position.bump = ctx.bumps.position;
    }

    market.record_bet(position, outcome, amount, clock.unix_timestamp)?;
    config.record_volume(amount)?;

    funding::transfer_from(
        &ctx.accounts.token_program,
        &ctx.accounts.bettor_token_account,
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.bettor.to_account_info(),
        amount,
    )?;

    msg!(
        "Bet placed: {} on {:?} for market #{} (yes_pool={}, no_pool={})",
        amount,
        outcome,
        market.market_id,
        market.yes_pool,
        market.no_pool,
    );

    emit!(BetPlaced {
        market_id: market.market_id,
        user: bettor,
        outcome,
        amount,
        yes_pool: market.yes_pool,
        no_pool: market.no_pool,
    });

    Ok(())
}

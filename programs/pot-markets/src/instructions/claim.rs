use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{SEED_CONFIG, SEED_MARKET, SEED_POSITION};
use crate::errors::MarketError;
use crate::events::WinningsClaimed;
use crate::funding;
use crate::guard::ReentrancyGuard;
use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct ClaimWinnings<'info> {
    /// The user claiming their payout or refund.
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The finalized market.
    #[account(
        mut,
        seeds = [SEED_MARKET, market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// User position PDA.
    #[account(
        mut,
        seeds = [SEED_POSITION, market.key().as_ref(), claimant.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Account<'info, UserPosition>,

    /// Market vault — source of payout funds.
    #[account(
        mut,
        address = market.vault,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Receives the payout.
    #[account(
        mut,
        constraint = claimant_token_account.mint == config.asset_mint @ MarketError::InvalidMint,
        constraint = claimant_token_account.owner == claimant.key() @ MarketError::InvalidTokenOwner,
    )]
    pub claimant_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ClaimWinnings>, market_id: u64) -> Result<u64> {
    let claimant = ctx.accounts.claimant.key();
    let market_info = ctx.accounts.market.to_account_info();

    let config = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
    config.ensure_market_exists(market_id)?;

    // Debit the ledger first: the position is marked claimed before the
    // vault transfer below.
    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    let payout = market.claim(position)?;

    if payout > 0 {
        require!(
            payout <= ctx.accounts.vault.amount,
            MarketError::VaultInsolvency
        );
        funding::transfer_out(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.claimant_token_account.to_account_info(),
            market_info,
            market.market_id,
            market.bump,
            payout,
        )?;
    }

    let refund = market.state == MarketState::Cancelled;

    msg!(
        "Claimed: user={} payout={} refund={} market #{}",
        claimant,
        payout,
        refund,
        market.market_id,
    );

    emit!(WinningsClaimed {
        market_id: market.market_id,
        user: claimant,
        payout,
        refund,
    });

    Ok(payout)
}

use anchor_lang::prelude::*;
use anchor_spl::token::Mint;

use crate::constants::{MAX_FEE_BASIS_POINTS, SEED_CONFIG};
use crate::errors::MarketError;
use crate::events::ConfigInitialized;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// Becomes the protocol admin.
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global config singleton.
    #[account(
        init,
        payer = admin,
        space = GlobalConfig::SIZE,
        seeds = [SEED_CONFIG],
        bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// Settlement asset for every market.
    pub asset_mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeConfig>,
    fee_recipient: Pubkey,
    max_fee_basis_points: u16,
) -> Result<()> {
    require!(
        max_fee_basis_points <= MAX_FEE_BASIS_POINTS,
        MarketError::FeeTooHigh
    );

    let config = &mut ctx.accounts.config;
    config.admin = ctx.accounts.admin.key();
    config.fee_recipient = fee_recipient;
    config.max_fee_basis_points = max_fee_basis_points;
    config.paused = false;
    config.asset_mint = ctx.accounts.asset_mint.key();
    config.market_count = 0;
    config.total_volume = 0;
    config.locked = false;
    config.bump = ctx.bumps.config;

    msg!(
        "Config initialized: admin={} fee_recipient={} max_fee={}bps mint={}",
        config.admin,
        config.fee_recipient,
        config.max_fee_basis_points,
        config.asset_mint,
    );

    emit!(ConfigInitialized {
        admin: config.admin,
        fee_recipient,
        asset_mint: config.asset_mint,
        max_fee_basis_points,
    });

    Ok(())
}

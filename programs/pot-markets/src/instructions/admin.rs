use anchor_lang::prelude::*;

use crate::constants::SEED_CONFIG;
use crate::events::{AdminTransferred, ConfigUpdated, PauseChanged};
use crate::guard::ReentrancyGuard;
use crate::state::*;

#[derive(Accounts)]
pub struct AdminConfig<'info> {
    /// Must match `config.admin`; checked in each handler.
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,
}

pub fn update_config(
    ctx: Context<AdminConfig>,
    fee_recipient: Pubkey,
    max_fee_basis_points: u16,
) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let mut config = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
    config.ensure_admin(&admin)?;

    config.set_fee_policy(fee_recipient, max_fee_basis_points)?;

    msg!(
        "Config updated: fee_recipient={} max_fee={}bps",
        fee_recipient,
        max_fee_basis_points,
    );

    emit!(ConfigUpdated {
        fee_recipient,
        max_fee_basis_points,
    });

    Ok(())
}

pub fn set_pause(ctx: Context<AdminConfig>, paused: bool) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let mut config = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
    config.ensure_admin(&admin)?;

    config.set_paused(paused)?;

    msg!("Protocol {}", if paused { "paused" } else { "unpaused" });

    emit!(PauseChanged { is_paused: paused });

    Ok(())
}

pub fn transfer_admin(ctx: Context<AdminConfig>, new_admin: Pubkey) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let mut config = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
    config.ensure_admin(&admin)?;

    config.admin = new_admin;

    msg!("Admin transferred: {} -> {}", admin, new_admin);

    emit!(AdminTransferred {
        previous_admin: admin,
        new_admin,
    });

    Ok(())
}

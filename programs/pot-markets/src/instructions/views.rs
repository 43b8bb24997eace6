use anchor_lang::prelude::*;

use crate::constants::{SEED_CONFIG, SEED_MARKET, SEED_POSITION};
use crate::state::*;

// Read-only instructions. Values are handed back through return data and
// nothing is written.

#[derive(Accounts)]
pub struct ReadConfig<'info> {
    #[account(
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,
}

// Markets are loaded in the handler, after the id is checked against the
// config, so unknown ids fail with `MarketNotFound`.

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct ReadMarket<'info> {
    #[account(
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// CHECK: Address validated by seeds; loaded once the id is known to exist.
    #[account(
        seeds = [SEED_MARKET, market_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct ReadPosition<'info> {
    #[account(
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// CHECK: Address validated by seeds; loaded once the id is known to exist.
    #[account(
        seeds = [SEED_MARKET, market_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: UncheckedAccount<'info>,

    /// CHECK: Any wallet; only used to derive the position address.
    pub user: UncheckedAccount<'info>,

    /// Position PDA. May not exist yet, in which case it reads as zero.
    /// CHECK: Address validated by seeds; owner and discriminator checked on read.
    #[account(
        seeds = [SEED_POSITION, market.key().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub position: UncheckedAccount<'info>,
}

pub fn get_config(ctx: Context<ReadConfig>) -> Result<GlobalConfig> {
    Ok(ctx.accounts.config.clone().into_inner())
}

pub fn get_market_count(ctx: Context<ReadConfig>) -> Result<u64> {
    Ok(ctx.accounts.config.market_count)
}

pub fn get_market(ctx: Context<ReadMarket>, market_id: u64) -> Result<Market> {
    ctx.accounts.config.ensure_market_exists(market_id)?;
    read_market(&ctx.accounts.market)
}

pub fn get_user_position(ctx: Context<ReadPosition>, market_id: u64) -> Result<UserPosition> {
    ctx.accounts.config.ensure_market_exists(market_id)?;
    read_position(&ctx.accounts.position, ctx.accounts.market.key(), ctx.accounts.user.key())
}

/// Projection of `claim_winnings`: what the user would receive right now.
pub fn calculate_payout(ctx: Context<ReadPosition>, market_id: u64) -> Result<u64> {
    ctx.accounts.config.ensure_market_exists(market_id)?;
    let market = read_market(&ctx.accounts.market)?;
    let position = read_position(
        &ctx.accounts.position,
        ctx.accounts.market.key(),
        ctx.accounts.user.key(),
    )?;
    market.projected_payout(&position)
}

fn read_market(info: &AccountInfo) -> Result<Market> {
    require_keys_eq!(
        *info.owner,
        crate::ID,
        anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
    );
    let data = info.try_borrow_data()?;
    Market::try_deserialize(&mut &data[..])
}

fn read_position(info: &AccountInfo, market: Pubkey, user: Pubkey) -> Result<UserPosition> {
    if info.data_is_empty() {
        return Ok(UserPosition {
            market,
            user,
            ..Default::default()
        });
    }

    require_keys_eq!(
        *info.owner,
        crate::ID,
        anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram
    );
    let data = info.try_borrow_data()?;
    UserPosition::try_deserialize(&mut &data[..])
}

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{SEED_CONFIG, SEED_MARKET, SEED_VAULT};
use crate::errors::MarketError;
use crate::events::MarketCreated;
use crate::funding;
use crate::guard::ReentrancyGuard;
use crate::state::*;

/// Parameters for creating a new prediction market.
#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateMarketParams {
    /// Human-readable prediction question (1..=256 bytes).
    pub question: String,

    /// Unix timestamp at which betting closes and resolution opens.
    pub resolution_timestamp: i64,

    /// Flat fee paid to the fee recipient. Not bounded by the fee cap.
    pub fee_amount: u64,
}

#[derive(Accounts)]
pub struct CreateMarket<'info> {
    /// Market creator — pays for account allocation and the creation fee.
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Global config — provides the next market id.
    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// Market PDA — the core account for this prediction market.
    #[account(
        init,
        payer = creator,
        space = Market::SIZE,
        seeds = [SEED_MARKET, config.next_market_seed().as_ref()],
        bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// Vault PDA — holds every stake placed on this market.
    #[account(
        init,
        payer = creator,
        token::mint = asset_mint,
        token::authority = market,
        seeds = [SEED_VAULT, market.key().as_ref()],
        bump,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(address = config.asset_mint @ MarketError::InvalidMint)]
    pub asset_mint: Account<'info, Mint>,

    /// Source of the creation fee.
    #[account(
        mut,
        constraint = creator_token_account.mint == config.asset_mint @ MarketError::InvalidMint,
    )]
    pub creator_token_account: Account<'info, TokenAccount>,

    /// Destination of the creation fee. Only needed when a fee is charged.
    #[account(
        mut,
        constraint = fee_recipient_token_account.mint == config.asset_mint @ MarketError::InvalidMint,
        constraint = fee_recipient_token_account.owner == config.fee_recipient @ MarketError::InvalidTokenOwner,
    )]
    pub fee_recipient_token_account: Option<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<u64> {
    let clock = Clock::get()?;
    let creator = ctx.accounts.creator.key();
    let market_key = ctx.accounts.market.key();

    let mut config = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;
    config.ensure_not_paused()?;

    let mut market = Market::open(
        config.next_market_id()?,
        creator,
        params.question,
        params.resolution_timestamp,
        params.fee_amount,
        config.snapshot(),
        clock.unix_timestamp,
    )?;
    market.vault = ctx.accounts.vault.key();
    market.vault_bump = ctx.bumps.vault;
    market.bump = ctx.bumps.market;

    let market_id = config.register_market()?;

    if params.fee_amount > 0 {
        let fee_recipient_token_account = ctx
            .accounts
            .fee_recipient_token_account
            .as_ref()
            .ok_or(MarketError::FeeAccountRequired)?;
        funding::transfer_from(
            &ctx.accounts.token_program,
            &ctx.accounts.creator_token_account,
            fee_recipient_token_account.to_account_info(),
            ctx.accounts.creator.to_account_info(),
            params.fee_amount,
        )?;
    }

    msg!(
        "Market #{} created: {} | resolves at: {} | fee: {}",
        market_id,
        market.question,
        market.resolution_timestamp,
        market.creation_fee,
    );

    emit!(MarketCreated {
        market_id,
        market: market_key,
        creator,
        question: market.question.clone(),
        resolution_timestamp: market.resolution_timestamp,
        creation_fee: market.creation_fee,
    });

    ctx.accounts.market.set_inner(market);

    Ok(market_id)
}

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::{CLAIM_ACCOUNTS_PER_MARKET, SEED_CONFIG};
use crate::errors::MarketError;
use crate::events::{BatchClaimed, WinningsClaimed};
use crate::funding;
use crate::guard::ReentrancyGuard;
use crate::state::*;

/// Batch claim across several markets.
///
/// Remaining accounts: for every id in `market_ids`, in order,
/// `[market, position, vault]`, all writable.
#[derive(Accounts)]
pub struct ClaimMultiple<'info> {
    #[account(mut)]
    pub claimant: Signer<'info>,

    #[account(
        mut,
        seeds = [SEED_CONFIG],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// Receives every payout in the batch.
    #[account(
        mut,
        constraint = claimant_token_account.mint == config.asset_mint @ MarketError::InvalidMint,
        constraint = claimant_token_account.owner == claimant.key() @ MarketError::InvalidTokenOwner,
    )]
    pub claimant_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, ClaimMultiple<'info>>,
    market_ids: Vec<u64>,
) -> Result<u64> {
    ensure_account_count(market_ids.len(), ctx.remaining_accounts.len())?;

    let claimant = ctx.accounts.claimant.key();
    let destination = ctx.accounts.claimant_token_account.to_account_info();
    let token_program = ctx.accounts.token_program.to_account_info();
    let config = ReentrancyGuard::acquire(&mut ctx.accounts.config)?;

    let mut claimed: u32 = 0;
    let mut skipped: u32 = 0;
    let mut total_payout: u64 = 0;

    for (market_id, accounts) in market_ids
        .iter()
        .zip(ctx.remaining_accounts.chunks(CLAIM_ACCOUNTS_PER_MARKET))
    {
        let entry = ClaimEntry {
            market: &accounts[0],
            position: &accounts[1],
            vault: &accounts[2],
        };

        match claim_entry(&config, *market_id, &entry, &claimant, &destination, &token_program)? {
            Some(payout) => {
                claimed += 1;
                total_payout = total_payout
                    .checked_add(payout)
                    .ok_or(MarketError::Overflow)?;
            }
            None => skipped += 1,
        }
    }

    msg!(
        "Batch claim: user={} claimed={} skipped={} total={}",
        claimant,
        claimed,
        skipped,
        total_payout,
    );

    emit!(BatchClaimed {
        user: claimant,
        claimed,
        skipped,
        total_payout,
    });

    Ok(total_payout)
}

/// Every id needs its own `[market, position, vault]` triple.
fn ensure_account_count(market_ids: usize, accounts: usize) -> Result<()> {
    let needed = market_ids
        .checked_mul(CLAIM_ACCOUNTS_PER_MARKET)
        .ok_or(MarketError::Overflow)?;
    if accounts < needed {
        return Err(ProgramError::NotEnoughAccountKeys.into());
    }
    Ok(())
}

struct ClaimEntry<'a, 'info> {
    market: &'a AccountInfo<'info>,
    position: &'a AccountInfo<'info>,
    vault: &'a AccountInfo<'info>,
}

/// Settle one entry of the batch.
///
/// Returns `Ok(None)` for entries that are skipped: accounts that do not
/// load or do not belong together, markets still Active, positions already
/// claimed or empty. Any other failure (arithmetic, vault shortfall, a
/// failed transfer) aborts the batch.
fn claim_entry<'info>(
    config: &GlobalConfig,
    market_id: u64,
    entry: &ClaimEntry<'_, 'info>,
    claimant: &Pubkey,
    destination: &AccountInfo<'info>,
    token_program: &AccountInfo<'info>,
) -> Result<Option<u64>> {
    if config.ensure_market_exists(market_id).is_err() {
        return Ok(None);
    }

    let Some(mut market) = load::<Market>(entry.market) else {
        return Ok(None);
    };
    let Some(mut position) = load::<UserPosition>(entry.position) else {
        return Ok(None);
    };

    if market.market_id != market_id
        || position.market != entry.market.key()
        || position.user != *claimant
        || market.vault != entry.vault.key()
        || !entry.vault.is_writable
    {
        return Ok(None);
    }

    let payout = match market.claim(&mut position) {
        Ok(payout) => payout,
        Err(err) if is_ineligible(&err) => return Ok(None),
        Err(err) => return Err(err),
    };

    // Persist the claimed flag before the vault is debited.
    store(entry.position, &position)?;
    store(entry.market, &market)?;

    if payout > 0 {
        let vault_balance = {
            let data = entry.vault.try_borrow_data()?;
            TokenAccount::try_deserialize(&mut &data[..])?.amount
        };
        require!(payout <= vault_balance, MarketError::VaultInsolvency);

        funding::transfer_out(
            token_program.clone(),
            entry.vault.clone(),
            destination.clone(),
            entry.market.clone(),
            market.market_id,
            market.bump,
            payout,
        )?;
    }

    emit!(WinningsClaimed {
        market_id,
        user: *claimant,
        payout,
        refund: market.state == MarketState::Cancelled,
    });

    Ok(Some(payout))
}

fn is_ineligible(err: &Error) -> bool {
    [
        MarketError::MarketNotFinalized,
        MarketError::AlreadyClaimed,
        MarketError::NoStake,
    ]
    .into_iter()
    .any(|skip| *err == Error::from(skip))
}

/// Deserialize a program-owned, writable account, or `None`.
fn load<T: AccountDeserialize>(info: &AccountInfo) -> Option<T> {
    if info.owner != &crate::ID || !info.is_writable {
        return None;
    }
    let data = info.try_borrow_data().ok()?;
    T::try_deserialize(&mut &data[..]).ok()
}

fn store<T: AccountSerialize>(info: &AccountInfo, value: &T) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    value.try_serialize(&mut writer)
}

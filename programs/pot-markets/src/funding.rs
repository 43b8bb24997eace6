use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::SEED_MARKET;
use crate::errors::MarketError;

/// ─── Funding ──────────────────────────────────────────────────────
///
/// What a signer may move out of one token account.
///
///   balance   = token account amount
///   allowance = unlimited for the owner, `delegated_amount` for the
///               approved delegate, 0 for anyone else
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Funding {
    pub balance: u64,
    pub allowance: u64,
}

impl Funding {
    pub fn of(account: &TokenAccount, authority: &Pubkey) -> Self {
        let delegate = match account.delegate {
            COption::Some(delegate) => Some(delegate),
            COption::None => None,
        };
        Self::resolve(
            account.amount,
            &account.owner,
            delegate,
            account.delegated_amount,
            authority,
        )
    }

    pub fn resolve(
        balance: u64,
        owner: &Pubkey,
        delegate: Option<Pubkey>,
        delegated_amount: u64,
        authority: &Pubkey,
    ) -> Self {
        let allowance = if authority == owner {
            u64::MAX
        } else if delegate.as_ref() == Some(authority) {
            delegated_amount
        } else {
            0
        };
        Self { balance, allowance }
    }

    pub fn ensure_covers(&self, amount: u64) -> Result<()> {
        require!(self.balance >= amount, MarketError::InsufficientBalance);
        require!(self.allowance >= amount, MarketError::InsufficientAllowance);
        Ok(())
    }
}

/// Move `amount` out of a user's token account, signed by `authority`
/// (the owner or an approved delegate).
pub fn transfer_from<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    Funding::of(from, authority.key).ensure_covers(amount)?;

    token::transfer(
        CpiContext::new(
            token_program.to_account_info(),
            Transfer {
                from: from.to_account_info(),
                to,
                authority,
            },
        ),
        amount,
    )
}

/// Pay `amount` out of a market vault. The market PDA is the vault
/// authority and signs with its seeds.
pub fn transfer_out<'info>(
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    market: AccountInfo<'info>,
    market_id: u64,
    market_bump: u8,
    amount: u64,
) -> Result<()> {
    let market_id_bytes = market_id.to_le_bytes();
    let bump = [market_bump];
    let seeds: &[&[u8]] = &[SEED_MARKET, market_id_bytes.as_ref(), &bump];

    token::transfer(
        CpiContext::new_with_signer(
            token_program,
            Transfer {
                from: vault,
                to,
                authority: market,
            },
            &[seeds],
        ),
        amount,
    )
}

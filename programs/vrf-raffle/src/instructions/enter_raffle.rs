use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::{
    error::RaffleError,
    state::{
        raffle::{Raffle, RAFFLE_SEED},
        Treasury, TREASURY_SEED,
    },
};

/// Event emitted when a player enters the raffle
#[event]
pub struct RaffleEntered {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The player's address
    pub player: Pubkey,
    /// Amount paid in lamports
    pub amount: u64,
}

/// Instruction to join the current round
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `amount` - Lamports paid into the pool, at least the entrance fee
///
/// # Security Considerations
/// 1. Rejects payments below the entrance fee
/// 2. Rejects entries while a winner is being calculated
/// 3. Ledger is updated before the transfer CPI
/// 4. Treasury balance is verified after the transfer
///
/// # Implementation Notes
/// - One ledger entry per call, the same player may enter repeatedly
/// - The raffle account grows by one slot per new high-water mark of players
///   and never shrinks, so earlier entrants keep their rent deposit in place
pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    ctx.accounts.raffle.enter(player, amount)?;

    let pre_transfer_balance = ctx.accounts.treasury.to_account_info().lamports();

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.treasury.to_account_info(),
            },
        ),
        amount,
    )?;

    let post_transfer_balance = ctx.accounts.treasury.to_account_info().lamports();
    require!(
        post_transfer_balance
            == pre_transfer_balance
                .checked_add(amount)
                .ok_or(RaffleError::Overflow)?,
        RaffleError::TransferFailed
    );

    emit!(RaffleEntered {
        raffle: ctx.accounts.raffle.key(),
        player,
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
        realloc = Raffle::space(raffle.players.len() + 1).max(raffle.to_account_info().data_len()),
        realloc::payer = player,
        realloc::zero = false,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        mut,
        seeds = [
            TREASURY_SEED,
            raffle.key().as_ref(),
        ],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}

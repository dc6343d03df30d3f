use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{
        raffle::{Raffle, RAFFLE_SEED},
        Treasury, TREASURY_SEED,
    },
};

/// Event emitted when the winner of a round is picked
#[event]
pub struct WinnerPicked {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The winner's address
    pub winner: Pubkey,
    /// The request the winning word answered
    pub request_id: u64,
}

/// Oracle callback delivering the random words for a pending request.
/// This instruction can only be executed when:
/// 1. It is signed by the coordinator recorded on the raffle
/// 2. `request_id` matches the pending request
/// 3. The winner account matches `random_words[0] mod players`
///
/// After execution:
/// - The winner is recorded and the raffle is back in Open state
/// - The ledger is empty and the next round starts now
/// - The whole prize is moved from the treasury to the winner
///
/// The round is reset before any lamports move. If the payout fails the
/// error aborts the transaction and every change above is reverted.
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let raffle_key = ctx.accounts.raffle.key();

    let winner = ctx
        .accounts
        .raffle
        .settle_round(request_id, &random_words, now)?;
    require_keys_eq!(
        ctx.accounts.winner.key(),
        winner,
        RaffleError::WinnerAccountMismatch
    );

    msg!("Winner: {}", winner);

    emit!(WinnerPicked {
        raffle: raffle_key,
        winner,
        request_id,
    });

    let treasury_account = ctx.accounts.treasury.to_account_info();
    let winner_account = ctx.accounts.winner.to_account_info();
    let prize = Treasury::available_prize(&treasury_account)?;

    // Direct lamport moves only work because the treasury is owned by this program.
    treasury_account
        .sub_lamports(prize)
        .map_err(|_| RaffleError::PayoutFailed)?;
    winner_account
        .add_lamports(prize)
        .map_err(|_| RaffleError::PayoutFailed)?;

    Ok(())
}

#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
        has_one = coordinator @ RaffleError::NotCoordinator,
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

    pub coordinator: Signer<'info>,

    /// Receives the prize, must be the selected player
    #[account(mut)]
    pub winner: SystemAccount<'info>,
}

use anchor_lang::prelude::*;

use crate::{
    state::{
        raffle::{Raffle, RAFFLE_SEED},
        Treasury, TREASURY_SEED,
    },
    vrf,
};

/// Event emitted when a winner is requested from the oracle
#[event]
pub struct RequestedRaffleWinner {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Id the oracle echoes back on fulfillment
    pub request_id: u64,
}

/// Closes the current round and requests randomness to pick its winner.
/// Callable by anyone; the upkeep predicate is re-evaluated here.
///
/// Execution requirements:
/// 1. The interval since the round started has elapsed
/// 2. The raffle is in Open state
/// 3. The treasury holds a prize
/// 4. At least one player has entered
///
/// After execution:
/// - The raffle is in Calculating state and rejects entries
/// - A `RandomWordsRequested` event is published for the oracle
///
/// # Errors
/// - `UpkeepNotReady` if any requirement fails; balance, player count and
///   state are logged alongside
pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
    let clock = Clock::get()?;
    let balance = Treasury::available_prize(&ctx.accounts.treasury.to_account_info())?;
    let raffle_key = ctx.accounts.raffle.key();
    let raffle = &mut ctx.accounts.raffle;

    raffle.start_calculating(clock.unix_timestamp, balance)?;

    let request_id =
        vrf::request_random_words(&raffle_key, &raffle.config, raffle.request_nonce, clock.slot);
    raffle.record_request(request_id, clock.unix_timestamp)?;

    emit!(RequestedRaffleWinner {
        raffle: raffle_key,
        request_id,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        seeds = [
            TREASURY_SEED,
            raffle.key().as_ref(),
        ],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,
}

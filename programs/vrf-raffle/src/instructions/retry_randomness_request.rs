use anchor_lang::prelude::*;

use crate::{
    state::raffle::{Raffle, RAFFLE_SEED},
    vrf,
};

use super::perform_upkeep::RequestedRaffleWinner;

/// Re-issues the randomness request of a round stuck in Calculating.
///
/// Allowed once `request_timeout` seconds have passed since the last
/// request. The new id replaces the pending one, so a late answer to the
/// old request fails with `NoSuchRequest`. Ledger and treasury are untouched.
pub fn retry_randomness_request(ctx: Context<RetryRandomnessRequest>) -> Result<()> {
    let clock = Clock::get()?;
    let raffle_key = ctx.accounts.raffle.key();
    let raffle = &mut ctx.accounts.raffle;

    raffle.ensure_request_expired(clock.unix_timestamp)?;

    if let Some(stale) = raffle.pending_request {
        msg!("Replacing expired request {}", stale);
    }

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
pub struct RetryRandomnessRequest<'info> {
    #[account(
        mut,
        seeds = [RAFFLE_SEED],
        bump = raffle.bump,
    )]
    pub raffle: Account<'info, Raffle>,
}

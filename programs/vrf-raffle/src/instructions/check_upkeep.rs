use anchor_lang::prelude::*;

use crate::state::{
    raffle::{Raffle, UpkeepStatus, RAFFLE_SEED},
    Treasury, TREASURY_SEED,
};

/// Read-only upkeep predicate for automation agents
///
/// Returns the status through return data; simulate the transaction to read
/// it. Nothing is mutated, so any caller may invoke it at any time.
pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepStatus> {
    let now = Clock::get()?.unix_timestamp;
    let balance = Treasury::available_prize(&ctx.accounts.treasury.to_account_info())?;

    Ok(ctx.accounts.raffle.check_upkeep(now, balance))
}

#[derive(Accounts)]
pub struct CheckUpkeep<'info> {
    #[account(
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

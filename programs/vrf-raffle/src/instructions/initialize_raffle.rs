use crate::{
    error::RaffleError,
    state::{
        raffle::{Raffle, RaffleState, RoundConfig, RAFFLE_SEED},
        Treasury, TREASURY_ACCOUNT_SIZE, TREASURY_SEED,
    },
};
use anchor_lang::prelude::*;

/// Event emitted when the raffle is initialized
#[event]
pub struct RaffleInitialized {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Key allowed to deliver randomness
    pub coordinator: Pubkey,
    /// Minimum payment per entry in lamports
    pub entrance_fee: u64,
    /// Round duration in seconds
    pub interval: i64,
    /// Start of the first round
    pub start_time: i64,
}

/// Instruction to create the raffle and its treasury
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `config` - Round parameters, fixed for the lifetime of the raffle
///
/// # Security Considerations
/// 1. The raffle is a singleton PDA, so it can only be initialized once
/// 2. `interval` must be positive and `request_timeout` non-negative
/// 3. `callback_gas_limit` must be positive
/// 4. The coordinator recorded here is the only key allowed to fulfill randomness
///
/// # Implementation Notes
/// - Starts in Open state with an empty ledger
/// - The first round starts at the current timestamp
/// - Treasury PDA holds the pool, linked to the raffle
pub fn initialize_raffle(ctx: Context<InitializeRaffle>, config: RoundConfig) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;

    require!(config.interval > 0, RaffleError::InvalidInterval);
    require!(
        config.request_timeout >= 0,
        RaffleError::InvalidRequestTimeout
    );
    require!(
        config.callback_gas_limit > 0,
        RaffleError::InvalidCallbackGasLimit
    );

    let raffle = &mut ctx.accounts.raffle;
    raffle.bump = ctx.bumps.raffle;
    raffle.coordinator = ctx.accounts.coordinator.key();
    raffle.config = config;
    raffle.raffle_state = RaffleState::Open;
    raffle.last_timestamp = current_time;
    raffle.recent_winner = None;
    raffle.pending_request = None;
    raffle.requested_at = 0;
    raffle.request_nonce = 0;
    raffle.players = Vec::new();

    ctx.accounts.treasury.raffle = ctx.accounts.raffle.key();
    ctx.accounts.treasury.bump = ctx.bumps.treasury;

    emit!(RaffleInitialized {
        raffle: ctx.accounts.raffle.key(),
        coordinator: ctx.accounts.raffle.coordinator,
        entrance_fee: ctx.accounts.raffle.entrance_fee(),
        interval: ctx.accounts.raffle.interval(),
        start_time: current_time,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRaffle<'info> {
    #[account(
        init,
        payer = payer,
        space = Raffle::space(0),
        seeds = [RAFFLE_SEED],
        bump
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        init,
        payer = payer,
        space = TREASURY_ACCOUNT_SIZE,
        seeds = [
            TREASURY_SEED,
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Only its key is stored; it must sign fulfillments later on.
    pub coordinator: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

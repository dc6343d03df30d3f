use anchor_lang::prelude::*;
use instructions::*;
use state::{RoundConfig, UpkeepStatus};

pub mod error;
pub mod instructions;
pub mod state;
pub mod vrf;

declare_id!("4wUgnXBCiSFYBbJEb6JpJufxQQLumLqwPi1vSvdLSQr9");

#[program]
pub mod vrf_raffle {
    use super::*;

    pub fn initialize_raffle(ctx: Context<InitializeRaffle>, config: RoundConfig) -> Result<()> {
        instructions::initialize_raffle::initialize_raffle(ctx, config)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>, amount: u64) -> Result<()> {
        instructions::enter_raffle::enter_raffle(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<CheckUpkeep>) -> Result<UpkeepStatus> {
        instructions::check_upkeep::check_upkeep(ctx)
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>) -> Result<()> {
        instructions::perform_upkeep::perform_upkeep(ctx)
    }

    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::fulfill_random_words::fulfill_random_words(ctx, request_id, random_words)
    }

    pub fn retry_randomness_request(ctx: Context<RetryRandomnessRequest>) -> Result<()> {
        instructions::retry_randomness_request::retry_randomness_request(ctx)
    }
}

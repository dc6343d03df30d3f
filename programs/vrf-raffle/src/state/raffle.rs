use anchor_lang::prelude::*;

use crate::{error::RaffleError, vrf};

pub const RAFFLE_SEED: &[u8] = b"raffle";

/// Players per round. Loading the ledger deserializes it onto the 32 KiB
/// bump heap, which never frees; beyond this size growing the vector on
/// `enter` no longer fits next to the earlier allocations.
pub const MAX_PLAYERS: usize = 256;

// Space calculation (players excluded):
// 8 (discriminator) +
// 1 (bump) +
// 32 (coordinator) +
// 68 (config: RoundConfig) +
// 1 (raffle_state) +
// 8 (last_timestamp) +
// 33 (recent_winner: Option<Pubkey>) +
// 9 (pending_request: Option<u64>) +
// 8 (requested_at) +
// 8 (request_nonce) +
// 4 (length of players) =
// 180 bytes, plus 32 bytes per player
pub const RAFFLE_BASE_SIZE: usize =
    8 + 1 + 32 + RoundConfig::INIT_SPACE + 1 + 8 + 33 + 9 + 8 + 8 + 4;

/// Parameters fixed for the lifetime of the raffle.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct RoundConfig {
    /// Minimum payment in lamports to join a round
    pub entrance_fee: u64,
    /// Round duration in seconds
    pub interval: i64,
    /// Oracle gas lane the randomness request is routed through
    pub key_hash: [u8; 32],
    /// Oracle subscription billed for the request
    pub subscription_id: u64,
    /// Compute unit budget the oracle may spend on the fulfillment callback
    pub callback_gas_limit: u32,
    /// Seconds after which a pending request may be re-issued, 0 disables re-issuing
    pub request_timeout: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaffleState {
    Open = 0,
    Calculating = 1,
}

/// Result of the upkeep predicate, returned to automation agents.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpkeepStatus {
    pub upkeep_needed: bool,
    /// Opaque payload required by the automation interface, always empty
    pub perform_data: Vec<u8>,
    pub balance: u64,
    pub num_players: u64,
    pub raffle_state: RaffleState,
    pub time_elapsed: i64,
}

#[account]
#[derive(Debug)]
pub struct Raffle {
    pub bump: u8,
    /// Only this key may deliver randomness
    pub coordinator: Pubkey,
    pub config: RoundConfig,
    pub raffle_state: RaffleState,
    /// Start of the current round
    pub last_timestamp: i64,
    pub recent_winner: Option<Pubkey>,
    pub pending_request: Option<u64>,
    pub requested_at: i64,
    pub request_nonce: u64,
    pub players: Vec<Pubkey>,
}

impl Raffle {
    pub fn space(num_players: usize) -> usize {
        RAFFLE_BASE_SIZE + num_players * 32
    }

    /// Admits `player` into the current round.
    ///
    /// # Errors
    /// - `InsufficientPayment` if `amount` is below the entrance fee
    /// - `RoundNotOpen` while a winner is being calculated
    /// - `RoundFull` once `MAX_PLAYERS` have entered
    pub fn enter(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(
            amount >= self.config.entrance_fee,
            RaffleError::InsufficientPayment
        );
        require!(
            self.raffle_state == RaffleState::Open,
            RaffleError::RoundNotOpen
        );
        require!(self.players.len() < MAX_PLAYERS, RaffleError::RoundFull);

        self.players.push(player);

        Ok(())
    }

    /// Read-only predicate polled by the automation agent.
    ///
    /// Upkeep is needed once the interval has elapsed, the round is open,
    /// the treasury holds a prize and at least one player has entered.
    pub fn check_upkeep(&self, now: i64, balance: u64) -> UpkeepStatus {
        let time_elapsed = now.saturating_sub(self.last_timestamp);

        let is_open = self.raffle_state == RaffleState::Open;
        let time_passed = time_elapsed >= self.config.interval;
        let has_players = !self.players.is_empty();
        let has_balance = balance > 0;

        UpkeepStatus {
            upkeep_needed: is_open && time_passed && has_players && has_balance,
            perform_data: Vec::new(),
            balance,
            num_players: self.players.len() as u64,
            raffle_state: self.raffle_state,
            time_elapsed,
        }
    }

    /// Closes the round to entries ahead of the randomness request.
    ///
    /// Must run before the request is issued so nothing observes a stale
    /// `Open` state while the request is in flight.
    pub fn start_calculating(&mut self, now: i64, balance: u64) -> Result<UpkeepStatus> {
        let status = self.check_upkeep(now, balance);
        if !status.upkeep_needed {
            msg!(
                "Upkeep not needed: balance={}, players={}, state={:?}",
                status.balance,
                status.num_players,
                status.raffle_state
            );
            return Err(error!(RaffleError::UpkeepNotReady)
                .with_values((status.balance, status.num_players)));
        }

        self.raffle_state = RaffleState::Calculating;

        Ok(status)
    }

    /// Remembers the id the oracle will echo back on fulfillment.
    pub fn record_request(&mut self, request_id: u64, now: i64) -> Result<()> {
        self.pending_request = Some(request_id);
        self.requested_at = now;
        self.request_nonce = self
            .request_nonce
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;

        Ok(())
    }

    /// Checks that the pending request has outlived the configured timeout
    /// and may be issued again.
    pub fn ensure_request_expired(&self, now: i64) -> Result<()> {
        require!(
            self.raffle_state == RaffleState::Calculating && self.pending_request.is_some(),
            RaffleError::NoSuchRequest
        );
        require!(
            self.config.request_timeout > 0,
            RaffleError::RequestRetryDisabled
        );
        require!(
            now.saturating_sub(self.requested_at) >= self.config.request_timeout,
            RaffleError::RequestNotExpired
        );

        Ok(())
    }

    /// Picks the winner for the pending request and resets the round.
    ///
    /// Every local effect is applied here, before the caller moves any
    /// lamports. A failed payout aborts the transaction, which reverts all
    /// of them.
    pub fn settle_round(
        &mut self,
        request_id: u64,
        random_words: &[[u8; 32]],
        now: i64,
    ) -> Result<Pubkey> {
        require!(
            self.raffle_state == RaffleState::Calculating,
            RaffleError::NoSuchRequest
        );
        require!(
            self.pending_request == Some(request_id),
            RaffleError::NoSuchRequest
        );

        let word = random_words
            .first()
            .ok_or(RaffleError::MissingRandomWords)?;
        let index = vrf::winner_index(word, self.players.len() as u64)?;
        let winner = self.player(index)?;

        self.recent_winner = Some(winner);
        self.raffle_state = RaffleState::Open;
        self.players = Vec::new();
        self.last_timestamp = now;
        self.pending_request = None;

        Ok(winner)
    }

    pub fn entrance_fee(&self) -> u64 {
        self.config.entrance_fee
    }

    pub fn interval(&self) -> i64 {
        self.config.interval
    }

    pub fn raffle_state(&self) -> RaffleState {
        self.raffle_state
    }

    pub fn player(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.players.get(i))
            .copied()
            .ok_or_else(|| error!(RaffleError::PlayerIndexOutOfBounds))
    }

    pub fn num_players(&self) -> u64 {
        self.players.len() as u64
    }

    pub fn recent_winner(&self) -> Option<Pubkey> {
        self.recent_winner
    }

    pub fn last_timestamp(&self) -> i64 {
        self.last_timestamp
    }
}

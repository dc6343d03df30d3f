use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    Overflow,
    #[msg("Payment is below the entrance fee")]
    InsufficientPayment,
    #[msg("Raffle is not open for entries")]
    RoundNotOpen,
    #[msg("Round has reached its player limit")]
    RoundFull,
    #[msg("Upkeep is not needed")]
    UpkeepNotReady,
    #[msg("No outstanding randomness request matches this fulfillment")]
    NoSuchRequest,
    #[msg("Fulfillment carried no random words")]
    MissingRandomWords,
    #[msg("Raffle has no players")]
    NoPlayers,
    #[msg("Player index out of bounds")]
    PlayerIndexOutOfBounds,
    #[msg("Prize transfer to the winner failed")]
    PayoutFailed,
    #[msg("Treasury transfer failed")]
    TransferFailed,
    #[msg("Winner account does not match the selected player")]
    WinnerAccountMismatch,
    #[msg("Only the randomness coordinator can fulfill requests")]
    NotCoordinator,
    #[msg("Re-issuing randomness requests is disabled")]
    RequestRetryDisabled,
    #[msg("Pending randomness request has not timed out yet")]
    RequestNotExpired,
    #[msg("Interval must be positive")]
    InvalidInterval,
    #[msg("Request timeout cannot be negative")]
    InvalidRequestTimeout,
    #[msg("Callback gas limit must be positive")]
    InvalidCallbackGasLimit,
}

pub use check_upkeep::*;
pub use enter_raffle::*;
pub use fulfill_random_words::*;
pub use initialize_raffle::*;
pub use perform_upkeep::*;
pub use retry_randomness_request::*;

pub mod check_upkeep;
pub mod enter_raffle;
pub mod fulfill_random_words;
pub mod initialize_raffle;
pub mod perform_upkeep;
pub mod retry_randomness_request;

//! Outbound side of the randomness oracle protocol.
//!
//! A request is published as a `RandomWordsRequested` event. The oracle
//! watches for it and answers by invoking `fulfill_random_words` with the
//! same request id, signed by the coordinator key stored on the raffle.

use anchor_lang::{prelude::*, solana_program::hash::hashv};
use arrayref::{array_ref, array_refs};

use crate::{error::RaffleError, state::RoundConfig};

/// Blocks the oracle waits before answering
pub const REQUEST_CONFIRMATIONS: u16 = 3;
pub const NUM_WORDS: u32 = 1;

/// Event consumed by the off-chain oracle
#[event]
pub struct RandomWordsRequested {
    pub raffle: Pubkey,
    pub request_id: u64,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
}

/// Issues a randomness request for `raffle` and returns its id.
pub fn request_random_words(raffle: &Pubkey, config: &RoundConfig, nonce: u64, slot: u64) -> u64 {
    let request_id = derive_request_id(raffle, nonce, slot);

    emit!(RandomWordsRequested {
        raffle: *raffle,
        request_id,
        key_hash: config.key_hash,
        subscription_id: config.subscription_id,
        request_confirmations: REQUEST_CONFIRMATIONS,
        callback_gas_limit: config.callback_gas_limit,
        num_words: NUM_WORDS,
    });

    request_id
}

pub fn derive_request_id(raffle: &Pubkey, nonce: u64, slot: u64) -> u64 {
    let hash = hashv(&[
        &b"request"[..],
        raffle.as_ref(),
        &nonce.to_le_bytes(),
        &slot.to_le_bytes(),
    ])
    .to_bytes();

    u64::from_le_bytes(*array_ref![hash, 0, 8])
}

/// Reduces a big-endian 256-bit random word modulo `num_players`.
///
/// Plain modulo: the bias for a 256-bit domain is negligible at any
/// realistic player count.
pub fn winner_index(word: &[u8; 32], num_players: u64) -> Result<u64> {
    require!(num_players > 0, RaffleError::NoPlayers);

    let (a, b, c, d) = array_refs![word, 8, 8, 8, 8];
    let modulus = num_players as u128;
    let index = [a, b, c, d].iter().fold(0u128, |acc, limb| {
        ((acc << 64) | u64::from_be_bytes(**limb) as u128) % modulus
    });

    Ok(index as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(value: u64) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&value.to_be_bytes());
        word
    }

    #[test]
    fn small_words_reduce_like_plain_modulo() {
        assert_eq!(winner_index(&word(123_454_321), 3).unwrap(), 1);
        assert_eq!(winner_index(&word(9), 10).unwrap(), 9);
        assert_eq!(winner_index(&word(0), 5).unwrap(), 0);
        assert_eq!(winner_index(&word(u64::MAX), 1).unwrap(), 0);
    }

    #[test]
    fn high_limbs_take_part_in_reduction() {
        // 2^64 mod 7 == 2
        let mut two_pow_64 = [0u8; 32];
        two_pow_64[23] = 1;
        assert_eq!(winner_index(&two_pow_64, 7).unwrap(), 2);

        // 2^256 - 1 is divisible by 3 and ends in 5
        assert_eq!(winner_index(&[0xff; 32], 3).unwrap(), 0);
        assert_eq!(winner_index(&[0xff; 32], 10).unwrap(), 5);
    }

    #[test]
    fn no_players_is_an_error() {
        assert!(winner_index(&word(1), 0).is_err());
    }

    #[test]
    fn request_ids_differ_per_nonce() {
        let raffle = Pubkey::new_unique();

        assert_eq!(
            derive_request_id(&raffle, 0, 10),
            derive_request_id(&raffle, 0, 10)
        );
        assert_ne!(
            derive_request_id(&raffle, 0, 10),
            derive_request_id(&raffle, 1, 10)
        );
    }
}

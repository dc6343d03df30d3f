use anchor_lang::prelude::*;

pub const TREASURY_SEED: &[u8] = b"treasury";

// 8 discriminator, 32 pubkey, 1 bump
pub const TREASURY_ACCOUNT_SIZE: usize = 8 + 32 + 1;

/// Holds the pooled entrance fees of the current round.
#[account]
pub struct Treasury {
    pub raffle: Pubkey,
    pub bump: u8,
}

impl Treasury {
    /// Lamports available as prize, i.e. everything above the rent-exempt reserve.
    pub fn prize_balance(lamports: u64, rent: &Rent) -> u64 {
        lamports.saturating_sub(rent.minimum_balance(TREASURY_ACCOUNT_SIZE))
    }

    pub fn available_prize(treasury: &AccountInfo) -> Result<u64> {
        Ok(Self::prize_balance(treasury.lamports(), &Rent::get()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prize_balance_excludes_rent_reserve() {
        let rent = Rent::default();
        let reserve = rent.minimum_balance(TREASURY_ACCOUNT_SIZE);

        assert_eq!(Treasury::prize_balance(reserve, &rent), 0);
        assert_eq!(Treasury::prize_balance(reserve + 30, &rent), 30);
        assert_eq!(Treasury::prize_balance(reserve - 1, &rent), 0);
    }
}

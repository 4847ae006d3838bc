//! Fee arithmetic for gift deposits.
//!
//! ## Rounding Policy
//!
//! All fee calculations use **floor (round-down)** rounding, so the
//! protocol never overcharges: any remainder from the percentage
//! division stays with the recipient rather than being collected as
//! fee. The invariant `fee + net == gross` holds for every split.
//!
//! Percentage fees apply only to fungible amounts. Unique items have no
//! divisible quantity to take a percentage of; they carry the schedule's
//! flat fee instead.

/// Percentage denominator (fees are configured in whole percent).
pub const PERCENT_DENOMINATOR: i128 = 100;

/// Maximum allowed percentage fee (100%).
pub const MAX_PERCENTAGE_FEE: u32 = 100;

/// Calculate a percentage fee using floor rounding.
///
/// `fee = floor(amount * percentage / 100)`
///
/// Returns 0 when `percentage` is 0 or on overflow.
pub fn percentage_fee(amount: i128, percentage: u32) -> i128 {
    if percentage == 0 {
        return 0;
    }
    amount
        .checked_mul(i128::from(percentage))
        .and_then(|x| x.checked_div(PERCENT_DENOMINATOR))
        .unwrap_or(0)
}

/// Split `amount` into `(fee, net)` where `fee + net == amount`.
///
/// Fee is floored; any remainder from division stays in `net`.
pub fn split_amount(amount: i128, percentage: u32) -> (i128, i128) {
    let fee = percentage_fee(amount, percentage);
    (fee, amount - fee)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_percent_of_one_hundred() {
        assert_eq!(percentage_fee(100, 3), 3);
        assert_eq!(split_amount(100, 3), (3, 97));
    }

    #[test]
    fn floors_toward_the_recipient() {
        // 99 * 3 / 100 = 2.97 -> 2
        assert_eq!(percentage_fee(99, 3), 2);
        assert_eq!(split_amount(99, 3), (2, 97));
    }

    #[test]
    fn zero_rate_is_free() {
        assert_eq!(percentage_fee(1_000_000, 0), 0);
        assert_eq!(split_amount(1_000_000, 0), (0, 1_000_000));
    }

    #[test]
    fn full_rate_consumes_everything() {
        assert_eq!(split_amount(250, MAX_PERCENTAGE_FEE), (250, 0));
    }

    #[test]
    fn overflow_collapses_to_zero_fee() {
        assert_eq!(percentage_fee(i128::MAX, 99), 0);
    }

    #[test]
    fn split_preserves_gross() {
        for amount in [1, 33, 97, 10_000, 1_234_567] {
            for pct in [0u32, 1, 3, 50, 99, 100] {
                let (fee, net) = split_amount(amount, pct);
                assert_eq!(fee + net, amount);
                assert!(fee >= 0);
                assert!(net >= 0);
            }
        }
    }
}

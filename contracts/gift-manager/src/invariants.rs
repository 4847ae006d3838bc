use crate::Gift;
use tokentide_core::kind::TokenKind;

/// Record-shape checks run before a gift is persisted.
pub(crate) fn assert_gift(gift: &Gift) {
    if gift.amount_or_id <= 0 {
        panic!("Invariant violated: amount must be positive");
    }
    if gift.fee < 0 {
        panic!("Invariant violated: fee must be non-negative");
    }
    if gift.kind == TokenKind::Fungible && gift.fee > gift.amount_or_id {
        panic!("Invariant violated: fee cannot exceed amount");
    }
    if gift.claimed {
        panic!("Invariant violated: a stored gift is never claimed");
    }
}

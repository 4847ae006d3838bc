use soroban_sdk::{contracttype, Address};

/// Behavioral classification of a token contract.
///
/// A classification is a permanent structural property of a contract:
/// once a non-`Unknown` kind has been recorded for an address it is
/// never re-derived or invalidated.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// No supported standard detected (or the address was never probed).
    Unknown,
    /// Interchangeable-unit asset addressed by quantity.
    Fungible,
    /// Unique item with one exclusive owner per identifier.
    UniqueSingleOwner,
    /// Unique item where each holder may own a quantity per identifier.
    UniqueMultiBalance,
}

/// Whether `address` can carry executable code.
///
/// Token contracts live at Soroban contract (`C...`) addresses; account
/// (`G...`) addresses never hold code, so probing them is pointless.
pub fn is_contract_address(address: &Address) -> bool {
    let strkey = address.to_string();
    if strkey.len() != 56 {
        return false;
    }
    let mut bytes = [0u8; 56];
    strkey.copy_into_slice(&mut bytes);
    bytes[0] == b'C'
}

/// Extracts a unique-item identifier from the dual-purpose amount/id slot.
///
/// Returns `None` when the value does not fit an item id (negative or
/// out of range).
pub fn token_id(amount_or_id: i128) -> Option<u64> {
    u64::try_from(amount_or_id).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Env};

    #[test]
    fn accepts_contract_address() {
        let env = Env::default();
        let contract_address = Address::generate(&env);
        assert!(is_contract_address(&contract_address));
    }

    #[test]
    fn rejects_account_address() {
        let env = Env::default();
        let issuer_admin = Address::generate(&env);
        let stellar_asset = env.register_stellar_asset_contract_v2(issuer_admin);
        let account_address = stellar_asset.issuer().address();

        assert!(!is_contract_address(&account_address));
    }

    #[test]
    fn token_id_conversion() {
        assert_eq!(token_id(7), Some(7));
        assert_eq!(token_id(0), Some(0));
        assert_eq!(token_id(-1), None);
        assert_eq!(token_id(i128::from(u64::MAX) + 1), None);
    }
}

#![no_std]
//! Mock token contracts for protocol tests.
//!
//! These contracts implement just enough of each token standard to
//! exercise the classifier's probes and the router's per-kind transfer
//! strategies, plus two deliberately awkward ones: a probe-counting
//! fungible token for cache-hit assertions and a reentrant token that
//! attacks the manager from inside its own transfer.

mod bare;
mod counting_fungible;
mod multi_token;
mod non_fungible;
mod reentrant_token;

pub use bare::{BareContract, BareContractClient};
pub use counting_fungible::{MockCountingFungible, MockCountingFungibleClient};
pub use multi_token::{MockMultiToken, MockMultiTokenClient};
pub use non_fungible::{MockNonFungible, MockNonFungibleClient};
pub use reentrant_token::{AttackPlan, MockReentrantToken, MockReentrantTokenClient};

#![no_std]
//! Shared building blocks for the TokenTide gifting protocol.
//!
//! The protocol spans four cooperating contracts — token classifier,
//! transfer router, gift vault, and gift manager — wired into a single
//! call chain. This crate holds the pieces every contract agrees on:
//! the token-kind model, the cross-contract client interfaces, fee
//! arithmetic, recipient commitment hashing, and the access-control and
//! reentrancy-guard middleware each contract checks at the top of its
//! entry points.

pub mod access;
pub mod fee_math;
pub mod interfaces;
pub mod kind;
pub mod reentrancy;
pub mod reveal;

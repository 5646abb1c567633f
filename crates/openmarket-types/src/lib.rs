//! # openmarket-types
//!
//! Shared types, hashing, signatures, errors, and configuration for the
//! **OpenMarket** exchange.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`Address`], [`OrderId`], [`TokenId`]
//! - **Order model**: [`SellOrder`], [`PayToken`], [`Amount`]
//! - **Domain hashing**: [`DomainSeparator`], [`order_id`]
//! - **Signatures**: [`Signature`], [`recover_signer`], [`sign_digest`]
//! - **Records**: [`Settlement`], [`MarketEvent`]
//! - **Call context**: [`CallContext`]
//! - **Configuration**: [`ExchangeConfig`]
//! - **Errors**: [`MarketError`] with `MK_ERR_` prefix codes, [`HostError`]
//! - **Constants**: fee basis points, domain defaults, signature lengths

pub mod config;
pub mod constants;
pub mod context;
pub mod domain;
pub mod error;
pub mod event;
pub mod ids;
pub mod order;
pub mod settlement;
pub mod signature;

// Re-export all primary types at crate root for ergonomic imports:
//   use openmarket_types::{SellOrder, Address, MarketError, ...};

pub use config::*;
pub use context::*;
pub use domain::{order_id, DomainSeparator};
pub use error::*;
pub use event::*;
pub use ids::*;
pub use order::*;
pub use settlement::*;
pub use signature::*;

// Constants are accessed via `openmarket_types::constants::FOO`
// (not re-exported to avoid name collisions).

//! # openmarket-settlement
//!
//! **Settlement plane** of a signed-order marketplace: verifies off-chain
//! sell orders and atomically swaps a unique asset for payment.
//!
//! ## Architecture
//!
//! An [`Exchange`] holds only protocol state (domain, owner configuration,
//! cancellation set, reentrancy lock). Asset ownership and balances live in
//! the [`Host`], which the caller passes into every mutating operation:
//!
//! - [`AssetRegistry`]: ownership, approvals, transfers
//! - [`PaymentLedger`]: fungible tokens and native currency
//! - [`EventSink`]: settlement, cancellation and admin events
//!
//! A settlement runs under a host checkpoint. Any rejected step restores it,
//! so either both legs of the swap happen or neither does.

pub mod access;
pub mod cancellation;
pub mod exchange;
pub mod host;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;
pub mod reentrancy;

pub use access::AccessControl;
pub use cancellation::CancellationRegistry;
pub use exchange::Exchange;
pub use host::{AssetRegistry, EventSink, Host, PaymentLedger};
#[cfg(any(test, feature = "test-helpers"))]
pub use memory::{InMemoryAssetRegistry, InMemoryHost, InMemoryPaymentLedger, NATIVE};
pub use reentrancy::{LockState, ReentrancyGuard};

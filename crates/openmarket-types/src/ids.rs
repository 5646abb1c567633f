//! Identifiers used throughout OpenMarket.
//!
//! Accounts, words and asset ids are the Ethereum primitives from
//! `alloy-primitives`, so they hash and serialize exactly as on chain.
//! None of them are random: an [`OrderId`] is derived from the order
//! contents, an [`Address`] from a public key.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::hex;
pub use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{MarketError, Result};

/// Identifier of a unique asset inside its collection (`uint256`).
pub type TokenId = U256;

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Deterministic order identity: the EIP-712 struct hash of a [`crate::SellOrder`].
///
/// Two orders with identical fields share one id, so re-signing the same
/// terms produces the same cancellable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderId(pub B256);

impl OrderId {
    #[must_use]
    pub fn as_b256(&self) -> &B256 {
        &self.0
    }

    /// First four bytes in hex, for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl From<B256> for OrderId {
    fn from(hash: B256) -> Self {
        Self(hash)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<B256>()
            .map(Self)
            .map_err(|e| MarketError::Serialization(format!("invalid order id: {e}")))
    }
}

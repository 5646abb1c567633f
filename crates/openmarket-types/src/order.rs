//! Sell order model.
//!
//! A [`SellOrder`] is an off-chain artifact: the seller builds it, signs its
//! digest, and hands both to whoever may buy. The exchange never stores an
//! order, only (possibly) its [`crate::OrderId`] in the cancellation set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, TokenId};

/// Payment amount in the pay token's smallest unit.
pub type Amount = u128;

/// What the buyer pays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayToken {
    /// The chain's native currency, attached as call value.
    Native,
    /// A fungible token pulled from the buyer via `transfer_from`.
    Token(Address),
}

impl PayToken {
    /// Interpret a raw address, treating the zero address as the native sentinel.
    #[must_use]
    pub fn from_address(address: Address) -> Self {
        if address.is_zero() {
            Self::Native
        } else {
            Self::Token(address)
        }
    }

    /// The address this pay token is hashed as.
    #[must_use]
    pub fn address(&self) -> Address {
        match self {
            Self::Native => Address::ZERO,
            Self::Token(token) => *token,
        }
    }

    #[must_use]
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }
}

impl std::fmt::Display for PayToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "NATIVE"),
            Self::Token(token) => write!(f, "{token}"),
        }
    }
}

/// A fixed-price offer to sell one unique asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SellOrder {
    /// Owner of the asset authorizing the sale.
    pub seller: Address,
    /// Collection the asset belongs to.
    pub asset_contract: Address,
    /// Asset within the collection.
    pub asset_id: TokenId,
    /// Payment currency.
    pub pay_token: PayToken,
    /// Total price in `pay_token` smallest units.
    pub price: Amount,
    /// Unix seconds. The order is unusable at or after this instant.
    pub deadline: u64,
}

impl SellOrder {
    /// `true` once `now` has reached the deadline (equality counts as expired).
    #[must_use]
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.deadline <= now
    }

    /// Deadline as a UTC timestamp, if representable.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.deadline)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Dummy orders for testing. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl SellOrder {
    /// Native-currency order for asset `asset_id` of a fixed test collection.
    pub fn dummy(seller: Address, asset_id: u64, price: Amount, deadline: u64) -> Self {
        Self {
            seller,
            asset_contract: Address::repeat_byte(0xc0),
            asset_id: TokenId::from(asset_id),
            pay_token: PayToken::Native,
            price,
            deadline,
        }
    }

    /// Same as [`SellOrder::dummy`] but priced in `token`.
    pub fn dummy_token(
        seller: Address,
        token: Address,
        asset_id: u64,
        price: Amount,
        deadline: u64,
    ) -> Self {
        Self {
            pay_token: PayToken::Token(token),
            ..Self::dummy(seller, asset_id, price, deadline)
        }
    }
}

//! Settlement records and fee arithmetic.
//!
//! A [`Settlement`] is the immutable record of one filled sell order: who
//! paid, who received, and how the price was split between seller and fee
//! recipient.

use serde::{Deserialize, Serialize};

use crate::constants::BASIS_POINTS_DENOMINATOR;
use crate::{Address, Amount, OrderId, PayToken, TokenId};

/// `floor(price * basis_points / 10_000)` without intermediate overflow.
///
/// Splitting `price` into quotient and remainder by the denominator keeps
/// every product within `u128` for any `basis_points <= 10_000`.
#[must_use]
pub fn fee_for(price: Amount, basis_points: u128) -> Amount {
    let whole = price / BASIS_POINTS_DENOMINATOR;
    let rest = price % BASIS_POINTS_DENOMINATOR;
    whole * basis_points + rest * basis_points / BASIS_POINTS_DENOMINATOR
}

/// The outcome of a successful settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub order_id: OrderId,
    pub seller: Address,
    pub buyer: Address,
    pub asset_contract: Address,
    pub asset_id: TokenId,
    pub pay_token: PayToken,
    /// Full order price paid by the buyer.
    pub price: Amount,
    /// Portion of `price` routed to the fee recipient.
    pub fee: Amount,
    /// Who received `fee`, if anything was charged.
    pub fee_recipient: Option<Address>,
}

impl Settlement {
    /// What the seller actually received.
    #[must_use]
    pub fn seller_proceeds(&self) -> Amount {
        self.price - self.fee
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Settlement[{}] {} -> {} asset {} for {} {} (fee {})",
            self.order_id.short(),
            self.seller,
            self.buyer,
            self.asset_id,
            self.price,
            self.pay_token,
            self.fee,
        )
    }
}

//! Records surfaced to observers.
//!
//! Every successful mutating call produces exactly one [`MarketEvent`].
//! Events are handed to the host's event sink inside the same atomic unit
//! as the state change, so a reverted call never leaves an event behind.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, OrderId};

/// An observable state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A sell order was filled.
    OrderSettled {
        order_id: OrderId,
        buyer: Address,
        fee: Amount,
    },
    /// A seller cancelled an order.
    OrderCancelled { order_id: OrderId },
    /// The owner changed the fee recipient. `None` disables the fee.
    FeeRecipientChanged { recipient: Option<Address> },
    /// The owner changed the allow-list authority.
    AllowListSignerChanged { signer: Address },
}

impl MarketEvent {
    /// The order this event concerns, if any.
    #[must_use]
    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            Self::OrderSettled { order_id, .. } | Self::OrderCancelled { order_id } => {
                Some(*order_id)
            }
            Self::FeeRecipientChanged { .. } | Self::AllowListSignerChanged { .. } => None,
        }
    }
}

impl std::fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrderSettled { .. } => write!(f, "ORDER_SETTLED"),
            Self::OrderCancelled { .. } => write!(f, "ORDER_CANCELLED"),
            Self::FeeRecipientChanged { .. } => write!(f, "FEE_RECIPIENT_CHANGED"),
            Self::AllowListSignerChanged { .. } => write!(f, "ALLOW_LIST_SIGNER_CHANGED"),
        }
    }
}

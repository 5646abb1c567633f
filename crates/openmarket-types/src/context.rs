//! Per-call execution context supplied by the host.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{Address, Amount};

/// Who is calling, with how much attached value, at what time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// The calling identity (buyer, seller, or owner depending on the call).
    pub caller: Address,
    /// Native currency attached to the call.
    pub value: Amount,
    /// Current time in unix seconds.
    pub timestamp: u64,
}

impl CallContext {
    #[must_use]
    pub fn new(caller: Address, value: Amount, timestamp: u64) -> Self {
        Self {
            caller,
            value,
            timestamp,
        }
    }

    /// Context stamped with the wall clock.
    #[must_use]
    pub fn now(caller: Address, value: Amount) -> Self {
        let timestamp = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
        Self::new(caller, value, timestamp)
    }

    /// Same context with no value attached.
    #[must_use]
    pub fn without_value(self) -> Self {
        Self { value: 0, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_recent() {
        let ctx = CallContext::now(Address::repeat_byte(1), 5);
        assert!(ctx.timestamp > 1_600_000_000);
        assert_eq!(ctx.value, 5);
    }

    #[test]
    fn without_value_clears_value() {
        let ctx = CallContext::new(Address::repeat_byte(1), 5, 10).without_value();
        assert_eq!(ctx.value, 0);
        assert_eq!(ctx.timestamp, 10);
    }
}

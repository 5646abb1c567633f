//! Single-owner access control for exchange configuration.
//!
//! One owner identity is fixed at construction. It alone may change the
//! fee recipient and the allow-list signer. There is no role hierarchy and
//! no ownership transfer; each privileged call is a flat equality check.

use openmarket_types::{Address, MarketError, Result};

/// Owner-gated mutable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControl {
    owner: Address,
    fee_recipient: Option<Address>,
    allow_list_signer: Option<Address>,
}

impl AccessControl {
    #[must_use]
    pub fn new(
        owner: Address,
        fee_recipient: Option<Address>,
        allow_list_signer: Option<Address>,
    ) -> Self {
        Self {
            owner,
            fee_recipient: fee_recipient.filter(|r| !r.is_zero()),
            allow_list_signer: allow_list_signer.filter(|s| !s.is_zero()),
        }
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    #[must_use]
    pub fn fee_recipient(&self) -> Option<Address> {
        self.fee_recipient
    }

    #[must_use]
    pub fn allow_list_signer(&self) -> Option<Address> {
        self.allow_list_signer
    }

    /// Fail with [`MarketError::Unauthorized`] unless `caller` is the owner.
    pub fn ensure_owner(&self, caller: &Address) -> Result<()> {
        if *caller != self.owner {
            return Err(MarketError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    /// Replace the fee recipient. The zero address clears it, which turns
    /// the fee off. Returns the new value.
    pub fn set_fee_recipient(
        &mut self,
        caller: &Address,
        recipient: Address,
    ) -> Result<Option<Address>> {
        self.ensure_owner(caller)?;
        let next = Some(recipient).filter(|r| !r.is_zero());
        if next == self.fee_recipient {
            return Err(MarketError::InvalidConfiguration {
                reason: format!("fee recipient already {recipient}"),
            });
        }
        self.fee_recipient = next;
        Ok(next)
    }

    /// Replace the allow-list signer. The zero address is rejected.
    pub fn set_allow_list_signer(&mut self, caller: &Address, signer: Address) -> Result<()> {
        self.ensure_owner(caller)?;
        if signer.is_zero() {
            return Err(MarketError::InvalidConfiguration {
                reason: "allow-list signer cannot be the zero address".into(),
            });
        }
        if self.allow_list_signer == Some(signer) {
            return Err(MarketError::InvalidConfiguration {
                reason: format!("allow-list signer already {signer}"),
            });
        }
        self.allow_list_signer = Some(signer);
        Ok(())
    }
}

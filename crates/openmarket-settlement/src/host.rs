//! Capability interfaces the exchange calls into.
//!
//! The exchange owns no balances and no assets. Ownership, approvals and
//! transfers belong to the asset registry; fungible and native balances to
//! the payment ledger; observers to the event sink. The [`Host`] bundles
//! all three and adds checkpoint / revert so one settlement is all-or-nothing.

use openmarket_types::{Address, Amount, HostError, MarketEvent, TokenId};

/// Registry of unique assets (ERC-721 shaped).
pub trait AssetRegistry {
    /// Current owner of `(collection, id)`, if the asset exists.
    fn owner_of(&self, collection: &Address, id: &TokenId) -> Option<Address>;

    /// Address approved to move this specific asset, if any.
    fn get_approved(&self, collection: &Address, id: &TokenId) -> Option<Address>;

    /// Whether `operator` may move every asset `owner` holds in `collection`.
    fn is_approved_for_all(
        &self,
        collection: &Address,
        owner: &Address,
        operator: &Address,
    ) -> bool;

    /// Move `id` from `from` to `to`, acting as `operator`.
    fn safe_transfer_from(
        &mut self,
        collection: &Address,
        operator: &Address,
        from: &Address,
        to: &Address,
        id: &TokenId,
    ) -> Result<(), HostError>;
}

/// Ledger of fungible tokens and native currency.
pub trait PaymentLedger {
    /// Move `amount` of `token` from `from` to `to` using `spender`'s allowance.
    fn transfer_from(
        &mut self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), HostError>;

    /// Move `amount` of native currency from `from` to `to`.
    fn send_value(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), HostError>;
}

/// Destination for settlement, cancellation and configuration records.
pub trait EventSink {
    fn emit(&mut self, event: MarketEvent);
}

/// Transactional host: everything the exchange needs for one call.
pub trait Host: AssetRegistry + PaymentLedger + EventSink {
    /// Opaque restore point.
    type Checkpoint;

    /// Capture the current collaborator state.
    fn checkpoint(&self) -> Self::Checkpoint;

    /// Discard every effect since `checkpoint` was taken.
    fn revert_to(&mut self, checkpoint: Self::Checkpoint);
}

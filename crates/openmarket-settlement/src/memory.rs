//! In-memory host for tests and simulations. **Never use in production.**
//!
//! - [`InMemoryAssetRegistry`]: owners, per-asset approvals, operators
//! - [`InMemoryPaymentLedger`]: token and native balances, allowances,
//!   per-token supply tracking
//! - [`InMemoryHost`]: both of the above plus an event log; a checkpoint is
//!   a full clone
//!
//! Supply invariant checked by [`InMemoryPaymentLedger::verify_supply`]:
//! ```text
//! ∀ token: Σ balances == Σ minted
//! ```
//! Settlement only moves balances, so it must never break this.

use std::collections::{HashMap, HashSet};

use openmarket_types::{Address, Amount, HostError, MarketEvent, TokenId};

use crate::host::{AssetRegistry, EventSink, Host, PaymentLedger};

/// Ledger key used for native currency balances.
pub const NATIVE: Address = Address::ZERO;

// ═══════════════════════════════════════════════════════════════════
// Asset registry
// ═══════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetRegistry {
    owners: HashMap<(Address, TokenId), Address>,
    approvals: HashMap<(Address, TokenId), Address>,
    /// `(collection, owner, operator)`
    operators: HashSet<(Address, Address, Address)>,
}

impl InMemoryAssetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or overwrite) an asset owned by `owner`.
    pub fn mint(&mut self, collection: Address, id: TokenId, owner: Address) {
        self.owners.insert((collection, id), owner);
        self.approvals.remove(&(collection, id));
    }

    /// Approve `approved` for one asset.
    pub fn approve(&mut self, collection: Address, id: TokenId, approved: Address) {
        self.approvals.insert((collection, id), approved);
    }

    /// Grant or revoke `operator` over all of `owner`'s assets in `collection`.
    pub fn set_approval_for_all(
        &mut self,
        collection: Address,
        owner: Address,
        operator: Address,
        approved: bool,
    ) {
        if approved {
            self.operators.insert((collection, owner, operator));
        } else {
            self.operators.remove(&(collection, owner, operator));
        }
    }
}

impl AssetRegistry for InMemoryAssetRegistry {
    fn owner_of(&self, collection: &Address, id: &TokenId) -> Option<Address> {
        self.owners.get(&(*collection, *id)).copied()
    }

    fn get_approved(&self, collection: &Address, id: &TokenId) -> Option<Address> {
        self.approvals.get(&(*collection, *id)).copied()
    }

    fn is_approved_for_all(
        &self,
        collection: &Address,
        owner: &Address,
        operator: &Address,
    ) -> bool {
        self.operators.contains(&(*collection, *owner, *operator))
    }

    fn safe_transfer_from(
        &mut self,
        collection: &Address,
        operator: &Address,
        from: &Address,
        to: &Address,
        id: &TokenId,
    ) -> Result<(), HostError> {
        let owner = self
            .owner_of(collection, id)
            .ok_or_else(|| HostError::Rejected(format!("asset {id} does not exist")))?;
        if owner != *from {
            return Err(HostError::Rejected(format!("{from} does not own asset {id}")));
        }
        if to.is_zero() {
            return Err(HostError::Rejected("transfer to the zero address".into()));
        }
        let authorized = operator == from
            || self.get_approved(collection, id) == Some(*operator)
            || self.is_approved_for_all(collection, from, operator);
        if !authorized {
            return Err(HostError::NotAuthorized {
                operator: *operator,
            });
        }
        self.approvals.remove(&(*collection, *id));
        self.owners.insert((*collection, *id), *to);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════
// Payment ledger
// ═══════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentLedger {
    /// `(token, holder)`; native currency uses [`NATIVE`].
    balances: HashMap<(Address, Address), Amount>,
    /// `(token, owner, spender)`
    allowances: HashMap<(Address, Address, Address), Amount>,
    /// Total minted per token since genesis.
    minted: HashMap<Address, Amount>,
    /// Accounts that refuse incoming native transfers.
    refuses_native: HashSet<Address>,
}

impl InMemoryPaymentLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` of `token` to `holder`.
    pub fn mint(&mut self, token: Address, holder: Address, amount: Amount) {
        *self.balances.entry((token, holder)).or_default() += amount;
        *self.minted.entry(token).or_default() += amount;
    }

    /// Credit native currency to `holder`.
    pub fn deal_native(&mut self, holder: Address, amount: Amount) {
        self.mint(NATIVE, holder, amount);
    }

    /// Set `spender`'s allowance over `owner`'s `token`.
    pub fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((token, owner, spender), amount);
    }

    /// Make `account` reject native transfers, like a contract without a
    /// payable fallback.
    pub fn refuse_native(&mut self, account: Address) {
        self.refuses_native.insert(account);
    }

    #[must_use]
    pub fn balance_of(&self, token: &Address, holder: &Address) -> Amount {
        self.balances.get(&(*token, *holder)).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn native_balance(&self, holder: &Address) -> Amount {
        self.balance_of(&NATIVE, holder)
    }

    #[must_use]
    pub fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*token, *owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    /// Check `Σ balances == Σ minted` for `token`.
    pub fn verify_supply(&self, token: &Address) -> Result<(), HostError> {
        let expected = self.minted.get(token).copied().unwrap_or(0);
        let actual: Amount = self
            .balances
            .iter()
            .filter(|((t, _), _)| t == token)
            .map(|(_, amount)| *amount)
            .sum();
        if actual != expected {
            return Err(HostError::Rejected(format!(
                "supply of {token}: actual {actual} != minted {expected}"
            )));
        }
        Ok(())
    }

    fn move_balance(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), HostError> {
        let available = self.balance_of(&token, &from);
        if available < amount {
            return Err(HostError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        self.balances.insert((token, from), available - amount);
        *self.balances.entry((token, to)).or_default() += amount;
        Ok(())
    }
}

impl PaymentLedger for InMemoryPaymentLedger {
    fn transfer_from(
        &mut self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), HostError> {
        let allowed = self.allowance(token, from, spender);
        if allowed < amount {
            return Err(HostError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }
        self.move_balance(*token, *from, *to, amount)?;
        self.allowances.insert((*token, *from, *spender), allowed - amount);
        Ok(())
    }

    fn send_value(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), HostError> {
        if self.refuses_native.contains(to) {
            return Err(HostError::Rejected(format!("{to} refuses native transfers")));
        }
        self.move_balance(NATIVE, *from, *to, amount)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Host
// ═══════════════════════════════════════════════════════════════════

/// Registry + ledger + event log with clone-based checkpoints.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    pub assets: InMemoryAssetRegistry,
    pub payments: InMemoryPaymentLedger,
    pub events: Vec<MarketEvent>,
}

impl InMemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent event, if any.
    #[must_use]
    pub fn last_event(&self) -> Option<&MarketEvent> {
        self.events.last()
    }
}

impl AssetRegistry for InMemoryHost {
    fn owner_of(&self, collection: &Address, id: &TokenId) -> Option<Address> {
        self.assets.owner_of(collection, id)
    }

    fn get_approved(&self, collection: &Address, id: &TokenId) -> Option<Address> {
        self.assets.get_approved(collection, id)
    }

    fn is_approved_for_all(
        &self,
        collection: &Address,
        owner: &Address,
        operator: &Address,
    ) -> bool {
        self.assets.is_approved_for_all(collection, owner, operator)
    }

    fn safe_transfer_from(
        &mut self,
        collection: &Address,
        operator: &Address,
        from: &Address,
        to: &Address,
        id: &TokenId,
    ) -> Result<(), HostError> {
        self.assets.safe_transfer_from(collection, operator, from, to, id)
    }
}

impl PaymentLedger for InMemoryHost {
    fn transfer_from(
        &mut self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), HostError> {
        self.payments.transfer_from(token, spender, from, to, amount)
    }

    fn send_value(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), HostError> {
        self.payments.send_value(from, to, amount)
    }
}

impl EventSink for InMemoryHost {
    fn emit(&mut self, event: MarketEvent) {
        self.events.push(event);
    }
}

impl EventSink for Vec<MarketEvent> {
    fn emit(&mut self, event: MarketEvent) {
        self.push(event);
    }
}

impl Host for InMemoryHost {
    type Checkpoint = Self;

    fn checkpoint(&self) -> Self {
        self.clone()
    }

    fn revert_to(&mut self, checkpoint: Self) {
        *self = checkpoint;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLECTION: Address = Address::repeat_byte(0xc0);
    const TOKEN: Address = Address::repeat_byte(0x70);
    const ALICE: Address = Address::repeat_byte(0xa1);
    const BOB: Address = Address::repeat_byte(0xb0);
    const OPERATOR: Address = Address::repeat_byte(0x0e);

    fn id() -> TokenId {
        TokenId::from(1u64)
    }

    #[test]
    fn owner_can_transfer_own_asset() {
        let mut reg = InMemoryAssetRegistry::new();
        reg.mint(COLLECTION, id(), ALICE);
        reg.safe_transfer_from(&COLLECTION, &ALICE, &ALICE, &BOB, &id()).unwrap();
        assert_eq!(reg.owner_of(&COLLECTION, &id()), Some(BOB));
    }

    #[test]
    fn unapproved_operator_rejected() {
        let mut reg = InMemoryAssetRegistry::new();
        reg.mint(COLLECTION, id(), ALICE);
        let err = reg
            .safe_transfer_from(&COLLECTION, &OPERATOR, &ALICE, &BOB, &id())
            .unwrap_err();
        assert!(matches!(err, HostError::NotAuthorized { .. }));
    }

    #[test]
    fn approval_is_cleared_on_transfer() {
        let mut reg = InMemoryAssetRegistry::new();
        reg.mint(COLLECTION, id(), ALICE);
        reg.approve(COLLECTION, id(), OPERATOR);
        reg.safe_transfer_from(&COLLECTION, &OPERATOR, &ALICE, &BOB, &id()).unwrap();
        assert_eq!(reg.get_approved(&COLLECTION, &id()), None);
    }

    #[test]
    fn operator_approval_toggles() {
        let mut reg = InMemoryAssetRegistry::new();
        reg.set_approval_for_all(COLLECTION, ALICE, OPERATOR, true);
        assert!(reg.is_approved_for_all(&COLLECTION, &ALICE, &OPERATOR));
        reg.set_approval_for_all(COLLECTION, ALICE, OPERATOR, false);
        assert!(!reg.is_approved_for_all(&COLLECTION, &ALICE, &OPERATOR));
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let mut ledger = InMemoryPaymentLedger::new();
        ledger.mint(TOKEN, ALICE, 100);
        ledger.approve(TOKEN, ALICE, OPERATOR, 60);
        ledger.transfer_from(&TOKEN, &OPERATOR, &ALICE, &BOB, 40).unwrap();
        assert_eq!(ledger.balance_of(&TOKEN, &ALICE), 60);
        assert_eq!(ledger.balance_of(&TOKEN, &BOB), 40);
        assert_eq!(ledger.allowance(&TOKEN, &ALICE, &OPERATOR), 20);
        ledger.verify_supply(&TOKEN).unwrap();
    }

    #[test]
    fn transfer_from_insufficient_allowance() {
        let mut ledger = InMemoryPaymentLedger::new();
        ledger.mint(TOKEN, ALICE, 100);
        ledger.approve(TOKEN, ALICE, OPERATOR, 10);
        let err = ledger
            .transfer_from(&TOKEN, &OPERATOR, &ALICE, &BOB, 40)
            .unwrap_err();
        assert!(matches!(err, HostError::InsufficientAllowance { needed: 40, available: 10 }));
    }

    #[test]
    fn send_value_insufficient_balance() {
        let mut ledger = InMemoryPaymentLedger::new();
        ledger.deal_native(ALICE, 5);
        let err = ledger.send_value(&ALICE, &BOB, 6).unwrap_err();
        assert!(matches!(err, HostError::InsufficientBalance { .. }));
    }

    #[test]
    fn refusing_account_rejects_native() {
        let mut ledger = InMemoryPaymentLedger::new();
        ledger.deal_native(ALICE, 5);
        ledger.refuse_native(BOB);
        assert!(ledger.send_value(&ALICE, &BOB, 1).is_err());
        assert_eq!(ledger.native_balance(&ALICE), 5);
    }

    #[test]
    fn host_checkpoint_reverts_everything() {
        let mut host = InMemoryHost::new();
        host.assets.mint(COLLECTION, id(), ALICE);
        host.payments.deal_native(BOB, 10);
        let checkpoint = host.checkpoint();

        host.safe_transfer_from(&COLLECTION, &ALICE, &ALICE, &BOB, &id()).unwrap();
        host.send_value(&BOB, &ALICE, 10).unwrap();
        host.emit(MarketEvent::FeeRecipientChanged { recipient: None });

        host.revert_to(checkpoint);
        assert_eq!(host.owner_of(&COLLECTION, &id()), Some(ALICE));
        assert_eq!(host.payments.native_balance(&BOB), 10);
        assert!(host.events.is_empty());
    }
}

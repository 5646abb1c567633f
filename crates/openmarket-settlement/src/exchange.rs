//! Settlement engine.
//!
//! Validates a signed [`SellOrder`] and swaps the asset for payment in one
//! atomic unit:
//! 1. Allow-list pass (gated entry point only)
//! 2. Order not cancelled
//! 3. Signature recovers to the seller
//! 4. Deadline strictly in the future
//! 5. Seller still owns the asset
//! 6. Exchange approved to move it
//! 7. Asset leg: seller → buyer
//! 8. Fee: gated and fee recipient set → 30 bp, otherwise zero
//! 9. Payment leg: buyer → seller (and fee recipient)
//! 10. `OrderSettled` event
//!
//! The first failing step aborts the call. A host checkpoint taken before
//! step 1 is restored on any failure, so a failed payment leg also undoes
//! the asset leg.

use openmarket_types::constants::FEE_BASIS_POINTS;
use openmarket_types::{
    fee_for, order_id, recover_signer, Address, Amount, CallContext, DomainSeparator,
    ExchangeConfig, HostError, MarketError, MarketEvent, OrderId, PayToken, Result, SellOrder,
    Settlement, B256,
};
use tracing::{debug, info, warn};

use crate::access::AccessControl;
use crate::cancellation::CancellationRegistry;
use crate::host::{EventSink, Host};
use crate::reentrancy::ReentrancyGuard;

fn payment_failed(err: HostError) -> MarketError {
    MarketError::PaymentTransferFailed {
        reason: err.to_string(),
    }
}

/// One exchange deployment: its domain, configuration and cancellation set.
#[derive(Debug)]
pub struct Exchange {
    domain: DomainSeparator,
    access: AccessControl,
    cancellations: CancellationRegistry,
    guard: ReentrancyGuard,
}

impl Exchange {
    /// Protocol fee charged on allow-listed settlements.
    pub const FEE_BASIS_POINTS: u128 = FEE_BASIS_POINTS;

    /// Deploy an exchange owned by `owner`.
    ///
    /// # Errors
    /// `Configuration` if the config fails validation or `owner` is zero.
    pub fn new(config: &ExchangeConfig, owner: Address) -> Result<Self> {
        config.validate()?;
        if owner.is_zero() {
            return Err(MarketError::Configuration(
                "owner must not be the zero address".into(),
            ));
        }
        Ok(Self {
            domain: config.domain(),
            access: AccessControl::new(owner, config.fee_recipient, config.allow_list_signer),
            cancellations: CancellationRegistry::new(),
            guard: ReentrancyGuard::new(),
        })
    }

    // -----------------------------------------------------------------
    // Read-only queries
    // -----------------------------------------------------------------

    /// This deployment's address: the operator sellers approve and the
    /// spender buyers grant allowances to.
    #[must_use]
    pub fn address(&self) -> Address {
        self.domain.verifying_contract
    }

    #[must_use]
    pub fn domain(&self) -> &DomainSeparator {
        &self.domain
    }

    /// Precomputed EIP-712 domain separator.
    #[must_use]
    pub fn domain_separator(&self) -> B256 {
        *self.domain.separator()
    }

    #[must_use]
    pub fn order_id(&self, order: &SellOrder) -> OrderId {
        order_id(order)
    }

    /// Digest the seller must sign for `order`.
    #[must_use]
    pub fn signing_digest(&self, order: &SellOrder) -> B256 {
        self.domain.signing_digest(order)
    }

    /// Digest the allow-list signer must sign to admit `user`.
    #[must_use]
    pub fn allow_list_digest(&self, user: &Address) -> B256 {
        self.domain.allow_list_digest(user)
    }

    #[must_use]
    pub fn is_cancelled(&self, order_id: &OrderId) -> bool {
        self.cancellations.is_cancelled(order_id)
    }

    #[must_use]
    pub fn cancellations(&self) -> &CancellationRegistry {
        &self.cancellations
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    #[must_use]
    pub fn fee_recipient(&self) -> Option<Address> {
        self.access.fee_recipient()
    }

    #[must_use]
    pub fn allow_list_signer(&self) -> Option<Address> {
        self.access.allow_list_signer()
    }

    /// Fee an allow-listed buyer would pay on `price` right now.
    #[must_use]
    pub fn fee_for(&self, price: Amount) -> Amount {
        match self.access.fee_recipient() {
            Some(_) => fee_for(price, Self::FEE_BASIS_POINTS),
            None => 0,
        }
    }

    // -----------------------------------------------------------------
    // Settlement
    // -----------------------------------------------------------------

    /// Ungated settlement. No allow-list pass, and no fee is charged.
    pub fn settle<H: Host>(
        &mut self,
        host: &mut H,
        ctx: CallContext,
        order: &SellOrder,
        signature: &[u8],
    ) -> Result<Settlement> {
        self.locked("settle", |ex| {
            ex.atomically(host, |ex, host| ex.execute(host, &ctx, order, signature, None))
        })
    }

    /// Allow-listed settlement. Requires a pass for `ctx.caller` signed by
    /// the allow-list signer; charges the protocol fee when a fee recipient
    /// is configured. The open [`Exchange::settle`] path never charges one.
    pub fn settle_allow_listed<H: Host>(
        &mut self,
        host: &mut H,
        ctx: CallContext,
        order: &SellOrder,
        signature: &[u8],
        allow_list_proof: Option<&[u8]>,
    ) -> Result<Settlement> {
        self.locked("settle_allow_listed", |ex| {
            ex.atomically(host, |ex, host| {
                ex.verify_allow_list(&ctx.caller, allow_list_proof)?;
                let recipient = ex.access.fee_recipient();
                ex.execute(host, &ctx, order, signature, recipient)
            })
        })
    }

    /// Seller-only cancellation. The signature must recover to the seller
    /// and the caller must be the seller. Cancelling twice is harmless.
    pub fn cancel<E: EventSink>(
        &mut self,
        events: &mut E,
        ctx: CallContext,
        order: &SellOrder,
        signature: &[u8],
    ) -> Result<OrderId> {
        self.locked("cancel", |ex| {
            ex.verify_seller_signature(order, signature)?;
            debug!(seller = %order.seller, "cancellation signature accepted");
            if ctx.caller != order.seller {
                return Err(MarketError::NotSeller {
                    caller: ctx.caller,
                    seller: order.seller,
                });
            }
            let id = order_id(order);
            ex.cancellations.cancel(id);
            events.emit(MarketEvent::OrderCancelled { order_id: id });
            info!(order_id = %id.short(), seller = %order.seller, "order cancelled");
            Ok(id)
        })
    }

    // -----------------------------------------------------------------
    // Administration
    // -----------------------------------------------------------------

    /// Owner-only. The zero address clears the recipient and turns the fee off.
    pub fn set_fee_recipient<E: EventSink>(
        &mut self,
        events: &mut E,
        caller: &Address,
        recipient: Address,
    ) -> Result<()> {
        self.locked("set_fee_recipient", |ex| {
            let recipient = ex.access.set_fee_recipient(caller, recipient)?;
            events.emit(MarketEvent::FeeRecipientChanged { recipient });
            info!(?recipient, "fee recipient changed");
            Ok(())
        })
    }

    /// Owner-only. Rejects the zero address and the current value.
    pub fn set_allow_list_signer<E: EventSink>(
        &mut self,
        events: &mut E,
        caller: &Address,
        signer: Address,
    ) -> Result<()> {
        self.locked("set_allow_list_signer", |ex| {
            ex.access.set_allow_list_signer(caller, signer)?;
            events.emit(MarketEvent::AllowListSignerChanged { signer });
            info!(%signer, "allow-list signer changed");
            Ok(())
        })
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    /// Run `f` under the reentrancy lock, logging rejections.
    ///
    /// The guard is defensive: `&mut self` already rules out re-entry unless a
    /// host shares the engine through interior mutability.
    fn locked<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.guard.enter()?;
        let outcome = f(self);
        self.guard.exit();
        if let Err(err) = &outcome {
            warn!(operation, error = %err, "request rejected");
        }
        outcome
    }

    /// Run `f` against `host`, reverting every collaborator effect on error.
    fn atomically<H: Host, T>(
        &mut self,
        host: &mut H,
        f: impl FnOnce(&mut Self, &mut H) -> Result<T>,
    ) -> Result<T> {
        let checkpoint = host.checkpoint();
        let outcome = f(self, host);
        if outcome.is_err() {
            host.revert_to(checkpoint);
        }
        outcome
    }

    fn verify_allow_list(&self, caller: &Address, proof: Option<&[u8]>) -> Result<()> {
        let authority = self
            .access
            .allow_list_signer()
            .ok_or(MarketError::AllowListDisabled)?;
        let proof = proof.ok_or(MarketError::NotWhitelisted(*caller))?;
        let digest = self.domain.allow_list_digest(caller);
        match recover_signer(&digest, proof) {
            Ok(signer) if signer == authority => {
                debug!(%caller, "allow-list pass accepted");
                Ok(())
            }
            _ => Err(MarketError::NotWhitelisted(*caller)),
        }
    }

    fn verify_seller_signature(&self, order: &SellOrder, signature: &[u8]) -> Result<()> {
        let digest = self.domain.signing_digest(order);
        let signer = recover_signer(&digest, signature)?;
        if signer != order.seller {
            return Err(MarketError::InvalidSignature {
                reason: format!("recovered {signer}, expected seller {}", order.seller),
            });
        }
        Ok(())
    }

    fn execute<H: Host>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        order: &SellOrder,
        signature: &[u8],
        fee_recipient: Option<Address>,
    ) -> Result<Settlement> {
        let id = order_id(order);
        self.cancellations.ensure_open(&id)?;

        self.verify_seller_signature(order, signature)?;

        if order.is_expired_at(ctx.timestamp) {
            return Err(MarketError::OrderExpired {
                deadline: order.deadline,
                now: ctx.timestamp,
            });
        }

        let collection = &order.asset_contract;
        if host.owner_of(collection, &order.asset_id) != Some(order.seller) {
            return Err(MarketError::NotOwner {
                seller: order.seller,
            });
        }

        let operator = self.address();
        let approved = host.get_approved(collection, &order.asset_id) == Some(operator)
            || host.is_approved_for_all(collection, &order.seller, &operator);
        if !approved {
            return Err(MarketError::NotApproved);
        }
        debug!(order_id = %id.short(), "order validated");

        host.safe_transfer_from(collection, &operator, &order.seller, &ctx.caller, &order.asset_id)
            .map_err(|e| MarketError::AssetTransferFailed {
                reason: e.to_string(),
            })?;

        let fee = match fee_recipient {
            Some(_) => fee_for(order.price, Self::FEE_BASIS_POINTS),
            None => 0,
        };
        let fee_recipient = fee_recipient.filter(|_| fee > 0);
        self.pay(host, ctx, order, fee, fee_recipient)?;

        host.emit(MarketEvent::OrderSettled {
            order_id: id,
            buyer: ctx.caller,
            fee,
        });

        let settlement = Settlement {
            order_id: id,
            seller: order.seller,
            buyer: ctx.caller,
            asset_contract: order.asset_contract,
            asset_id: order.asset_id,
            pay_token: order.pay_token,
            price: order.price,
            fee,
            fee_recipient,
        };
        info!(%settlement, "order settled");
        Ok(settlement)
    }

    /// Payment leg. `fee_recipient` is `Some` only when `fee > 0`.
    fn pay<H: Host>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        order: &SellOrder,
        fee: Amount,
        fee_recipient: Option<Address>,
    ) -> Result<()> {
        let expected = if order.pay_token.is_native() {
            order.price
        } else {
            0
        };
        if ctx.value != expected {
            return Err(MarketError::WrongPaymentAmount {
                expected,
                attached: ctx.value,
            });
        }
        self.move_payment(host, &ctx.caller, order, fee, fee_recipient)
            .map_err(payment_failed)
    }

    fn move_payment<H: Host>(
        &self,
        host: &mut H,
        buyer: &Address,
        order: &SellOrder,
        fee: Amount,
        fee_recipient: Option<Address>,
    ) -> std::result::Result<(), HostError> {
        let exchange = self.address();
        let proceeds = order.price - fee;
        match order.pay_token {
            PayToken::Native => {
                // Attached value lands in the deployment before it is pushed out.
                host.send_value(buyer, &exchange, order.price)?;
                host.send_value(&exchange, &order.seller, proceeds)?;
                if let Some(recipient) = fee_recipient {
                    host.send_value(&exchange, &recipient, fee)?;
                }
            }
            PayToken::Token(token) => {
                host.transfer_from(&token, &exchange, buyer, &order.seller, proceeds)?;
                if let Some(recipient) = fee_recipient {
                    host.transfer_from(&token, &exchange, buyer, &recipient, fee)?;
                }
            }
        }
        Ok(())
    }
}

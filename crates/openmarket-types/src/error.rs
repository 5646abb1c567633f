//! Error types for the OpenMarket exchange.
//!
//! All errors use the `MK_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order lifecycle errors
//! - 2xx: Signature / authorization errors
//! - 3xx: Asset leg errors
//! - 4xx: Payment leg errors
//! - 5xx: Allow-list and administrative errors
//! - 9xx: General / internal errors
//!
//! None of these are retried internally. Each one rejects the request and
//! leaves state untouched; the caller fixes the input and resubmits.

use thiserror::Error;

use crate::{Address, Amount, OrderId};

/// Central error enum for all OpenMarket operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The order id is in the cancellation set.
    #[error("MK_ERR_100: Order cancelled: {0}")]
    OrderCancelled(OrderId),

    /// The order deadline is at or before the current time.
    #[error("MK_ERR_101: Order expired: deadline {deadline}, now {now}")]
    OrderExpired { deadline: u64, now: u64 },

    // =================================================================
    // Signature Errors (2xx)
    // =================================================================
    /// The signature is malformed or does not recover to the expected party.
    #[error("MK_ERR_200: Invalid signature: {reason}")]
    InvalidSignature { reason: String },

    /// A cancellation was submitted by someone other than the seller.
    #[error("MK_ERR_201: Caller {caller} is not the seller {seller}")]
    NotSeller { caller: Address, seller: Address },

    // =================================================================
    // Asset Errors (3xx)
    // =================================================================
    /// The seller no longer owns the asset.
    #[error("MK_ERR_300: Seller {seller} does not own the asset")]
    NotOwner { seller: Address },

    /// The exchange is neither approved for the asset nor an operator for the seller.
    #[error("MK_ERR_301: Exchange not approved to move the asset")]
    NotApproved,

    /// The asset registry rejected the transfer.
    #[error("MK_ERR_302: Asset transfer failed: {reason}")]
    AssetTransferFailed { reason: String },

    // =================================================================
    // Payment Errors (4xx)
    // =================================================================
    /// The attached native value does not match what the order requires.
    #[error("MK_ERR_400: Wrong payment amount: expected {expected}, attached {attached}")]
    WrongPaymentAmount { expected: Amount, attached: Amount },

    /// A payment leg (seller proceeds or fee) failed.
    #[error("MK_ERR_401: Payment transfer failed: {reason}")]
    PaymentTransferFailed { reason: String },

    // =================================================================
    // Allow-list / Admin Errors (5xx)
    // =================================================================
    /// The allow-list proof is missing or was not issued by the allow-list signer.
    #[error("MK_ERR_500: Caller {0} is not allow-listed")]
    NotWhitelisted(Address),

    /// No allow-list signer is configured, so the gated entry point is closed.
    #[error("MK_ERR_501: Allow-list entry point disabled")]
    AllowListDisabled,

    /// A privileged operation was attempted by someone other than the owner.
    #[error("MK_ERR_502: Unauthorized: {caller} is not the owner")]
    Unauthorized { caller: Address },

    /// An administrative update was a no-op or used an invalid value.
    #[error("MK_ERR_503: Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// A mutating entry point was entered while another was in progress.
    #[error("MK_ERR_900: Reentrant call rejected")]
    Reentrancy,

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("MK_ERR_901: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("MK_ERR_902: Serialization error: {0}")]
    Serialization(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MarketError>;

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Failure reported by an external collaborator (asset registry, payment ledger).
///
/// The settlement engine wraps these into the matching [`MarketError`] leg.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    #[error("operator {operator} not authorized")]
    NotAuthorized { operator: Address },

    #[error("{0}")]
    Rejected(String),
}

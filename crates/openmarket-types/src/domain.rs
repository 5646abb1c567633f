//! # Domain hashing
//!
//! EIP-712 digests for sell orders and allow-list passes.
//!
//! ```text
//! order_id       = hashStruct(SellOrder)
//! signing_digest = keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ order_id)
//! allow_list     = keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ hashStruct(IsWhiteList))
//! ```
//!
//! The domain binds every signature to one deployment on one chain.

use alloy_sol_types::{eip712_domain, Eip712Domain, SolStruct};

use crate::{Address, OrderId, SellOrder, B256, U256};

/// Solidity-shaped mirrors of the signed messages.
#[allow(missing_docs, clippy::pedantic)]
mod typed {
    alloy_sol_types::sol! {
        #[derive(Debug)]
        struct SellOrder {
            address seller;
            address assetContract;
            uint256 assetId;
            address payToken;
            uint256 price;
            uint256 deadline;
        }

        #[derive(Debug)]
        struct IsWhiteList {
            address user;
        }
    }
}

fn typed_order(order: &SellOrder) -> typed::SellOrder {
    typed::SellOrder {
        seller: order.seller,
        assetContract: order.asset_contract,
        assetId: order.asset_id,
        payToken: order.pay_token.address(),
        price: U256::from(order.price),
        deadline: U256::from(order.deadline),
    }
}

/// Struct hash of a sell order. This is the order's identity.
#[must_use]
pub fn order_id(order: &SellOrder) -> OrderId {
    OrderId(typed_order(order).eip712_hash_struct())
}

/// Struct hash of an allow-list pass for `user`.
#[must_use]
pub fn allow_list_hash(user: &Address) -> B256 {
    typed::IsWhiteList { user: *user }.eip712_hash_struct()
}

/// The EIP-712 domain of one deployment, with its separator precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSeparator {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
    domain: Eip712Domain,
    separator: B256,
}

impl DomainSeparator {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        let name = name.into();
        let version = version.into();
        let domain = eip712_domain! {
            name: name.clone(),
            version: version.clone(),
            chain_id: chain_id,
            verifying_contract: verifying_contract,
        };
        let separator = domain.separator();
        Self {
            name,
            version,
            chain_id,
            verifying_contract,
            domain,
            separator,
        }
    }

    /// The 32-byte separator value.
    #[must_use]
    pub fn separator(&self) -> &B256 {
        &self.separator
    }

    #[must_use]
    pub fn eip712_domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// Digest a seller signs to authorize `order` on this deployment.
    #[must_use]
    pub fn signing_digest(&self, order: &SellOrder) -> B256 {
        typed_order(order).eip712_signing_hash(&self.domain)
    }

    /// Digest the allow-list authority signs to admit `user`.
    #[must_use]
    pub fn allow_list_digest(&self, user: &Address) -> B256 {
        typed::IsWhiteList { user: *user }.eip712_signing_hash(&self.domain)
    }
}

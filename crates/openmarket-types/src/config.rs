//! Configuration for an OpenMarket deployment.

use serde::{Deserialize, Serialize};

use crate::{constants, Address, DomainSeparator, MarketError, Result};

/// Configuration for one exchange deployment.
///
/// The domain fields feed the EIP-712 separator; changing any of them
/// invalidates every signature produced against the old values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    /// EIP-712 domain name.
    pub name: String,
    /// EIP-712 domain version.
    pub version: String,
    /// Chain the deployment lives on.
    pub chain_id: u64,
    /// Address of this deployment. Also the operator / spender the seller
    /// and buyer must approve.
    pub verifying_contract: Address,
    /// Initial fee recipient. `None` disables the fee.
    pub fee_recipient: Option<Address>,
    /// Initial allow-list authority. `None` disables the gated entry point.
    pub allow_list_signer: Option<Address>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_DOMAIN_NAME.to_string(),
            version: constants::DEFAULT_DOMAIN_VERSION.to_string(),
            chain_id: constants::DEFAULT_CHAIN_ID,
            verifying_contract: Address::ZERO,
            fee_recipient: None,
            allow_list_signer: None,
        }
    }
}

impl ExchangeConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a usable domain.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MarketError::Configuration("domain name is empty".into()));
        }
        if self.version.is_empty() {
            return Err(MarketError::Configuration("domain version is empty".into()));
        }
        if self.verifying_contract.is_zero() {
            return Err(MarketError::Configuration(
                "verifying_contract must be set".into(),
            ));
        }
        if self.allow_list_signer.is_some_and(|s| s.is_zero()) {
            return Err(MarketError::Configuration(
                "allow_list_signer must not be the zero address".into(),
            ));
        }
        Ok(())
    }

    /// The domain separator for this deployment.
    #[must_use]
    pub fn domain(&self) -> DomainSeparator {
        DomainSeparator::new(
            self.name.clone(),
            self.version.clone(),
            self.chain_id,
            self.verifying_contract,
        )
    }
}

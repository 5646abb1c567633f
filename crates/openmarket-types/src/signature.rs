//! Detached secp256k1 signatures with public-key recovery.
//!
//! The verifier only recovers: it turns `(digest, signature)` into the
//! [`Address`] that produced it. Deciding whether that address is the
//! expected party is the caller's job, and a mismatch there is an
//! authorization failure, not a verifier fault.
//!
//! Two encodings are accepted:
//! - 65 bytes `r ‖ s ‖ v` with `v ∈ {0, 1, 27, 28}`
//! - 64 bytes EIP-2098 compact `r ‖ (yParity << 255 | s)`
//!
//! High-S signatures are rejected, not normalized.

pub use alloy_primitives::Signature;
use k256::ecdsa::{SigningKey, VerifyingKey};

use crate::constants::{COMPACT_SIGNATURE_LEN, SIGNATURE_LEN};
use crate::{Address, MarketError, Result, B256};

fn invalid(reason: impl Into<String>) -> MarketError {
    MarketError::InvalidSignature {
        reason: reason.into(),
    }
}

/// Parse a 65-byte or 64-byte compact signature.
pub fn parse_signature(bytes: &[u8]) -> Result<Signature> {
    let signature = match bytes.len() {
        SIGNATURE_LEN => {
            let v = bytes[SIGNATURE_LEN - 1];
            if !matches!(v, 0 | 1 | 27 | 28) {
                return Err(invalid(format!("bad recovery byte {v}")));
            }
            Signature::from_raw(bytes).map_err(|e| invalid(e.to_string()))?
        }
        COMPACT_SIGNATURE_LEN => Signature::from_erc2098(bytes),
        len => return Err(invalid(format!("bad signature length {len}"))),
    };
    if signature.normalize_s().is_some() {
        return Err(invalid("non-canonical high-S value"));
    }
    Ok(signature)
}

/// Recover the signer of `digest` from raw signature bytes.
pub fn recover_signer(digest: &B256, signature: &[u8]) -> Result<Address> {
    parse_signature(signature)?
        .recover_address_from_prehash(digest)
        .map_err(|e| invalid(format!("recovery failed: {e}")))
}

/// Ethereum-style address of a public key.
#[must_use]
pub fn address_of(key: &VerifyingKey) -> Address {
    Address::from_public_key(key)
}

/// Sign a prehashed digest, producing a low-S signature.
pub fn sign_digest(key: &SigningKey, digest: &B256) -> Result<Signature> {
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(digest.as_slice())
        .map_err(|e| invalid(format!("signing failed: {e}")))?;
    Ok(Signature::from_signature_and_parity(signature, recovery_id.is_y_odd()).normalized_s())
}

/// Deterministic signing identity for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Clone)]
pub struct TestKey {
    pub signing: SigningKey,
    pub address: Address,
}

#[cfg(any(test, feature = "test-helpers"))]
impl TestKey {
    /// Key whose 32 secret bytes are all `seed`. `seed` must be non-zero.
    pub fn from_seed(seed: u8) -> Self {
        let signing = SigningKey::from_slice(&[seed; 32]).expect("non-zero seed is a valid scalar");
        Self::from_signing(signing)
    }

    /// Fresh random key.
    pub fn random() -> Self {
        Self::from_signing(SigningKey::random(&mut rand::rngs::OsRng))
    }

    fn from_signing(signing: SigningKey) -> Self {
        let address = address_of(signing.verifying_key());
        Self { signing, address }
    }

    /// Sign `digest` and return the 65-byte encoding.
    pub fn sign(&self, digest: &B256) -> Vec<u8> {
        sign_digest(&self.signing, digest)
            .expect("signing a 32-byte digest succeeds")
            .as_bytes()
            .to_vec()
    }
}

//! System-wide constants for the OpenMarket exchange.

/// Protocol fee in basis points charged on allow-listed settlements (0.30%).
pub const FEE_BASIS_POINTS: u128 = 30;

/// Basis-point denominator (100% = 10_000 bp).
pub const BASIS_POINTS_DENOMINATOR: u128 = 10_000;

/// Default EIP-712 domain name.
pub const DEFAULT_DOMAIN_NAME: &str = "OpenMarket";

/// Default EIP-712 domain version.
pub const DEFAULT_DOMAIN_VERSION: &str = "1";

/// Default chain identifier (Ethereum mainnet).
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Length of an `r || s || v` signature.
pub const SIGNATURE_LEN: usize = 65;

/// Length of an EIP-2098 compact `r || vs` signature.
pub const COMPACT_SIGNATURE_LEN: usize = 64;

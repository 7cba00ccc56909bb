//! # peace-crypto: Hash-to-Field Providers
//!
//! Provides the fixed-arity field hashes (`Hash2`, `Hash5`) the commitment
//! protocol is built on:
//!
//! - **Poseidon** (circomlib parameters over BN254), the production
//!   provider, computed by the same circuit that proves commitments.
//! - **SHA-256** over concatenated field words, a simulation provider for
//!   development without the circuit toolchain.
//!
//! Both implement [`FieldHasher`]; callers hold an `Arc<dyn FieldHasher>`
//! and never depend on the concrete primitive.
//!
//! ## Crate Policy
//!
//! - Depends only on `peace-core` internally.
//! - Providers are stateless and shareable across threads.

pub mod error;
pub mod hasher;
pub mod poseidon;
pub mod sha256;

pub use error::HashError;
pub use hasher::{FieldHasher, HasherKind, HASHER_ENV};
pub use poseidon::PoseidonHasher;
pub use sha256::Sha256FieldHasher;

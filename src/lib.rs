//! Non-interactive zero-knowledge proofs over Pedersen-committed integers:
//! ranges, modular arithmetic, modular exponentiation and membership of an
//! RSA modulus in a public set, over any prime-order group.
#[macro_use]
extern crate quick_error;

pub mod commitments;
pub mod parameters;
pub mod polynomial;
pub mod protocols;
pub mod transcript;
pub mod utils;

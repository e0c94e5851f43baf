use rand::{CryptoRng, RngCore};
use rug::integer::Order;
use rug::rand::{MutRandState, RandGen};
use rug::Integer;
use std::fmt::Debug;

pub mod modp;

cfg_if::cfg_if! {
    if #[cfg(feature = "arkworks")] {
        pub mod curve;
        pub use curve::Bls12G1;
    }
}

pub use modp::Modp2048;

/// A cyclic group of known prime order.
///
/// The group is a marker type and all operations are static, so that proofs
/// are written once against this trait and never against a backend's operator
/// set. `op` is the group composition and `exp` the scalar action: addition and
/// point multiplication for an elliptic curve, multiplication and modular
/// exponentiation for a finite field.
pub trait Group: Clone + Debug + PartialEq + 'static {
    type Elem: Clone + Debug + PartialEq;

    fn op(a: &Self::Elem, b: &Self::Elem) -> Self::Elem;
    /// Scalar action by any signed integer, reduced modulo the group order.
    fn exp(a: &Self::Elem, n: &Integer) -> Self::Elem;
    fn id() -> Self::Elem;
    fn inv(a: &Self::Elem) -> Self::Elem;
    fn order() -> Integer;
    fn generator() -> Self::Elem;
    /// Deterministically maps arbitrary bytes to a group element with unknown
    /// discrete logarithm.
    fn hash_to_elem(data: &[u8]) -> Self::Elem;
    /// Canonical encoding. Two elements are equal iff their encodings are.
    fn elem_to_bytes(a: &Self::Elem) -> Vec<u8>;
}

/// `g^x * h^r`.
pub fn double_exp<G: Group>(g: &G::Elem, x: &Integer, h: &G::Elem, r: &Integer) -> G::Elem {
    G::op(&G::exp(g, x), &G::exp(h, r))
}

/// `a * b^-1`.
pub fn divide<G: Group>(a: &G::Elem, b: &G::Elem) -> G::Elem {
    G::op(a, &G::inv(b))
}

pub fn random_between<R: MutRandState>(rng: &mut R, min: &Integer, max: &Integer) -> Integer {
    min + Integer::from(max - min).random_below(rng)
}

pub fn random_below<R: MutRandState>(rng: &mut R, bound: &Integer) -> Integer {
    bound.clone().random_below(rng)
}

pub fn random_bits<R: MutRandState>(rng: &mut R, bits: u32) -> Integer {
    Integer::from(Integer::random_bits(bits, rng))
}

/// The space Sigma blindings are drawn from when a response is
/// `blinding + challenge * secret` with `challenge < order` and
/// `|secret| < 2^secret_bits`. It exceeds the largest `challenge * secret` by
/// `2^security_zk`, so the responses are statistically independent of the
/// secret.
pub fn hiding_space(order: &Integer, secret_bits: u32, security_zk: u16) -> Integer {
    Integer::from(Integer::u_pow_u(
        2,
        order.significant_bits() + secret_bits + u32::from(security_zk),
    ))
}

pub fn integer_to_bytes(num: &Integer) -> Vec<u8> {
    num.to_digits::<u8>(Order::MsfBe)
}

pub fn bytes_to_integer(bytes: &[u8]) -> Integer {
    Integer::from_digits(bytes, Order::MsfBe)
}

/// Adapts a cryptographically secure `rand` generator into a `rug` random
/// generator, so provers can be driven by `RandState::new_custom`.
pub struct CryptoRandGen<R: RngCore + CryptoRng> {
    rng: R,
}

impl<R: RngCore + CryptoRng> CryptoRandGen<R> {
    pub fn new(rng: R) -> CryptoRandGen<R> {
        CryptoRandGen { rng }
    }
}

impl<R: RngCore + CryptoRng + Send + Sync> RandGen for CryptoRandGen<R> {
    fn gen(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

//! The prime-order subgroup of quadratic residues of `Z_p^*`, where `p` is the
//! 2048-bit MODP safe prime of RFC 3526 (group 14).
use super::{bytes_to_integer, Group};
use blake2::Blake2b512;
use digest::Digest;
use rug::integer::Order;
use rug::ops::RemRounding;
use rug::Integer;
use std::cmp::Ordering;
use std::sync::OnceLock;

const MODULUS_HEX: &str = "\
FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
29024E088A67CC74020BBEA63B139B22514A08798E3404DD\
EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245\
E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D\
C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F\
83655D23DCA3AD961C62F356208552BB9ED529077096966D\
670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9\
DE2BCBF6955817183995497CEA956AE515D2261898FA0510\
15728E5A8AACAA68FFFFFFFFFFFFFFFF";

const ELEM_BYTES: usize = 256;
/// Blake2b-512 blocks concatenated before reducing, so the reduction bias
/// modulo the 2048-bit prime is negligible.
const HASH_BLOCKS: u8 = 5;

fn modulus() -> &'static Integer {
    static MODULUS: OnceLock<Integer> = OnceLock::new();
    MODULUS.get_or_init(|| {
        Integer::from_str_radix(MODULUS_HEX, 16).expect("RFC 3526 prime is valid hex")
    })
}

fn subgroup_order() -> &'static Integer {
    static ORDER: OnceLock<Integer> = OnceLock::new();
    ORDER.get_or_init(|| Integer::from(modulus() - 1u32) >> 1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modp2048 {}

/// A quadratic residue modulo `p`, kept reduced in `[1, p)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModpElem(Integer);

impl ModpElem {
    pub fn value(&self) -> &Integer {
        &self.0
    }
}

impl Group for Modp2048 {
    type Elem = ModpElem;

    fn op(a: &ModpElem, b: &ModpElem) -> ModpElem {
        ModpElem(Integer::from(&a.0 * &b.0) % modulus())
    }

    fn exp(a: &ModpElem, n: &Integer) -> ModpElem {
        let exponent = n.clone().rem_euc(subgroup_order());
        if exponent.cmp0() == Ordering::Equal {
            return Self::id();
        }
        ModpElem(a.0.clone().secure_pow_mod(&exponent, modulus()))
    }

    fn id() -> ModpElem {
        ModpElem(Integer::from(1))
    }

    fn inv(a: &ModpElem) -> ModpElem {
        // every subgroup element is a unit, the fallback is unreachable
        ModpElem(a.0.clone().invert(modulus()).unwrap_or_else(|value| value))
    }

    fn order() -> Integer {
        subgroup_order().clone()
    }

    fn generator() -> ModpElem {
        ModpElem(Integer::from(4))
    }

    fn hash_to_elem(data: &[u8]) -> ModpElem {
        let mut nonce = 0u32;
        loop {
            let mut bytes = Vec::with_capacity(HASH_BLOCKS as usize * 64);
            for block in 0..HASH_BLOCKS {
                let mut hasher = Blake2b512::new();
                hasher.update(b"modp2048-hash-to-element");
                hasher.update(nonce.to_be_bytes());
                hasher.update([block]);
                hasher.update(data);
                bytes.extend_from_slice(&hasher.finalize());
            }
            let candidate = bytes_to_integer(&bytes) % modulus();
            let residue = Integer::from(candidate.square_ref()) % modulus();
            if residue > 1u32 {
                return ModpElem(residue);
            }
            nonce += 1;
        }
    }

    fn elem_to_bytes(a: &ModpElem) -> Vec<u8> {
        let digits = a.0.to_digits::<u8>(Order::MsfBe);
        let mut bytes = vec![0u8; ELEM_BYTES.saturating_sub(digits.len())];
        bytes.extend(digits);
        bytes
    }
}

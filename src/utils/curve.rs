//! The G1 group of BLS12-381 as a [`Group`] backend.
use super::{bytes_to_integer, integer_to_bytes, Group};
use ark_bls12_381::{Fq, Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup, Group as _};
use ark_ff::{BigInteger, PrimeField, Zero};
use blake2::Blake2b512;
use digest::Digest;
use rug::ops::RemRounding;
use rug::Integer;
use std::sync::OnceLock;

fn scalar_modulus() -> &'static Integer {
    static MODULUS: OnceLock<Integer> = OnceLock::new();
    MODULUS.get_or_init(|| bytes_to_integer(&<Fr as PrimeField>::MODULUS.to_bytes_be()))
}

fn integer_to_scalar(n: &Integer) -> Fr {
    let reduced = n.clone().rem_euc(scalar_modulus());
    Fr::from_be_bytes_mod_order(&integer_to_bytes(&reduced))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bls12G1 {}

impl Group for Bls12G1 {
    type Elem = G1Projective;

    fn op(a: &G1Projective, b: &G1Projective) -> G1Projective {
        *a + b
    }

    fn exp(a: &G1Projective, n: &Integer) -> G1Projective {
        *a * integer_to_scalar(n)
    }

    fn id() -> G1Projective {
        G1Projective::zero()
    }

    fn inv(a: &G1Projective) -> G1Projective {
        -*a
    }

    fn order() -> Integer {
        scalar_modulus().clone()
    }

    fn generator() -> G1Projective {
        G1Projective::generator()
    }

    // try-and-increment on the x coordinate, then clear the cofactor
    fn hash_to_elem(data: &[u8]) -> G1Projective {
        let mut nonce = 0u32;
        loop {
            let mut hasher = Blake2b512::new();
            hasher.update(b"bls12-381-g1-hash-to-element");
            hasher.update(nonce.to_be_bytes());
            hasher.update(data);
            let digest = hasher.finalize();
            let x = Fq::from_be_bytes_mod_order(&digest);
            let greatest = digest[0] & 1 == 1;
            if let Some(point) = G1Affine::get_point_from_x_unchecked(x, greatest) {
                let point = point.clear_cofactor();
                if !point.is_zero() {
                    return point.into_group();
                }
            }
            nonce += 1;
        }
    }

    fn elem_to_bytes(a: &G1Projective) -> Vec<u8> {
        let affine = a.into_affine();
        match affine.xy() {
            Some((x, y)) => {
                let mut bytes = vec![4u8];
                bytes.extend(x.into_bigint().to_bytes_be());
                bytes.extend(y.into_bigint().to_bytes_be());
                bytes
            }
            None => vec![0u8],
        }
    }
}

#[cfg(test)]
mod test {
    use super::Bls12G1;
    use crate::utils::Group;
    use rug::Integer;

    #[test]
    fn test_group_laws() {
        let g = Bls12G1::generator();
        let h = Bls12G1::hash_to_elem(b"h");
        assert_eq!(Bls12G1::exp(&g, &Bls12G1::order()), Bls12G1::id());
        assert_eq!(Bls12G1::exp(&h, &Bls12G1::order()), Bls12G1::id());
        assert_eq!(Bls12G1::op(&h, &Bls12G1::inv(&h)), Bls12G1::id());
        assert_eq!(Bls12G1::exp(&g, &Integer::from(-1)), Bls12G1::inv(&g));
        assert_eq!(Bls12G1::order().significant_bits(), 255);
    }

    #[test]
    fn test_encoding() {
        let h = Bls12G1::hash_to_elem(b"0");
        assert_eq!(Bls12G1::elem_to_bytes(&h).len(), 97);
        assert_eq!(Bls12G1::elem_to_bytes(&Bls12G1::id()), vec![0u8]);
        assert_eq!(
            Bls12G1::elem_to_bytes(&Bls12G1::op(&h, &Bls12G1::id())),
            Bls12G1::elem_to_bytes(&h)
        );
    }
}

//! `a * b = c (mod m)` for committed `a, b, c, m`.
use super::{CRSModular, Product, QuotientBridge};
use crate::{
    commitments::Commitment,
    protocols::{range::Proof as RangeProof, CRSError, ProofError, VerificationError},
    utils::Group,
};
use rug::rand::MutRandState;
use rug::Integer;
use tracing::debug;

pub struct Statement<G: Group> {
    pub c_a: Commitment<G>,
    pub c_b: Commitment<G>,
    pub c_result: Commitment<G>,
    pub c_modulus: Commitment<G>,
}

pub struct Witness {
    pub a: Integer,
    pub r_a: Integer,
    pub b: Integer,
    pub r_b: Integer,
    pub result: Integer,
    pub r_result: Integer,
    pub modulus: Integer,
    pub r_modulus: Integer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Proof<G: Group> {
    pub range_a: RangeProof<G>,
    pub range_b: RangeProof<G>,
    pub range_result: RangeProof<G>,
    pub range_modulus: Option<RangeProof<G>>,
    pub bridge: QuotientBridge<G>,
}

pub struct Protocol<G: Group> {
    pub crs: CRSModular<G>,
}

impl<G: Group> Protocol<G> {
    pub fn from_crs(crs: &CRSModular<G>) -> Result<Protocol<G>, CRSError> {
        crs.validate()?;
        Ok(Protocol { crs: crs.clone() })
    }

    pub fn prove<R: MutRandState>(
        &self,
        rng: &mut R,
        statement: &Statement<G>,
        witness: &Witness,
    ) -> Result<Proof<G>, ProofError> {
        let bridge = self.crs.prove_product(
            rng,
            &Product {
                a: &witness.a,
                b: &witness.b,
                c_b: &statement.c_b,
                r_b: &witness.r_b,
                result: &witness.result,
                c_result: &statement.c_result,
                r_result: &witness.r_result,
                modulus: &witness.modulus,
                c_modulus: &statement.c_modulus,
                r_modulus: &witness.r_modulus,
            },
        )?;
        let range_a = self.crs.prove_bounded(rng, &statement.c_a, &witness.a, &witness.r_a)?;
        let range_b = self.crs.prove_bounded(rng, &statement.c_b, &witness.b, &witness.r_b)?;
        let range_result =
            self.crs
                .prove_bounded(rng, &statement.c_result, &witness.result, &witness.r_result)?;
        let range_modulus = self.crs.prove_modulus(
            rng,
            &statement.c_modulus,
            &witness.modulus,
            &witness.r_modulus,
        )?;

        Ok(Proof {
            range_a,
            range_b,
            range_result,
            range_modulus,
            bridge,
        })
    }

    pub fn verify(&self, statement: &Statement<G>, proof: &Proof<G>) -> Result<bool, VerificationError> {
        let check_a = self.crs.verify_bounded(&statement.c_a, &proof.range_a)?;
        let check_b = self.crs.verify_bounded(&statement.c_b, &proof.range_b)?;
        let check_result = self.crs.verify_bounded(&statement.c_result, &proof.range_result)?;
        let check_modulus = self
            .crs
            .verify_modulus(&statement.c_modulus, proof.range_modulus.as_ref())?;
        let check_product =
            self.crs
                .verify_product(&statement.c_result, &statement.c_modulus, &proof.bridge)?;

        let valid = check_a && check_b && check_result && check_modulus && check_product;
        if !valid {
            debug!(
                check_a,
                check_b, check_result, check_modulus, check_product, "modular multiplication rejected"
            );
        }
        Ok(valid)
    }
}

#[cfg(test)]
mod test {
    use super::{Protocol, Statement, Witness};
    use crate::protocols::modular::test::crs;
    use crate::protocols::modular::ModulusRange;
    use crate::protocols::{ProofError, VerificationError};
    use crate::utils::{Group, Modp2048};
    use rug::rand::RandState;
    use rug::Integer;

    fn setup<G: Group>(
        protocol: &Protocol<G>,
        rng: &mut RandState,
        a: Integer,
        b: Integer,
        result: Integer,
        modulus: Integer,
    ) -> (Statement<G>, Witness) {
        let key = &protocol.crs.commitment_key;
        let (c_a, r_a) = key.commit_random(&[a.clone()], rng).unwrap();
        let (c_b, r_b) = key.commit_random(&[b.clone()], rng).unwrap();
        let (c_result, r_result) = key.commit_random(&[result.clone()], rng).unwrap();
        let (c_modulus, r_modulus) = key.commit_random(&[modulus.clone()], rng).unwrap();
        (
            Statement {
                c_a,
                c_b,
                c_result,
                c_modulus,
            },
            Witness {
                a,
                r_a,
                b,
                r_b,
                result,
                r_result,
                modulus,
                r_modulus,
            },
        )
    }

    #[test]
    fn test_proof() {
        let mut rng = RandState::new();
        rng.seed(&Integer::from(13));
        let protocol = Protocol::<Modp2048>::from_crs(&crs(ModulusRange::Prove)).unwrap();

        let (statement, witness) = setup(
            &protocol,
            &mut rng,
            Integer::from(9),
            Integer::from(8),
            Integer::from(7),
            Integer::from(13),
        );
        let proof = protocol.prove(&mut rng, &statement, &witness).unwrap();
        assert!(protocol.verify(&statement, &proof).unwrap());

        let shifted = Statement {
            c_result: statement
                .c_result
                .combine(&protocol.crs.commitment_key.commit_value(&Integer::from(1), &Integer::new()).unwrap()),
            ..statement
        };
        assert!(!protocol.verify(&shifted, &proof).unwrap());
    }

    #[test]
    fn test_not_dividing() {
        let mut rng = RandState::new();
        rng.seed(&Integer::from(13));
        let protocol = Protocol::<Modp2048>::from_crs(&crs(ModulusRange::Prove)).unwrap();

        let (statement, witness) = setup(
            &protocol,
            &mut rng,
            Integer::from(9),
            Integer::from(8),
            Integer::from(6),
            Integer::from(13),
        );
        match protocol.prove(&mut rng, &statement, &witness) {
            Err(ProofError::DivisionError) => (),
            _ => panic!("expected a division error"),
        }
    }

    #[test]
    fn test_missing_modulus_range() {
        let mut rng = RandState::new();
        rng.seed(&Integer::from(13));
        let protocol = Protocol::<Modp2048>::from_crs(&crs(ModulusRange::Prove)).unwrap();

        let (statement, witness) = setup(
            &protocol,
            &mut rng,
            Integer::from(3),
            Integer::from(5),
            Integer::from(4),
            Integer::from(11),
        );
        let mut proof = protocol.prove(&mut rng, &statement, &witness).unwrap();
        proof.range_modulus = None;
        match protocol.verify(&statement, &proof) {
            Err(VerificationError::MalformedProof) => (),
            _ => panic!("expected a malformed proof"),
        }
    }

    #[test]
    fn test_bridge_fields_are_checked() {
        let mut rng = RandState::new();
        rng.seed(&Integer::from(17));
        let protocol = Protocol::<Modp2048>::from_crs(&crs(ModulusRange::Shared)).unwrap();

        let (statement, witness) = setup(
            &protocol,
            &mut rng,
            Integer::from(21),
            Integer::from(34),
            Integer::from(6),
            Integer::from(59),
        );
        let proof = protocol.prove(&mut rng, &statement, &witness).unwrap();
        assert!(protocol.verify(&statement, &proof).unwrap());

        let g = Modp2048::generator();

        let mut tampered = proof.clone();
        tampered.bridge.h_rebased = Modp2048::op(&tampered.bridge.h_rebased, &g);
        assert!(!protocol.verify(&statement, &tampered).unwrap());

        let mut tampered = proof.clone();
        tampered.bridge.c_quotient = tampered
            .bridge
            .c_quotient
            .combine(&protocol.crs.commitment_key.commit_value(&Integer::from(1), &Integer::new()).unwrap());
        assert!(!protocol.verify(&statement, &tampered).unwrap());

        let mut tampered = proof.clone();
        tampered.bridge.range_quotient.x1 += 1u32;
        assert!(!protocol.verify(&statement, &tampered).unwrap());

        // a range proof for a different quotient commitment
        let (other_statement, other_witness) = setup(
            &protocol,
            &mut rng,
            Integer::from(22),
            Integer::from(35),
            Integer::from(3),
            Integer::from(59),
        );
        let other = protocol.prove(&mut rng, &other_statement, &other_witness).unwrap();
        let mut tampered = proof.clone();
        tampered.bridge.range_quotient = other.bridge.range_quotient.clone();
        assert!(!protocol.verify(&statement, &tampered).unwrap());
    }

    #[cfg(all(test, feature = "arkworks"))]
    #[test]
    fn test_rsa_scale() {
        use crate::protocols::modular::test::rsa_modulus;
        use crate::utils::Bls12G1;
        let mut rng = RandState::new();
        rng.seed(&Integer::from(13));
        let protocol = Protocol::<Bls12G1>::from_crs(&crs(ModulusRange::Prove)).unwrap();

        let modulus = rsa_modulus();
        let a = Integer::from(Integer::u_pow_u(2, 2000)) + 12345u32;
        let b = Integer::from(&modulus - 987654321u32);
        let result = Integer::from(&a * &b) % &modulus;
        let (statement, witness) = setup(&protocol, &mut rng, a, b, result, modulus);
        let proof = protocol.prove(&mut rng, &statement, &witness).unwrap();
        assert!(protocol.verify(&statement, &proof).unwrap());

        let mut tampered = proof.clone();
        tampered.bridge.proof_same_log.s_x += 1u32;
        assert!(!protocol.verify(&statement, &tampered).unwrap());

        let shifted = Statement {
            c_result: statement
                .c_result
                .combine(&protocol.crs.commitment_key.commit_value(&Integer::from(1), &Integer::new()).unwrap()),
            ..statement
        };
        assert!(!protocol.verify(&shifted, &proof).unwrap());
    }
}

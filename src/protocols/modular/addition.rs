//! `a + b = c (mod m)` for committed `a, b, c, m`.
use super::{exact_quotient, CRSModular};
use crate::{
    commitments::{pedersen::PedersenCommitment, Commitment, CommitmentError},
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
    /// Range of the quotient under the key `(C_m, h)`.
    pub range_quotient: RangeProof<G>,
}

pub struct Protocol<G: Group> {
    pub crs: CRSModular<G>,
}

impl<G: Group> Protocol<G> {
    pub fn from_crs(crs: &CRSModular<G>) -> Result<Protocol<G>, CRSError> {
        crs.validate()?;
        Ok(Protocol { crs: crs.clone() })
    }

    /// `C_c / (C_a C_b) = C_m^q h^s`.
    fn quotient_commitment(statement: &Statement<G>) -> Commitment<G> {
        statement
            .c_result
            .divide(&statement.c_a.combine(&statement.c_b))
    }

    fn quotient_key(&self, statement: &Statement<G>) -> Result<PedersenCommitment<G>, CommitmentError> {
        PedersenCommitment::from_generators(vec![
            statement.c_modulus.element().clone(),
            self.crs.commitment_key.h().clone(),
        ])
    }

    pub fn prove<R: MutRandState>(
        &self,
        rng: &mut R,
        statement: &Statement<G>,
        witness: &Witness,
    ) -> Result<Proof<G>, ProofError> {
        let quotient = exact_quotient(
            witness.result.clone() - &witness.a - &witness.b,
            &witness.modulus,
        )?;
        let s = witness.r_result.clone()
            - &witness.r_a
            - &witness.r_b
            - Integer::from(&quotient * &witness.r_modulus);

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
        let range_quotient = self.crs.prove_bounded_under(
            self.quotient_key(statement)?,
            rng,
            &Self::quotient_commitment(statement),
            &quotient,
            &s,
        )?;

        Ok(Proof {
            range_a,
            range_b,
            range_result,
            range_modulus,
            range_quotient,
        })
    }

    pub fn verify(&self, statement: &Statement<G>, proof: &Proof<G>) -> Result<bool, VerificationError> {
        let check_a = self.crs.verify_bounded(&statement.c_a, &proof.range_a)?;
        let check_b = self.crs.verify_bounded(&statement.c_b, &proof.range_b)?;
        let check_result = self.crs.verify_bounded(&statement.c_result, &proof.range_result)?;
        let check_modulus = self
            .crs
            .verify_modulus(&statement.c_modulus, proof.range_modulus.as_ref())?;
        let check_quotient = self.crs.verify_bounded_under(
            self.quotient_key(statement)?,
            &Self::quotient_commitment(statement),
            &proof.range_quotient,
        )?;

        let valid = check_a && check_b && check_result && check_modulus && check_quotient;
        if !valid {
            debug!(
                check_a,
                check_b, check_result, check_modulus, check_quotient, "modular addition rejected"
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
    use crate::protocols::ProofError;
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
            Integer::from(4),
            Integer::from(13),
        );
        let proof = protocol.prove(&mut rng, &statement, &witness).unwrap();
        assert!(proof.range_modulus.is_some());
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
            Integer::from(5),
            Integer::from(13),
        );
        match protocol.prove(&mut rng, &statement, &witness) {
            Err(ProofError::DivisionError) => (),
            _ => panic!("expected a division error"),
        }
    }

    #[cfg(all(test, feature = "arkworks"))]
    #[test]
    fn test_rsa_scale() {
        use crate::protocols::modular::test::rsa_modulus;
        use crate::utils::Bls12G1;
        let mut rng = RandState::new();
        rng.seed(&Integer::from(13));
        let protocol = Protocol::<Bls12G1>::from_crs(&crs(ModulusRange::Shared)).unwrap();

        let modulus = rsa_modulus();
        let a = Integer::from(&modulus - 5u32);
        let b = Integer::from(&modulus - 7u32);
        let result = Integer::from(&modulus - 12u32);
        let (statement, witness) = setup(&protocol, &mut rng, a, b, result, modulus);
        let proof = protocol.prove(&mut rng, &statement, &witness).unwrap();
        assert!(proof.range_modulus.is_none());
        assert!(protocol.verify(&statement, &proof).unwrap());
    }
}

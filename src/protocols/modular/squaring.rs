//! `a^2 = c (mod m)` for committed `a, c, m`, the multiplication proof with
//! both operands the same commitment.
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
    pub c_value: Commitment<G>,
    pub c_result: Commitment<G>,
    pub c_modulus: Commitment<G>,
}

pub struct Witness {
    pub value: Integer,
    pub r_value: Integer,
    pub result: Integer,
    pub r_result: Integer,
    pub modulus: Integer,
    pub r_modulus: Integer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Proof<G: Group> {
    pub range_value: RangeProof<G>,
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
                a: &witness.value,
                b: &witness.value,
                c_b: &statement.c_value,
                r_b: &witness.r_value,
                result: &witness.result,
                c_result: &statement.c_result,
                r_result: &witness.r_result,
                modulus: &witness.modulus,
                c_modulus: &statement.c_modulus,
                r_modulus: &witness.r_modulus,
            },
        )?;
        let range_value =
            self.crs
                .prove_bounded(rng, &statement.c_value, &witness.value, &witness.r_value)?;
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
            range_value,
            range_result,
            range_modulus,
            bridge,
        })
    }

    pub fn verify(&self, statement: &Statement<G>, proof: &Proof<G>) -> Result<bool, VerificationError> {
        let check_value = self.crs.verify_bounded(&statement.c_value, &proof.range_value)?;
        let check_result = self.crs.verify_bounded(&statement.c_result, &proof.range_result)?;
        let check_modulus = self
            .crs
            .verify_modulus(&statement.c_modulus, proof.range_modulus.as_ref())?;
        let check_product =
            self.crs
                .verify_product(&statement.c_result, &statement.c_modulus, &proof.bridge)?;

        let valid = check_value && check_result && check_modulus && check_product;
        if !valid {
            debug!(
                check_value,
                check_result, check_modulus, check_product, "modular squaring rejected"
            );
        }
        Ok(valid)
    }
}

//! Proofs of modular relations between committed integers.
//!
//! Every relation `f(operands) = result (mod m)` is reduced to the integer
//! equation `result = f(operands) + q m` with an exactly divided quotient `q`,
//! and all of the operands, the result, the modulus and `q` are range proved
//! to lie in `[-2^bound_bits, 2^bound_bits]`.
use crate::{
    commitments::{pedersen::PedersenCommitment, Commitment},
    parameters::Parameters,
    protocols::{
        range::{
            CRSRange, Proof as RangeProof, Protocol as RangeProtocol,
            Statement as RangeStatement, Witness as RangeWitness,
        },
        same_log::{
            CRSSameLog, Proof as SameLogProof, Protocol as SameLogProtocol,
            Statement as SameLogStatement, Witness as SameLogWitness,
        },
        CRSError, ProofError, VerificationError,
    },
    utils::{double_exp, Group},
};
use rug::rand::MutRandState;
use rug::Integer;
use std::cmp::Ordering;

pub mod addition;
pub mod multiplication;
pub mod squaring;

pub use addition::{Proof as AdditionProof, Protocol as AdditionProtocol};
pub use multiplication::{Proof as MultiplicationProof, Protocol as MultiplicationProtocol};
pub use squaring::{Proof as SquaringProof, Protocol as SquaringProtocol};

/// Whether a relation proof carries its own range proof for the modulus, or
/// relies on an enclosing proof that ranges the shared modulus once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModulusRange {
    Prove,
    Shared,
}

#[derive(Clone)]
pub struct CRSModular<G: Group> {
    pub parameters: Parameters,
    pub commitment_key: PedersenCommitment<G>, // g, h
    pub bound_bits: u32,
    pub modulus_range: ModulusRange,
}

/// `result = a * b + q * m` over the integers with `b`, `result` and `m`
/// committed. The multiplier `a` is known to the prover only.
pub(crate) struct Product<'a, G: Group> {
    pub a: &'a Integer,
    pub b: &'a Integer,
    pub c_b: &'a Commitment<G>,
    pub r_b: &'a Integer,
    pub result: &'a Integer,
    pub c_result: &'a Commitment<G>,
    pub r_result: &'a Integer,
    pub modulus: &'a Integer,
    pub c_modulus: &'a Commitment<G>,
    pub r_modulus: &'a Integer,
}

/// Links the product commitment to a range-proved quotient.
///
/// The blinding generator is rebased to `h' = C_b^a h^s` with
/// `s = r_result - a r_b - q r_m`, so that `C_result = C_m^q h'` and a same-log
/// proof ties the quotient committed in `c_quotient` to the exponent of `C_m`.
/// The rebased generator is chosen by the prover.
#[derive(Clone, Debug, PartialEq)]
pub struct QuotientBridge<G: Group> {
    pub c_quotient: Commitment<G>,
    pub h_rebased: G::Elem,
    pub proof_same_log: SameLogProof,
    pub range_quotient: RangeProof<G>,
}

pub(crate) fn exact_quotient(difference: Integer, modulus: &Integer) -> Result<Integer, ProofError> {
    if modulus.cmp0() == Ordering::Equal || !difference.is_divisible(modulus) {
        return Err(ProofError::DivisionError);
    }
    Ok(difference.div_exact(modulus))
}

impl<G: Group> CRSModular<G> {
    pub(crate) fn validate(&self) -> Result<(), CRSError> {
        self.parameters.is_valid()?;
        if self.commitment_key.arity() != 1 {
            return Err(CRSError::KeyArity);
        }
        Ok(())
    }

    pub fn bounds(&self) -> (Integer, Integer) {
        let upper = Integer::from(Integer::u_pow_u(2, self.bound_bits));
        (-upper.clone(), upper)
    }

    fn range_under(&self, commitment_key: PedersenCommitment<G>) -> Result<RangeProtocol<G>, CRSError> {
        RangeProtocol::from_crs(&CRSRange {
            parameters: self.parameters.clone(),
            commitment_key,
        })
    }

    fn bounded_statement(&self, commitment: &Commitment<G>) -> RangeStatement<G> {
        let (lower, upper) = self.bounds();
        RangeStatement {
            commitment: commitment.clone(),
            lower,
            upper,
        }
    }

    pub(crate) fn prove_bounded_under<R: MutRandState>(
        &self,
        commitment_key: PedersenCommitment<G>,
        rng: &mut R,
        commitment: &Commitment<G>,
        value: &Integer,
        randomness: &Integer,
    ) -> Result<RangeProof<G>, ProofError> {
        let range = self.range_under(commitment_key)?;
        range.prove(
            rng,
            &self.bounded_statement(commitment),
            &RangeWitness {
                value: value.clone(),
                randomness: randomness.clone(),
            },
        )
    }

    pub(crate) fn verify_bounded_under(
        &self,
        commitment_key: PedersenCommitment<G>,
        commitment: &Commitment<G>,
        proof: &RangeProof<G>,
    ) -> Result<bool, VerificationError> {
        let range = self.range_under(commitment_key)?;
        range.verify(&self.bounded_statement(commitment), proof)
    }

    pub(crate) fn prove_bounded<R: MutRandState>(
        &self,
        rng: &mut R,
        commitment: &Commitment<G>,
        value: &Integer,
        randomness: &Integer,
    ) -> Result<RangeProof<G>, ProofError> {
        self.prove_bounded_under(self.commitment_key.clone(), rng, commitment, value, randomness)
    }

    pub(crate) fn verify_bounded(
        &self,
        commitment: &Commitment<G>,
        proof: &RangeProof<G>,
    ) -> Result<bool, VerificationError> {
        self.verify_bounded_under(self.commitment_key.clone(), commitment, proof)
    }

    pub(crate) fn prove_modulus<R: MutRandState>(
        &self,
        rng: &mut R,
        c_modulus: &Commitment<G>,
        modulus: &Integer,
        r_modulus: &Integer,
    ) -> Result<Option<RangeProof<G>>, ProofError> {
        match self.modulus_range {
            ModulusRange::Prove => Ok(Some(self.prove_bounded(rng, c_modulus, modulus, r_modulus)?)),
            ModulusRange::Shared => Ok(None),
        }
    }

    pub(crate) fn verify_modulus(
        &self,
        c_modulus: &Commitment<G>,
        proof: Option<&RangeProof<G>>,
    ) -> Result<bool, VerificationError> {
        match (self.modulus_range, proof) {
            (ModulusRange::Prove, Some(proof)) => self.verify_bounded(c_modulus, proof),
            (ModulusRange::Shared, None) => Ok(true),
            _ => Err(VerificationError::MalformedProof),
        }
    }

    fn same_log(&self) -> SameLogProtocol {
        SameLogProtocol::from_crs(&CRSSameLog {
            parameters: self.parameters.clone(),
        })
    }

    fn bridge_statement(
        &self,
        c_quotient: &Commitment<G>,
        c_modulus: &Commitment<G>,
        h_rebased: &G::Elem,
        c_result: &Commitment<G>,
    ) -> SameLogStatement<G> {
        SameLogStatement {
            g1: self.commitment_key.g().clone(),
            h1: self.commitment_key.h().clone(),
            c1: c_quotient.element().clone(),
            g2: c_modulus.element().clone(),
            h2: h_rebased.clone(),
            c2: c_result.element().clone(),
        }
    }

    pub(crate) fn prove_product<R: MutRandState>(
        &self,
        rng: &mut R,
        product: &Product<G>,
    ) -> Result<QuotientBridge<G>, ProofError> {
        let quotient = exact_quotient(
            product.result.clone() - Integer::from(product.a * product.b),
            product.modulus,
        )?;
        let s = product.r_result.clone()
            - Integer::from(product.a * product.r_b)
            - Integer::from(&quotient * product.r_modulus);
        let h_rebased = double_exp::<G>(
            product.c_b.element(),
            product.a,
            self.commitment_key.h(),
            &s,
        );

        let (c_quotient, r_quotient) = self
            .commitment_key
            .commit_random(std::slice::from_ref(&quotient), rng)?;
        let proof_same_log = self.same_log().prove(
            rng,
            &self.bridge_statement(&c_quotient, product.c_modulus, &h_rebased, product.c_result),
            &SameLogWitness {
                x: quotient.clone(),
                r1: r_quotient.clone(),
                r2: Integer::from(1),
            },
        );
        let range_quotient = self.prove_bounded(rng, &c_quotient, &quotient, &r_quotient)?;

        Ok(QuotientBridge {
            c_quotient,
            h_rebased,
            proof_same_log,
            range_quotient,
        })
    }

    pub(crate) fn verify_product(
        &self,
        c_result: &Commitment<G>,
        c_modulus: &Commitment<G>,
        bridge: &QuotientBridge<G>,
    ) -> Result<bool, VerificationError> {
        let check_same_log = self.same_log().verify(
            &self.bridge_statement(&bridge.c_quotient, c_modulus, &bridge.h_rebased, c_result),
            &bridge.proof_same_log,
        );
        let check_quotient = self.verify_bounded(&bridge.c_quotient, &bridge.range_quotient)?;
        Ok(check_same_log && check_quotient)
    }
}

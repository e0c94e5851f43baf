//! Proves `s^e = message (mod m)` for a public exponent `e` and message, with
//! the base `s` and the modulus `m` committed.
//!
//! The exponent is consumed from its low end: an odd remainder multiplies the
//! accumulator by the current power, an even one squares the power. Every
//! step is a modular relation proof over the shared, once range-proved,
//! modulus commitment.
use crate::{
    commitments::{pedersen::PedersenCommitment, Commitment},
    parameters::Parameters,
    protocols::{
        modular::{
            multiplication::{Statement as MultiplicationStatement, Witness as MultiplicationWitness},
            squaring::{Statement as SquaringStatement, Witness as SquaringWitness},
            CRSModular, ModulusRange, MultiplicationProof, MultiplicationProtocol, SquaringProof,
            SquaringProtocol,
        },
        range::Proof as RangeProof,
        CRSError, ProofError, VerificationError,
    },
    utils::Group,
};
use rug::rand::MutRandState;
use rug::ops::RemRounding;
use rug::Integer;
use std::cmp::Ordering;
use tracing::{debug, trace};

#[derive(Clone)]
pub struct CRSExponentiation<G: Group> {
    pub parameters: Parameters,
    pub commitment_key: PedersenCommitment<G>, // g, h
    pub bound_bits: u32,
    pub exponent: Integer,
}

impl<G: Group> CRSExponentiation<G> {
    /// RSA verification with `e = 65537` and values below `2^2050`.
    pub fn rsa(parameters: &Parameters, commitment_key: &PedersenCommitment<G>) -> CRSExponentiation<G> {
        CRSExponentiation {
            parameters: parameters.clone(),
            commitment_key: commitment_key.clone(),
            bound_bits: 2050,
            exponent: Integer::from(65537),
        }
    }

    fn modular(&self, modulus_range: ModulusRange) -> CRSModular<G> {
        CRSModular {
            parameters: self.parameters.clone(),
            commitment_key: self.commitment_key.clone(),
            bound_bits: self.bound_bits,
            modulus_range,
        }
    }
}

pub struct Statement<G: Group> {
    pub message: Integer,
    pub c_modulus: Commitment<G>,
}

pub struct Witness {
    pub signature: Integer,
    pub modulus: Integer,
    pub r_modulus: Integer,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Step<G: Group> {
    Square(SquaringProof<G>),
    Multiply(MultiplicationProof<G>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Proof<G: Group> {
    /// `s, s^2, s^4, ...` as far as the walk squares.
    pub c_powers: Vec<Commitment<G>>,
    /// The accumulator, starting from a commitment to 1.
    pub c_accumulators: Vec<Commitment<G>>,
    pub steps: Vec<Step<G>>,
    pub range_modulus: RangeProof<G>,
    /// Blinding of the last accumulator, which opens it to the message.
    pub r_result: Integer,
}

pub struct Protocol<G: Group> {
    pub crs: CRSExponentiation<G>,
    multiplication: MultiplicationProtocol<G>,
    squaring: SquaringProtocol<G>,
    modular: CRSModular<G>,
}

fn commitment_at<G: Group>(commitments: &[Commitment<G>], i: usize) -> Result<&Commitment<G>, VerificationError> {
    commitments.get(i).ok_or(VerificationError::MalformedProof)
}

impl<G: Group> Protocol<G> {
    pub fn from_crs(crs: &CRSExponentiation<G>) -> Result<Protocol<G>, CRSError> {
        if crs.exponent < 1u32 {
            return Err(CRSError::InvalidExponent);
        }
        let shared = crs.modular(ModulusRange::Shared);
        Ok(Protocol {
            crs: crs.clone(),
            multiplication: MultiplicationProtocol::from_crs(&shared)?,
            squaring: SquaringProtocol::from_crs(&shared)?,
            modular: crs.modular(ModulusRange::Prove),
        })
    }

    pub fn prove<R: MutRandState>(
        &self,
        rng: &mut R,
        statement: &Statement<G>,
        witness: &Witness,
    ) -> Result<Proof<G>, ProofError> {
        if witness.modulus.cmp0() != Ordering::Greater {
            return Err(ProofError::DivisionError);
        }
        let expected = witness
            .signature
            .clone()
            .pow_mod(&self.crs.exponent, &witness.modulus)
            .map_err(|_| ProofError::RelationNotSatisfied)?;
        if expected != statement.message {
            return Err(ProofError::RelationNotSatisfied);
        }
        let key = &self.crs.commitment_key;

        let range_modulus = self.modular.prove_bounded(
            rng,
            &statement.c_modulus,
            &witness.modulus,
            &witness.r_modulus,
        )?;

        let mut power = witness.signature.clone();
        let (mut c_power, mut r_power) = key.commit_random(std::slice::from_ref(&power), rng)?;
        let mut accumulator = Integer::from(1);
        let (mut c_accumulator, mut r_accumulator) =
            key.commit_random(std::slice::from_ref(&accumulator), rng)?;
        let mut c_powers = vec![c_power.clone()];
        let mut c_accumulators = vec![c_accumulator.clone()];
        let mut steps = Vec::new();

        let mut remaining = self.crs.exponent.clone();
        while remaining > 0u32 {
            if remaining.is_odd() {
                let next = Integer::from(&power * &accumulator).rem_euc(&witness.modulus);
                let (c_next, r_next) = key.commit_random(std::slice::from_ref(&next), rng)?;
                let proof = self.multiplication.prove(
                    rng,
                    &MultiplicationStatement {
                        c_a: c_power.clone(),
                        c_b: c_accumulator.clone(),
                        c_result: c_next.clone(),
                        c_modulus: statement.c_modulus.clone(),
                    },
                    &MultiplicationWitness {
                        a: power.clone(),
                        r_a: r_power.clone(),
                        b: accumulator,
                        r_b: r_accumulator,
                        result: next.clone(),
                        r_result: r_next.clone(),
                        modulus: witness.modulus.clone(),
                        r_modulus: witness.r_modulus.clone(),
                    },
                )?;
                trace!(step = steps.len(), "multiply");
                steps.push(Step::Multiply(proof));
                accumulator = next;
                r_accumulator = r_next;
                c_accumulator = c_next;
                c_accumulators.push(c_accumulator.clone());
                remaining -= 1u32;
            } else {
                let next = Integer::from(power.square_ref()).rem_euc(&witness.modulus);
                let (c_next, r_next) = key.commit_random(std::slice::from_ref(&next), rng)?;
                let proof = self.squaring.prove(
                    rng,
                    &SquaringStatement {
                        c_value: c_power.clone(),
                        c_result: c_next.clone(),
                        c_modulus: statement.c_modulus.clone(),
                    },
                    &SquaringWitness {
                        value: power,
                        r_value: r_power,
                        result: next.clone(),
                        r_result: r_next.clone(),
                        modulus: witness.modulus.clone(),
                        r_modulus: witness.r_modulus.clone(),
                    },
                )?;
                trace!(step = steps.len(), "square");
                steps.push(Step::Square(proof));
                power = next;
                r_power = r_next;
                c_power = c_next;
                c_powers.push(c_power.clone());
                remaining /= 2u32;
            }
        }

        Ok(Proof {
            c_powers,
            c_accumulators,
            steps,
            range_modulus,
            r_result: r_accumulator,
        })
    }

    pub fn verify(&self, statement: &Statement<G>, proof: &Proof<G>) -> Result<bool, VerificationError> {
        let mut valid = true;
        let mut powers = 0;
        let mut accumulators = 0;
        let mut steps = proof.steps.iter();

        let mut remaining = self.crs.exponent.clone();
        while remaining > 0u32 {
            let step = steps.next().ok_or(VerificationError::MalformedProof)?;
            match (remaining.is_odd(), step) {
                (true, Step::Multiply(step_proof)) => {
                    let step_statement = MultiplicationStatement {
                        c_a: commitment_at(&proof.c_powers, powers)?.clone(),
                        c_b: commitment_at(&proof.c_accumulators, accumulators)?.clone(),
                        c_result: commitment_at(&proof.c_accumulators, accumulators + 1)?.clone(),
                        c_modulus: statement.c_modulus.clone(),
                    };
                    valid &= self.multiplication.verify(&step_statement, step_proof)?;
                    accumulators += 1;
                    remaining -= 1u32;
                }
                (false, Step::Square(step_proof)) => {
                    let step_statement = SquaringStatement {
                        c_value: commitment_at(&proof.c_powers, powers)?.clone(),
                        c_result: commitment_at(&proof.c_powers, powers + 1)?.clone(),
                        c_modulus: statement.c_modulus.clone(),
                    };
                    valid &= self.squaring.verify(&step_statement, step_proof)?;
                    powers += 1;
                    remaining /= 2u32;
                }
                _ => return Err(VerificationError::MalformedProof),
            }
        }
        if steps.next().is_some()
            || proof.c_powers.len() != powers + 1
            || proof.c_accumulators.len() != accumulators + 1
        {
            return Err(VerificationError::MalformedProof);
        }
        if !valid {
            debug!("exponentiation step rejected");
        }

        let check_modulus = self
            .modular
            .verify_bounded(&statement.c_modulus, &proof.range_modulus)?;
        let expected_result = self
            .crs
            .commitment_key
            .commit_value(&statement.message, &proof.r_result)?;
        let check_result = commitment_at(&proof.c_accumulators, accumulators)? == &expected_result;
        if !check_modulus || !check_result {
            debug!(check_modulus, check_result, "exponentiation rejected");
        }

        Ok(valid && check_modulus && check_result)
    }
}

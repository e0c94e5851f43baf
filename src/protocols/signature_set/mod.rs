//! Proves an RSA signature verifies under one of a public set of moduli,
//! without revealing which.
//!
//! The modulus is committed once. The same commitment is the base modulus of
//! the exponentiation proof and the point at which the set polynomial
//! `prod (X - n_i)` is shown to vanish.
use crate::{
    commitments::{pedersen::PedersenCommitment, Commitment, CommitmentError},
    parameters::Parameters,
    polynomial::Polynomial,
    protocols::{
        exponentiation::{
            CRSExponentiation, Proof as ExponentiationProof, Protocol as ExponentiationProtocol,
            Statement as ExponentiationStatement, Witness as ExponentiationWitness,
        },
        polynomial_eval::{
            CRSPolynomialEval, Proof as PolynomialEvalProof, Protocol as PolynomialEvalProtocol,
            Statement as PolynomialEvalStatement, Witness as PolynomialEvalWitness,
        },
        CRSError, ProofError, VerificationError,
    },
    utils::Group,
};
use rug::rand::MutRandState;
use rug::Integer;
use tracing::debug;

#[derive(Clone)]
pub struct CRSSignatureSet<G: Group> {
    pub parameters: Parameters,
    pub commitment_key: PedersenCommitment<G>, // g, h
    pub bound_bits: u32,
    pub exponent: Integer,
}

pub struct Statement {
    pub message: Integer,
    /// Vanishes exactly on the candidate moduli, modulo the group order.
    pub polynomial: Polynomial,
}

impl Statement {
    pub fn from_moduli<G: Group>(message: Integer, moduli: &[Integer]) -> Statement {
        Statement {
            message,
            polynomial: Polynomial::from_roots(moduli, &G::order()),
        }
    }
}

pub struct Witness {
    pub signature: Integer,
    pub modulus: Integer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Proof<G: Group> {
    pub c_modulus: Commitment<G>,
    pub proof_exponentiation: ExponentiationProof<G>,
    pub proof_membership: PolynomialEvalProof<G>,
}

pub struct Protocol<G: Group> {
    pub crs: CRSSignatureSet<G>,
    exponentiation: ExponentiationProtocol<G>,
    membership: PolynomialEvalProtocol<G>,
}

impl<G: Group> Protocol<G> {
    pub fn from_crs(crs: &CRSSignatureSet<G>) -> Result<Protocol<G>, CRSError> {
        let exponentiation = ExponentiationProtocol::from_crs(&CRSExponentiation {
            parameters: crs.parameters.clone(),
            commitment_key: crs.commitment_key.clone(),
            bound_bits: crs.bound_bits,
            exponent: crs.exponent.clone(),
        })?;
        let membership = PolynomialEvalProtocol::from_crs(&CRSPolynomialEval {
            parameters: crs.parameters.clone(),
            commitment_key: crs.commitment_key.clone(),
        })?;
        Ok(Protocol {
            crs: crs.clone(),
            exponentiation,
            membership,
        })
    }

    /// `Com(0, 0)`, the identity.
    fn zero_commitment(&self) -> Result<Commitment<G>, CommitmentError> {
        self.crs
            .commitment_key
            .commit_value(&Integer::new(), &Integer::new())
    }

    pub fn prove<R: MutRandState>(
        &self,
        rng: &mut R,
        statement: &Statement,
        witness: &Witness,
    ) -> Result<Proof<G>, ProofError> {
        let (c_modulus, r_modulus) = self
            .crs
            .commitment_key
            .commit_random(std::slice::from_ref(&witness.modulus), rng)?;

        let proof_exponentiation = self.exponentiation.prove(
            rng,
            &ExponentiationStatement {
                message: statement.message.clone(),
                c_modulus: c_modulus.clone(),
            },
            &ExponentiationWitness {
                signature: witness.signature.clone(),
                modulus: witness.modulus.clone(),
                r_modulus: r_modulus.clone(),
            },
        )?;
        let proof_membership = self.membership.prove(
            rng,
            &PolynomialEvalStatement {
                polynomial: statement.polynomial.clone(),
                c_point: c_modulus.clone(),
                c_evaluation: self.zero_commitment()?,
            },
            &PolynomialEvalWitness {
                point: witness.modulus.clone(),
                r_point: r_modulus,
                evaluation: Integer::new(),
                r_evaluation: Integer::new(),
            },
        )?;

        Ok(Proof {
            c_modulus,
            proof_exponentiation,
            proof_membership,
        })
    }

    pub fn verify(&self, statement: &Statement, proof: &Proof<G>) -> Result<bool, VerificationError> {
        let check_exponentiation = self.exponentiation.verify(
            &ExponentiationStatement {
                message: statement.message.clone(),
                c_modulus: proof.c_modulus.clone(),
            },
            &proof.proof_exponentiation,
        )?;
        let check_membership = self.membership.verify(
            &PolynomialEvalStatement {
                polynomial: statement.polynomial.clone(),
                c_point: proof.c_modulus.clone(),
                c_evaluation: self.zero_commitment()?,
            },
            &proof.proof_membership,
        )?;

        if !check_exponentiation || !check_membership {
            debug!(check_exponentiation, check_membership, "signature set proof rejected");
        }
        Ok(check_exponentiation && check_membership)
    }
}

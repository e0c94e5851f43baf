//! Proves a committed `v` equals `P(x)` for a committed `x` and a public
//! polynomial `P` over `Z_order`, following Bayer and Groth.
//!
//! The prover commits to `x^(2^j)` for every bit `j` of the degree, and the
//! verifier evaluates `P` on blinded powers `f_j = c x^(2^j) + u_j`, with
//! commitments to the cross terms cancelling the blinding.
use crate::{
    commitments::{pedersen::PedersenCommitment, Commitment},
    parameters::Parameters,
    polynomial::Polynomial,
    protocols::{CRSError, ProofError, VerificationError},
    transcript::{derive_challenge, TranscriptItem},
    utils::{random_below, Group},
};
use rug::rand::MutRandState;
use rug::ops::RemRounding;
use rug::Integer;
use std::iter;
use tracing::debug;

const DOMAIN: &[u8] = b"polynomial-eval";

#[derive(Clone)]
pub struct CRSPolynomialEval<G: Group> {
    pub parameters: Parameters,
    pub commitment_key: PedersenCommitment<G>, // g, h
}

pub struct Statement<G: Group> {
    pub polynomial: Polynomial,
    pub c_point: Commitment<G>,
    pub c_evaluation: Commitment<G>,
}

pub struct Witness {
    pub point: Integer,
    pub r_point: Integer,
    pub evaluation: Integer,
    pub r_evaluation: Integer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Proof<G: Group> {
    /// Commitments to `x^(2^j)` for `j = 1..=L`.
    pub c_powers: Vec<Commitment<G>>,
    pub c_blinders: Vec<Commitment<G>>,
    pub c_cross: Vec<Commitment<G>>,
    pub c_deltas: Vec<Commitment<G>>,
    pub challenge: Integer,
    pub f: Vec<Integer>,
    pub z: Vec<Integer>,
    pub w: Vec<Integer>,
    pub z_delta: Integer,
}

pub struct Protocol<G: Group> {
    pub crs: CRSPolynomialEval<G>,
}

/// `ceil(log2(degree))`.
fn levels(degree: usize) -> usize {
    let mut levels = 0;
    while (1usize << levels) < degree {
        levels += 1;
    }
    levels
}

/// `1, c, c^2, ..., c^n` modulo the order.
fn challenge_powers(challenge: &Integer, n: usize, order: &Integer) -> Vec<Integer> {
    let mut powers = vec![Integer::from(1)];
    for k in 0..n {
        let next = Integer::from(&powers[k] * challenge) % order;
        powers.push(next);
    }
    powers
}

impl<G: Group> Protocol<G> {
    pub fn from_crs(crs: &CRSPolynomialEval<G>) -> Result<Protocol<G>, CRSError> {
        crs.parameters.is_valid()?;
        if crs.commitment_key.arity() != 1 {
            return Err(CRSError::KeyArity);
        }
        Ok(Protocol { crs: crs.clone() })
    }

    fn is_supported(polynomial: &Polynomial) -> bool {
        polynomial.degree() >= 1 && *polynomial.modulus() == G::order()
    }

    fn challenge(
        statement: &Statement<G>,
        c_powers: &[Commitment<G>],
        c_deltas: &[Commitment<G>],
        c_cross: &[Commitment<G>],
        c_blinders: &[Commitment<G>],
    ) -> Integer {
        derive_challenge::<G>(
            DOMAIN,
            &[
                TranscriptItem::elements(
                    iter::once(statement.c_point.element())
                        .chain(c_powers.iter().map(|c| c.element())),
                ),
                TranscriptItem::elements(c_deltas.iter().map(|c| c.element())),
                TranscriptItem::elements(c_cross.iter().map(|c| c.element())),
                TranscriptItem::elements(c_blinders.iter().map(|c| c.element())),
            ],
            &G::order(),
        )
    }

    pub fn prove<R: MutRandState>(
        &self,
        rng: &mut R,
        statement: &Statement<G>,
        witness: &Witness,
    ) -> Result<Proof<G>, ProofError> {
        let polynomial = &statement.polynomial;
        if !Self::is_supported(polynomial) {
            return Err(ProofError::InvalidPolynomial);
        }
        let order = G::order();
        let point = witness.point.clone().rem_euc(&order);
        if polynomial.evaluate(&point) != witness.evaluation.clone().rem_euc(&order) {
            return Err(ProofError::RelationNotSatisfied);
        }
        let key = &self.crs.commitment_key;
        let levels = levels(polynomial.degree());
        let n = levels + 1;

        let mut powers = vec![point];
        let mut r = vec![witness.r_point.clone()];
        let mut c_powers = Vec::with_capacity(levels);
        for j in 1..n {
            let power = Integer::from(powers[j - 1].square_ref()) % &order;
            let randomness = random_below(rng, &order);
            c_powers.push(key.commit_value(&power, &randomness)?);
            powers.push(power);
            r.push(randomness);
        }

        let u: Vec<Integer> = (0..n).map(|_| random_below(rng, &order)).collect();
        let s: Vec<Integer> = (0..n).map(|_| random_below(rng, &order)).collect();
        let c_blinders = u
            .iter()
            .zip(s.iter())
            .map(|(u_j, s_j)| key.commit_value(u_j, s_j))
            .collect::<Result<Vec<_>, _>>()?;

        let v: Vec<Integer> = (0..levels).map(|_| random_below(rng, &order)).collect();
        let c_cross = (0..levels)
            .map(|j| key.commit_value(&(Integer::from(&u[j] * &powers[j]) % &order), &v[j]))
            .collect::<Result<Vec<_>, _>>()?;

        // sum_i a_i prod_j (bit_j(i) ? x^(2^j) X + u_j : X) = P(x) X^n + sum_k delta_k X^k
        let mut blinded = Polynomial::new(vec![], &order);
        let identity_factor = Polynomial::new(vec![Integer::new(), Integer::from(1)], &order);
        for (i, coefficient) in polynomial.coefficients().iter().enumerate() {
            let mut term = Polynomial::new(vec![coefficient.clone()], &order);
            for j in 0..n {
                if (i >> j) & 1 == 1 {
                    term = term.mul(&Polynomial::new(vec![u[j].clone(), powers[j].clone()], &order))?;
                } else {
                    term = term.mul(&identity_factor)?;
                }
            }
            blinded = blinded.add(&term)?;
        }
        let t: Vec<Integer> = (0..n).map(|_| random_below(rng, &order)).collect();
        let c_deltas = (0..n)
            .map(|k| key.commit_value(&blinded.coefficient(k), &t[k]))
            .collect::<Result<Vec<_>, _>>()?;

        let challenge = Self::challenge(statement, &c_powers, &c_deltas, &c_cross, &c_blinders);
        let challenge_powers = challenge_powers(&challenge, n, &order);

        let f: Vec<Integer> = (0..n)
            .map(|j| (Integer::from(&challenge * &powers[j]) + &u[j]) % &order)
            .collect();
        let z: Vec<Integer> = (0..n)
            .map(|j| (Integer::from(&challenge * &r[j]) + &s[j]).rem_euc(&order))
            .collect();
        let w: Vec<Integer> = (0..levels)
            .map(|j| {
                (Integer::from(&challenge * &r[j + 1]) - Integer::from(&f[j] * &r[j]) + &v[j])
                    .rem_euc(&order)
            })
            .collect();
        let z_delta = t
            .iter()
            .zip(challenge_powers.iter())
            .fold(
                Integer::from(&challenge_powers[n] * &witness.r_evaluation),
                |acc, (t_k, c_k)| acc + Integer::from(t_k * c_k),
            )
            .rem_euc(&order);

        Ok(Proof {
            c_powers,
            c_blinders,
            c_cross,
            c_deltas,
            challenge,
            f,
            z,
            w,
            z_delta,
        })
    }

    pub fn verify(&self, statement: &Statement<G>, proof: &Proof<G>) -> Result<bool, VerificationError> {
        let polynomial = &statement.polynomial;
        if !Self::is_supported(polynomial) {
            return Err(VerificationError::MalformedProof);
        }
        let levels = levels(polynomial.degree());
        let n = levels + 1;
        if proof.c_powers.len() != levels
            || proof.c_blinders.len() != n
            || proof.c_cross.len() != levels
            || proof.c_deltas.len() != n
            || proof.f.len() != n
            || proof.z.len() != n
            || proof.w.len() != levels
        {
            return Err(VerificationError::MalformedProof);
        }
        let order = G::order();
        let key = &self.crs.commitment_key;
        let challenge = &proof.challenge;

        let expected_challenge = Self::challenge(
            statement,
            &proof.c_powers,
            &proof.c_deltas,
            &proof.c_cross,
            &proof.c_blinders,
        );
        let check_challenge = expected_challenge == proof.challenge;

        let commitments: Vec<&Commitment<G>> = iter::once(&statement.c_point)
            .chain(proof.c_powers.iter())
            .collect();

        let mut check_blinders = true;
        for j in 0..n {
            let expected = key.commit_value(&proof.f[j], &proof.z[j])?;
            check_blinders &= commitments[j].scale_by(challenge).combine(&proof.c_blinders[j]) == expected;
        }

        let mut check_cross = true;
        for j in 0..levels {
            let expected = key.commit_value(&Integer::new(), &proof.w[j])?;
            let actual = commitments[j + 1]
                .scale_by(challenge)
                .combine(&commitments[j].scale_by(&-proof.f[j].clone()))
                .combine(&proof.c_cross[j]);
            check_cross &= actual == expected;
        }

        let challenge_powers = challenge_powers(challenge, n, &order);
        let blinded_evaluation = polynomial
            .coefficients()
            .iter()
            .enumerate()
            .fold(Integer::new(), |acc, (i, coefficient)| {
                let term = (0..n).fold(coefficient.clone(), |term, j| {
                    let factor = if (i >> j) & 1 == 1 { &proof.f[j] } else { challenge };
                    Integer::from(&term * factor) % &order
                });
                (acc + term) % &order
            });
        let combined = proof
            .c_deltas
            .iter()
            .zip(challenge_powers.iter())
            .fold(
                statement.c_evaluation.scale_by(&challenge_powers[n]),
                |acc, (c_delta, c_k)| acc.combine(&c_delta.scale_by(c_k)),
            );
        let check_evaluation = combined == key.commit_value(&blinded_evaluation, &proof.z_delta)?;

        let valid = check_challenge && check_blinders && check_cross && check_evaluation;
        if !valid {
            debug!(
                check_challenge,
                check_blinders, check_cross, check_evaluation, "polynomial evaluation rejected"
            );
        }
        Ok(valid)
    }
}

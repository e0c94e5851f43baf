//! Range proof for committed integers, in the style of Boudot with the
//! four-squares-free decomposition of Peng and Bao.
//!
//! For `C = g^x h^r` and public `lower <= upper`, the prover shows
//! `a = x - lower + 1 > 0` and `b = upper - x + 1 > 0` by hiding `w^2 a b`
//! behind a square and a sum of three non-negative parts.
use crate::{
    commitments::{pedersen::PedersenCommitment, Commitment},
    parameters::Parameters,
    protocols::{
        same_log::{
            CRSSameLog, Proof as SameLogProof, Protocol as SameLogProtocol,
            Statement as SameLogStatement, Witness as SameLogWitness,
        },
        square::{
            Proof as SquareProof, Protocol as SquareProtocol, Statement as SquareStatement,
            Witness as SquareWitness,
        },
        CRSError, ProofError, VerificationError,
    },
    transcript::{derive_challenge, TranscriptItem},
    utils::{divide, double_exp, random_below, random_bits, Group},
};
use rug::rand::MutRandState;
use rug::ops::RemRounding;
use rug::Integer;
use std::cmp::Ordering;
use tracing::debug;

const DOMAIN: &[u8] = b"range";

#[derive(Clone)]
pub struct CRSRange<G: Group> {
    pub parameters: Parameters,
    pub commitment_key: PedersenCommitment<G>, // g, h
}

pub struct Statement<G: Group> {
    pub commitment: Commitment<G>,
    pub lower: Integer,
    pub upper: Integer,
}

pub struct Witness {
    pub value: Integer,
    pub randomness: Integer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Proof<G: Group> {
    pub c_lower: G::Elem,
    pub c_upper: G::Elem,
    pub c_diff: G::Elem,
    pub c_square: G::Elem,
    pub c_m1: G::Elem,
    pub c_m2: G::Elem,
    pub c_m3: G::Elem,
    pub proof_same_log: SameLogProof,
    pub proof_square: SquareProof<G>,
    pub proof_square_m3: SquareProof<G>,
    pub challenge1: Integer,
    pub challenge2: Integer,
    pub x1: Integer,
    pub x2: Integer,
    pub y1: Integer,
    pub y2: Integer,
}

pub struct Protocol<G: Group> {
    pub crs: CRSRange<G>,
}

impl<G: Group> Protocol<G> {
    pub fn from_crs(crs: &CRSRange<G>) -> Result<Protocol<G>, CRSError> {
        crs.parameters.is_valid()?;
        if crs.commitment_key.arity() != 1 {
            return Err(CRSError::KeyArity);
        }
        Ok(Protocol { crs: crs.clone() })
    }

    fn same_log(&self) -> SameLogProtocol {
        SameLogProtocol::from_crs(&CRSSameLog {
            parameters: self.crs.parameters.clone(),
        })
    }

    fn square(&self) -> SquareProtocol {
        SquareProtocol::from_crs(&CRSSameLog {
            parameters: self.crs.parameters.clone(),
        })
    }

    /// `C / g^(lower - 1)` and `g^(upper + 1) / C`.
    fn shifted_commitments(&self, statement: &Statement<G>) -> (G::Elem, G::Elem) {
        let g = self.crs.commitment_key.g();
        let c = statement.commitment.element();
        let c_lower = divide::<G>(c, &G::exp(g, &Integer::from(&statement.lower - 1u32)));
        let c_upper = divide::<G>(&G::exp(g, &Integer::from(&statement.upper + 1u32)), c);
        (c_lower, c_upper)
    }

    /// Width of the root `w`, enough to hide `(upper - lower + 2)^2` behind
    /// the decomposition responses.
    fn randomness_bits(&self, statement: &Statement<G>) -> u32 {
        let width = Integer::from(&statement.upper - &statement.lower) + 2u32;
        self.crs
            .parameters
            .range_randomness_bits(width.significant_bits())
    }

    fn challenge_modulus(&self) -> Integer {
        Integer::from(Integer::u_pow_u(
            2,
            u32::from(self.crs.parameters.security_soundness),
        ))
    }

    fn challenge(&self, c_m1: &G::Elem, c_m2: &G::Elem, c_m3: &G::Elem) -> Integer {
        derive_challenge::<G>(
            DOMAIN,
            &[
                TranscriptItem::Element(c_m1),
                TranscriptItem::Element(c_m2),
                TranscriptItem::Element(c_m3),
            ],
            &self.challenge_modulus(),
        )
    }

    pub fn prove<R: MutRandState>(
        &self,
        rng: &mut R,
        statement: &Statement<G>,
        witness: &Witness,
    ) -> Result<Proof<G>, ProofError> {
        if statement.upper < statement.lower {
            return Err(ProofError::InvalidRange);
        }
        if witness.value < statement.lower || witness.value > statement.upper {
            return Err(ProofError::RangeViolation);
        }
        let g = self.crs.commitment_key.g();
        let h = self.crs.commitment_key.h();
        let order = G::order();
        let bits = self.randomness_bits(statement);

        let (c_lower, c_upper) = self.shifted_commitments(statement);
        let a: Integer = Integer::from(&witness.value - &statement.lower) + 1u32;
        let b: Integer = Integer::from(&statement.upper - &witness.value) + 1u32;

        // c_diff = c_lower^b h^r_d = g^(ab) h^(rb + r_d)
        let r_d = random_below(rng, &order);
        let c_diff = double_exp::<G>(&c_lower, &b, h, &r_d);
        let proof_same_log = self.same_log().prove(
            rng,
            &SameLogStatement::<G> {
                g1: g.clone(),
                h1: h.clone(),
                c1: c_upper.clone(),
                g2: c_lower.clone(),
                h2: h.clone(),
                c2: c_diff.clone(),
            },
            &SameLogWitness {
                x: b.clone(),
                r1: -witness.randomness.clone(),
                r2: r_d.clone(),
            },
        );

        let w: Integer = random_bits(rng, bits) + 1u32;
        let w_square = Integer::from(w.square_ref());
        let r_s = random_below(rng, &order);
        let c_square = double_exp::<G>(&c_diff, &w_square, h, &r_s);
        let proof_square = self.square().prove(
            rng,
            &SquareStatement::<G> {
                g: c_diff.clone(),
                h: h.clone(),
                c_square: c_square.clone(),
            },
            &SquareWitness {
                root: w,
                r: r_s.clone(),
            },
        );

        // c_square = g^value h^randomness
        let value = Integer::from(&w_square * &a) * &b;
        let randomness = (Integer::from(
            &w_square * &(Integer::from(&witness.randomness * &b) + &r_d),
        ) + &r_s)
            .rem_euc(&order);

        let m4 = Integer::from(value.sqrt_ref()).random_below(rng);
        let m3 = Integer::from(m4.square_ref());
        let m2 = (Integer::from(&value - &m3) + 1u32).random_below(rng);
        let m1 = Integer::from(&value - &m3) - &m2;

        let r2 = random_below(rng, &order);
        let r3 = random_below(rng, &order);
        let r1 = (Integer::from(&randomness - &r2) - &r3).rem_euc(&order);

        let c_m1 = double_exp::<G>(g, &m1, h, &r1);
        let c_m2 = double_exp::<G>(g, &m2, h, &r2);
        let c_m3 = divide::<G>(&c_square, &G::op(&c_m1, &c_m2));
        let proof_square_m3 = self.square().prove(
            rng,
            &SquareStatement::<G> {
                g: g.clone(),
                h: h.clone(),
                c_square: c_m3.clone(),
            },
            &SquareWitness { root: m4, r: r3.clone() },
        );

        let challenge1 = self.challenge(&c_m1, &c_m2, &c_m3);
        let challenge2 = self.challenge(&c_m1, &c_m2, &c_m3);

        let x1 = Integer::from(&challenge1 * &m1) + &m2 + &m3;
        let x2 = Integer::from(&challenge2 * &m2) + &m1 + &m3;
        let y1 = (Integer::from(&challenge1 * &r1) + &r2 + &r3).rem_euc(&order);
        let y2 = (Integer::from(&challenge2 * &r2) + &r1 + &r3).rem_euc(&order);

        Ok(Proof {
            c_lower,
            c_upper,
            c_diff,
            c_square,
            c_m1,
            c_m2,
            c_m3,
            proof_same_log,
            proof_square,
            proof_square_m3,
            challenge1,
            challenge2,
            x1,
            x2,
            y1,
            y2,
        })
    }

    pub fn verify(&self, statement: &Statement<G>, proof: &Proof<G>) -> Result<bool, VerificationError> {
        if statement.upper < statement.lower {
            return Err(VerificationError::InvalidRange);
        }
        let g = self.crs.commitment_key.g();
        let h = self.crs.commitment_key.h();

        let (c_lower, c_upper) = self.shifted_commitments(statement);
        let check_shifted = c_lower == proof.c_lower && c_upper == proof.c_upper;

        let check_same_log = self.same_log().verify(
            &SameLogStatement::<G> {
                g1: g.clone(),
                h1: h.clone(),
                c1: proof.c_upper.clone(),
                g2: proof.c_lower.clone(),
                h2: h.clone(),
                c2: proof.c_diff.clone(),
            },
            &proof.proof_same_log,
        );
        let check_square = self.square().verify(
            &SquareStatement::<G> {
                g: proof.c_diff.clone(),
                h: h.clone(),
                c_square: proof.c_square.clone(),
            },
            &proof.proof_square,
        );
        let check_square_m3 = self.square().verify(
            &SquareStatement::<G> {
                g: g.clone(),
                h: h.clone(),
                c_square: proof.c_m3.clone(),
            },
            &proof.proof_square_m3,
        );
        let check_decomposition =
            proof.c_square == G::op(&G::op(&proof.c_m1, &proof.c_m2), &proof.c_m3);

        let expected_challenge = self.challenge(&proof.c_m1, &proof.c_m2, &proof.c_m3);
        let check_challenges =
            expected_challenge == proof.challenge1 && expected_challenge == proof.challenge2;

        let check_response1 = G::op(
            &G::op(&G::exp(&proof.c_m1, &proof.challenge1), &proof.c_m2),
            &proof.c_m3,
        ) == double_exp::<G>(g, &proof.x1, h, &proof.y1);
        let check_response2 = G::op(
            &G::op(&proof.c_m1, &G::exp(&proof.c_m2, &proof.challenge2)),
            &proof.c_m3,
        ) == double_exp::<G>(g, &proof.x2, h, &proof.y2);

        let check_positive =
            proof.x1.cmp0() != Ordering::Less && proof.x2.cmp0() != Ordering::Less;

        let checks = [
            ("shifted commitments", check_shifted),
            ("same-log", check_same_log),
            ("square", check_square),
            ("square m3", check_square_m3),
            ("decomposition", check_decomposition),
            ("challenges", check_challenges),
            ("response 1", check_response1),
            ("response 2", check_response2),
            ("positivity", check_positive),
        ];
        if let Some((check, _)) = checks.iter().find(|(_, passed)| !passed) {
            debug!(check = *check, "range proof rejected");
            return Ok(false);
        }
        Ok(true)
    }
}

//! Proves two commitments, each under its own pair of bases, hide the same
//! exponent.
use crate::{
    parameters::Parameters,
    transcript::{derive_challenge, TranscriptItem},
    utils::{double_exp, hiding_space, random_below, Group},
};
use rug::rand::MutRandState;
use rug::ops::RemRounding;
use rug::Integer;
use tracing::debug;

const DOMAIN: &[u8] = b"same-log";

#[derive(Clone)]
pub struct CRSSameLog {
    pub parameters: Parameters,
}

/// `c1 = g1^x h1^r1` and `c2 = g2^x h2^r2`.
pub struct Statement<G: Group> {
    pub g1: G::Elem,
    pub h1: G::Elem,
    pub c1: G::Elem,
    pub g2: G::Elem,
    pub h2: G::Elem,
    pub c2: G::Elem,
}

pub struct Witness {
    pub x: Integer,
    pub r1: Integer,
    pub r2: Integer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Proof {
    pub challenge: Integer,
    pub s_x: Integer,
    pub s_r1: Integer,
    pub s_r2: Integer,
}

pub struct Protocol {
    pub crs: CRSSameLog,
}

impl Protocol {
    pub fn from_crs(crs: &CRSSameLog) -> Protocol {
        Protocol { crs: crs.clone() }
    }

    fn challenge<G: Group>(statement: &Statement<G>, t1: &G::Elem, t2: &G::Elem, order: &Integer) -> Integer {
        derive_challenge::<G>(
            DOMAIN,
            &[
                TranscriptItem::elements(vec![
                    &statement.g1,
                    &statement.h1,
                    &statement.c1,
                    &statement.g2,
                    &statement.h2,
                    &statement.c2,
                ]),
                TranscriptItem::Element(t1),
                TranscriptItem::Element(t2),
            ],
            order,
        )
    }

    pub fn prove<G: Group, R: MutRandState>(
        &self,
        rng: &mut R,
        statement: &Statement<G>,
        witness: &Witness,
    ) -> Proof {
        let order = G::order();
        // exponents only matter modulo the order, so every secret is below it
        let x = witness.x.clone().rem_euc(&order);
        let r1 = witness.r1.clone().rem_euc(&order);
        let r2 = witness.r2.clone().rem_euc(&order);

        let space = hiding_space(&order, order.significant_bits(), self.crs.parameters.security_zk);
        let r_x = random_below(rng, &space);
        let r_1 = random_below(rng, &space);
        let r_2 = random_below(rng, &space);

        let t1 = double_exp::<G>(&statement.g1, &r_x, &statement.h1, &r_1);
        let t2 = double_exp::<G>(&statement.g2, &r_x, &statement.h2, &r_2);
        let challenge = Self::challenge(statement, &t1, &t2, &order);

        let s_x = r_x + Integer::from(&challenge * &x);
        let s_r1 = r_1 + Integer::from(&challenge * &r1);
        let s_r2 = r_2 + Integer::from(&challenge * &r2);

        Proof {
            challenge,
            s_x,
            s_r1,
            s_r2,
        }
    }

    pub fn verify<G: Group>(&self, statement: &Statement<G>, proof: &Proof) -> bool {
        let minus_c = -proof.challenge.clone();
        let t1 = G::op(
            &double_exp::<G>(&statement.g1, &proof.s_x, &statement.h1, &proof.s_r1),
            &G::exp(&statement.c1, &minus_c),
        );
        let t2 = G::op(
            &double_exp::<G>(&statement.g2, &proof.s_x, &statement.h2, &proof.s_r2),
            &G::exp(&statement.c2, &minus_c),
        );
        let expected = Self::challenge(statement, &t1, &t2, &G::order());

        if expected != proof.challenge {
            debug!("same-log challenge mismatch");
            return false;
        }
        true
    }
}

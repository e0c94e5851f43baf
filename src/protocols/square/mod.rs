//! Proves a commitment `g^(s^2) h^r` hides a perfect square, by committing to
//! the root and showing both commitments share the exponent `s`.
use crate::{
    protocols::same_log::{
        CRSSameLog, Proof as SameLogProof, Protocol as SameLogProtocol,
        Statement as SameLogStatement, Witness as SameLogWitness,
    },
    utils::{double_exp, random_below, Group},
};
use rug::rand::MutRandState;
use rug::Integer;

pub struct Statement<G: Group> {
    pub g: G::Elem,
    pub h: G::Elem,
    pub c_square: G::Elem,
}

pub struct Witness {
    pub root: Integer,
    pub r: Integer,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Proof<G: Group> {
    pub c_root: G::Elem,
    pub proof_same_log: SameLogProof,
}

pub struct Protocol {
    pub crs: CRSSameLog,
}

fn same_log_statement<G: Group>(statement: &Statement<G>, c_root: &G::Elem) -> SameLogStatement<G> {
    SameLogStatement {
        g1: statement.g.clone(),
        h1: statement.h.clone(),
        c1: c_root.clone(),
        g2: c_root.clone(),
        h2: statement.h.clone(),
        c2: statement.c_square.clone(),
    }
}

impl Protocol {
    pub fn from_crs(crs: &CRSSameLog) -> Protocol {
        Protocol { crs: crs.clone() }
    }

    pub fn prove<G: Group, R: MutRandState>(
        &self,
        rng: &mut R,
        statement: &Statement<G>,
        witness: &Witness,
    ) -> Proof<G> {
        let r_root = random_below(rng, &G::order());
        let c_root = double_exp::<G>(&statement.g, &witness.root, &statement.h, &r_root);
        // c_square = c_root^s h^(r - s*r_root)
        let r_square = witness.r.clone() - Integer::from(&witness.root * &r_root);

        let same_log = SameLogProtocol::from_crs(&self.crs);
        let proof_same_log = same_log.prove(
            rng,
            &same_log_statement(statement, &c_root),
            &SameLogWitness {
                x: witness.root.clone(),
                r1: r_root,
                r2: r_square,
            },
        );

        Proof {
            c_root,
            proof_same_log,
        }
    }

    pub fn verify<G: Group>(&self, statement: &Statement<G>, proof: &Proof<G>) -> bool {
        SameLogProtocol::from_crs(&self.crs).verify(
            &same_log_statement(statement, &proof.c_root),
            &proof.proof_same_log,
        )
    }
}

//! Implements Pedersen multi-value commitments and their homomorphism.

use crate::utils::Group;
use rug::Integer;

pub mod pedersen;

quick_error! {
    #[derive(Debug)]
    pub enum CommitmentError {
        WrongOpening {}
        Arity { expected: usize, actual: usize } {
            display("expected {} committed values, got {}", expected, actual)
        }
        InvalidKey {}
    }
}

/// A commitment is a single group element. Composition never mutates, every
/// operation returns a fresh commitment.
#[derive(Clone, Debug, PartialEq)]
pub struct Commitment<G: Group>(pub G::Elem);

impl<G: Group> Commitment<G> {
    pub fn new(element: G::Elem) -> Commitment<G> {
        Commitment(element)
    }

    pub fn element(&self) -> &G::Elem {
        &self.0
    }

    /// Commits to the sum of the values under the sum of the blindings.
    pub fn combine(&self, other: &Commitment<G>) -> Commitment<G> {
        Commitment(G::op(&self.0, &other.0))
    }

    /// Commits to `k` times the values under `k` times the blinding.
    pub fn scale_by(&self, k: &Integer) -> Commitment<G> {
        Commitment(G::exp(&self.0, k))
    }

    pub fn inverse(&self) -> Commitment<G> {
        Commitment(G::inv(&self.0))
    }

    pub fn divide(&self, other: &Commitment<G>) -> Commitment<G> {
        self.combine(&other.inverse())
    }
}

use crate::commitments::{Commitment, CommitmentError};
use crate::utils::{random_below, Group};
use rug::rand::MutRandState;
use rug::Integer;

/// A commitment key of `n` value generators followed by the blinding
/// generator `h`.
#[derive(Clone, Debug)]
pub struct PedersenCommitment<G: Group> {
    generators: Vec<G::Elem>,
}

impl<G: Group> PedersenCommitment<G> {
    /// Derives `n + 1` generators by hashing the decimal strings `"0"..="n"`,
    /// so nobody knows a discrete log relation between them.
    pub fn setup(n: usize) -> PedersenCommitment<G> {
        PedersenCommitment {
            generators: (0..=n)
                .map(|i| G::hash_to_elem(i.to_string().as_bytes()))
                .collect(),
        }
    }

    pub fn from_generators(generators: Vec<G::Elem>) -> Result<PedersenCommitment<G>, CommitmentError> {
        if generators.len() < 2 {
            return Err(CommitmentError::InvalidKey);
        }
        Ok(PedersenCommitment { generators })
    }

    /// A single-value key `(g, h)`.
    pub fn new(g: &G::Elem, h: &G::Elem) -> PedersenCommitment<G> {
        PedersenCommitment {
            generators: vec![g.clone(), h.clone()],
        }
    }

    /// Number of values committed to at once.
    pub fn arity(&self) -> usize {
        self.generators.len().saturating_sub(1)
    }

    pub fn generators(&self) -> &[G::Elem] {
        &self.generators
    }

    pub fn g(&self) -> &G::Elem {
        &self.generators[0]
    }

    pub fn h(&self) -> &G::Elem {
        &self.generators[self.generators.len() - 1]
    }

    pub fn commit(
        &self,
        values: &[Integer],
        randomness: &Integer,
    ) -> Result<Commitment<G>, CommitmentError> {
        if values.len() != self.arity() {
            return Err(CommitmentError::Arity {
                expected: self.arity(),
                actual: values.len(),
            });
        }
        let element = values
            .iter()
            .zip(self.generators.iter())
            .fold(G::exp(self.h(), randomness), |acc, (value, generator)| {
                G::op(&acc, &G::exp(generator, value))
            });
        Ok(Commitment(element))
    }

    pub fn commit_value(
        &self,
        value: &Integer,
        randomness: &Integer,
    ) -> Result<Commitment<G>, CommitmentError> {
        self.commit(std::slice::from_ref(value), randomness)
    }

    /// Commits with a blinding drawn uniformly from `[0, order)` and returns it
    /// alongside the commitment.
    pub fn commit_random<R: MutRandState>(
        &self,
        values: &[Integer],
        rng: &mut R,
    ) -> Result<(Commitment<G>, Integer), CommitmentError> {
        let randomness = random_below(rng, &G::order());
        let commitment = self.commit(values, &randomness)?;
        Ok((commitment, randomness))
    }

    pub fn open(
        &self,
        commitment: &Commitment<G>,
        values: &[Integer],
        randomness: &Integer,
    ) -> Result<(), CommitmentError> {
        let expected = self.commit(values, randomness)?;
        if expected == *commitment {
            Ok(())
        } else {
            Err(CommitmentError::WrongOpening)
        }
    }
}

use crate::{commitments::CommitmentError, parameters::ParametersError, polynomial::PolynomialError};

pub mod exponentiation;
pub mod modular;
pub mod polynomial_eval;
pub mod range;
pub mod same_log;
pub mod signature_set;
pub mod square;

quick_error! {
    #[derive(Debug)]
    pub enum CRSError {
        InvalidParameters {}
        InvalidExponent {}
        KeyArity {}
        ParametersError(err: ParametersError) {
            from()
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum ProofError {
        InvalidRange {}
        RangeViolation {}
        DivisionError {}
        RelationNotSatisfied {}
        InvalidPolynomial {}
        CommitmentError(err: CommitmentError) {
            from()
        }
        CRSError(err: CRSError) {
            from()
        }
        PolynomialError(err: PolynomialError) {
            from()
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum VerificationError {
        KeyArity {}
        InvalidRange {}
        MalformedProof {}
        CommitmentError(err: CommitmentError) {
            from()
        }
        CRSError(err: CRSError) {
            from()
        }
    }
}

//! Polynomials over `Z_modulus` with coefficients stored low to high.

use rug::ops::RemRounding;
use rug::Integer;
use std::cmp::Ordering;

quick_error! {
    #[derive(Debug)]
    pub enum PolynomialError {
        ModulusMismatch {}
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<Integer>,
    modulus: Integer,
}

impl Polynomial {
    /// Reduces every coefficient and trims leading zeros. The zero polynomial
    /// keeps a single zero coefficient.
    pub fn new(coefficients: Vec<Integer>, modulus: &Integer) -> Polynomial {
        let mut coefficients: Vec<Integer> = coefficients
            .into_iter()
            .map(|coefficient| coefficient.rem_euc(modulus))
            .collect();
        while coefficients.len() > 1
            && coefficients.last().map_or(false, |c| c.cmp0() == Ordering::Equal)
        {
            coefficients.pop();
        }
        if coefficients.is_empty() {
            coefficients.push(Integer::new());
        }
        Polynomial {
            coefficients,
            modulus: modulus.clone(),
        }
    }

    /// `(X - r_1)(X - r_2)...(X - r_k)`, built one factor at a time.
    pub fn from_roots(roots: &[Integer], modulus: &Integer) -> Polynomial {
        let mut coefficients = vec![Integer::from(1)];
        for root in roots {
            let mut next = vec![Integer::new(); coefficients.len() + 1];
            for (i, coefficient) in coefficients.iter().enumerate() {
                next[i + 1] += coefficient;
                next[i] -= Integer::from(coefficient * root);
            }
            coefficients = next
                .into_iter()
                .map(|coefficient| coefficient.rem_euc(modulus))
                .collect();
        }
        Polynomial::new(coefficients, modulus)
    }

    pub fn coefficients(&self) -> &[Integer] {
        &self.coefficients
    }

    /// The coefficient of `X^k`, zero past the degree.
    pub fn coefficient(&self, k: usize) -> Integer {
        self.coefficients.get(k).cloned().unwrap_or_default()
    }

    pub fn modulus(&self) -> &Integer {
        &self.modulus
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn evaluate(&self, point: &Integer) -> Integer {
        self.coefficients
            .iter()
            .rev()
            .fold(Integer::new(), |acc, coefficient| {
                (acc * point + coefficient).rem_euc(&self.modulus)
            })
    }

    pub fn add(&self, other: &Polynomial) -> Result<Polynomial, PolynomialError> {
        if self.modulus != other.modulus {
            return Err(PolynomialError::ModulusMismatch);
        }
        let length = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..length)
            .map(|k| self.coefficient(k) + other.coefficient(k))
            .collect();
        Ok(Polynomial::new(coefficients, &self.modulus))
    }

    pub fn mul(&self, other: &Polynomial) -> Result<Polynomial, PolynomialError> {
        if self.modulus != other.modulus {
            return Err(PolynomialError::ModulusMismatch);
        }
        let mut coefficients =
            vec![Integer::new(); self.coefficients.len() + other.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                coefficients[i + j] += Integer::from(a * b);
            }
        }
        Ok(Polynomial::new(coefficients, &self.modulus))
    }

    pub fn scale(&self, k: &Integer) -> Polynomial {
        let coefficients = self
            .coefficients
            .iter()
            .map(|coefficient| Integer::from(coefficient * k))
            .collect();
        Polynomial::new(coefficients, &self.modulus)
    }
}

#[cfg(test)]
mod test {
    use super::Polynomial;
    use rug::Integer;

    fn ints(values: &[i64]) -> Vec<Integer> {
        values.iter().map(|v| Integer::from(*v)).collect()
    }

    #[test]
    fn test_from_roots() {
        let modulus = Integer::from(101);
        let polynomial = Polynomial::from_roots(&ints(&[2, 3]), &modulus);
        // X^2 - 5X + 6
        assert_eq!(polynomial.coefficients(), &ints(&[6, 96, 1])[..]);
        assert_eq!(polynomial.degree(), 2);
        assert_eq!(polynomial.evaluate(&Integer::from(2)), 0);
        assert_eq!(polynomial.evaluate(&Integer::from(3)), 0);
        assert_eq!(polynomial.evaluate(&Integer::from(4)), 2);
    }

    #[test]
    fn test_arithmetic() {
        let modulus = Integer::from(101);
        let a = Polynomial::new(ints(&[1, 1]), &modulus);
        let b = Polynomial::new(ints(&[-1, 1]), &modulus);
        assert_eq!(a.mul(&b).unwrap(), Polynomial::new(ints(&[-1, 0, 1]), &modulus));
        assert_eq!(a.add(&b).unwrap(), Polynomial::new(ints(&[0, 2]), &modulus));
        assert_eq!(a.scale(&Integer::from(3)), Polynomial::new(ints(&[3, 3]), &modulus));
        assert!(a.add(&Polynomial::new(ints(&[1]), &Integer::from(7))).is_err());
    }

    #[test]
    fn test_trims_leading_zeros() {
        let modulus = Integer::from(7);
        let polynomial = Polynomial::new(ints(&[3, 7, 14]), &modulus);
        assert_eq!(polynomial.degree(), 0);
        assert_eq!(Polynomial::new(vec![], &modulus).coefficients(), &ints(&[0])[..]);
    }
}

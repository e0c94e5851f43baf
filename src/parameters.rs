//! Derives security parameters given a desired security level or a group.

use crate::utils::Group;
use std::fmt;

#[derive(Clone, Debug)]
pub struct Parameters {
    /// Desired security level.
    pub security_level: u16,
    /// Zero-knowledge security. Sigma blindings exceed the largest
    /// `challenge * secret` by `2^security_zk`.
    pub security_zk: u16,
    /// Soundness security. Bit length of the range proof challenges.
    pub security_soundness: u16,
    /// Bit length of the group order.
    pub order_bits: u16,
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Parameters(λ={} (security level), λ_s={} (soundness security), λ_z={} (zero-knowledge security), ν={} (order bits))",
            self.security_level,
            self.security_soundness,
            self.security_zk,
            self.order_bits,
        )
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum ParametersError {
        InvalidParameters {}
    }
}

impl Parameters {
    /// Derive parameters for a desired security level in a group whose order
    /// has `order_bits` bits.
    pub fn from_security_level(
        security_level: u16,
        order_bits: u16,
    ) -> Result<Parameters, ParametersError> {
        let security_soundness = security_level
            .checked_sub(8)
            .ok_or(ParametersError::InvalidParameters)?;
        let parameters = Parameters {
            security_level,
            security_zk: security_level,
            security_soundness,
            order_bits,
        };

        parameters.is_valid()?;
        Ok(parameters)
    }

    /// Derive 128-bit parameters for a group.
    pub fn from_group<G: Group>() -> Result<Parameters, ParametersError> {
        Self::from_security_level(128, G::order().significant_bits() as u16)
    }

    /// Bit length of the root hiding a range of `range_bits` bits inside the
    /// range proof: the width of the range, plus the soundness challenge it is
    /// multiplied by, plus the statistical margin.
    pub fn range_randomness_bits(&self, range_bits: u32) -> u32 {
        range_bits + u32::from(self.security_soundness) + u32::from(self.security_zk)
    }

    /// Challenges must be nonzero and shorter than the group order.
    pub fn is_valid(&self) -> Result<(), ParametersError> {
        if self.security_soundness > 0
            && self.security_soundness < self.order_bits
            && self.security_zk > 0
        {
            Ok(())
        } else {
            Err(ParametersError::InvalidParameters)
        }
    }
}

#[cfg(test)]
mod test {
    use super::Parameters;
    use crate::utils::Modp2048;

    #[test]
    fn test_valid_for_128() {
        let params = Parameters::from_security_level(128, 255).unwrap();
        params.is_valid().unwrap();
        assert_eq!(params.security_soundness, 120);
        assert_eq!(params.security_zk, 128);
        assert_eq!(params.range_randomness_bits(2051), 2051 + 120 + 128);
    }

    #[test]
    fn test_invalid() {
        assert!(Parameters::from_security_level(4, 255).is_err());
        assert!(Parameters::from_security_level(128, 64).is_err());
    }

    #[test]
    fn test_valid_for_modp() {
        let params = Parameters::from_group::<Modp2048>().unwrap();
        assert_eq!(params.order_bits, 2047);
        println!("{}", params);
    }

    #[cfg(all(test, feature = "arkworks"))]
    #[test]
    fn test_valid_for_curve() {
        let params = Parameters::from_group::<crate::utils::Bls12G1>().unwrap();
        assert_eq!(params.order_bits, 255);
    }
}

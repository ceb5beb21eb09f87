//! Exact rational helpers for ratios and error rates.

use num_rational::Ratio;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serializer};

/// Exact rational used for ratios and error rates.
pub type Rational = Ratio<u64>;

/// Error parsing a rational string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RatioError {
    #[error("Malformed rational '{0}': expected 'N/D' or 'N'")]
    Malformed(String),

    #[error("Ratio {0} is outside [0, 1]")]
    OutOfRange(String),
}

/// Parse `"N/D"` or `"N"` into a reduced rational.
pub fn parse_ratio(s: &str) -> Result<Rational, RatioError> {
    s.trim()
        .parse::<Rational>()
        .map_err(|_| RatioError::Malformed(s.to_string()))
}

/// Parse a rational and require it to lie in `[0, 1]`.
pub fn parse_unit_ratio(s: &str) -> Result<Rational, RatioError> {
    let ratio = parse_ratio(s)?;
    if ratio > Rational::from_integer(1) {
        return Err(RatioError::OutOfRange(ratio.to_string()));
    }
    Ok(ratio)
}

/// `floor(count * ratio)` without intermediate overflow.
pub fn floor_mul(count: usize, ratio: &Rational) -> usize {
    let product = count as u128 * *ratio.numer() as u128 / *ratio.denom() as u128;
    product as usize
}

/// Bernoulli trial with probability `ratio`.
///
/// Draws uniformly in `[1, denom]` and succeeds iff the draw is `<= numer`.
pub fn bernoulli<R: Rng>(ratio: &Rational, rng: &mut R) -> bool {
    rng.gen_range(1..=*ratio.denom()) <= *ratio.numer()
}

/// Serialize a rational as its `N/D` string.
pub fn serialize<S: Serializer>(ratio: &Rational, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format!("{}/{}", ratio.numer(), ratio.denom()))
}

/// Deserialize a rational from an `N/D` string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rational, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse_ratio(&s).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_ratio() {
        assert_eq!(parse_ratio("1/10").unwrap(), Rational::new(1, 10));
        assert_eq!(parse_ratio(" 2/4 ").unwrap(), Rational::new(1, 2));
        assert_eq!(parse_ratio("0").unwrap(), Rational::from_integer(0));
        assert!(matches!(parse_ratio("1/0"), Err(RatioError::Malformed(_))));
        assert!(matches!(parse_ratio("0.1"), Err(RatioError::Malformed(_))));
        assert!(matches!(parse_ratio("-1/2"), Err(RatioError::Malformed(_))));
    }

    #[test]
    fn test_parse_unit_ratio() {
        assert_eq!(parse_unit_ratio("1").unwrap(), Rational::from_integer(1));
        assert!(matches!(
            parse_unit_ratio("3/2"),
            Err(RatioError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_floor_mul() {
        assert_eq!(floor_mul(10, &Rational::new(1, 10)), 1);
        assert_eq!(floor_mul(7, &Rational::new(1, 2)), 3);
        assert_eq!(floor_mul(9, &Rational::new(1, 10)), 0);
        assert_eq!(floor_mul(5, &Rational::from_integer(1)), 5);
        assert_eq!(floor_mul(0, &Rational::new(1, 2)), 0);
    }

    #[test]
    fn test_bernoulli_extremes() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(bernoulli(&Rational::from_integer(1), &mut rng));
            assert!(!bernoulli(&Rational::from_integer(0), &mut rng));
        }
    }
}

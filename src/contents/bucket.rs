//! Horizontal bucket partitioning.

use crate::error::{Error, Result};

/// Check that delimiters are finite and strictly ascending.
pub(crate) fn validate_delimiters(delimiters: &[f64]) -> Result<()> {
    if let Some(bad) = delimiters.iter().find(|d| !d.is_finite()) {
        return Err(Error::Configuration(format!(
            "bucket delimiter {} is not finite",
            bad
        )));
    }
    if let Some(pair) = delimiters.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(Error::Configuration(format!(
            "bucket delimiters must be strictly ascending, got {} before {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// Smallest `i` with `x < delimiters[i]`, or `delimiters.len()`.
pub(crate) fn bucket_for(x: f64, delimiters: &[f64]) -> usize {
    delimiters.partition_point(|&d| d <= x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_for() {
        let delimiters = [100.0, 200.0];
        assert_eq!(bucket_for(50.0, &delimiters), 0);
        assert_eq!(bucket_for(150.0, &delimiters), 1);
        assert_eq!(bucket_for(250.0, &delimiters), 2);
        // Boundaries belong to the right-hand bucket.
        assert_eq!(bucket_for(100.0, &delimiters), 1);
        assert_eq!(bucket_for(200.0, &delimiters), 2);
    }

    #[test]
    fn test_empty_delimiters() {
        assert_eq!(bucket_for(-1.0e6, &[]), 0);
        assert_eq!(bucket_for(1.0e6, &[]), 0);
        assert!(validate_delimiters(&[]).is_ok());
    }

    #[test]
    fn test_bucket_is_monotonic() {
        let delimiters = [72.0, 144.0, 300.5, 540.0];
        let mut previous = 0;
        for step in 0..700 {
            let bucket = bucket_for(step as f64, &delimiters);
            assert!(bucket >= previous);
            previous = bucket;
        }
        assert_eq!(previous, delimiters.len());
    }

    #[test]
    fn test_validate_delimiters() {
        assert!(validate_delimiters(&[1.0, 2.0, 3.0]).is_ok());
        assert!(matches!(
            validate_delimiters(&[1.0, 1.0]),
            Err(Error::Configuration(_))
        ));
        assert!(validate_delimiters(&[2.0, 1.0]).is_err());
        assert!(validate_delimiters(&[1.0, f64::NAN]).is_err());
        assert!(validate_delimiters(&[f64::INFINITY]).is_err());
    }
}

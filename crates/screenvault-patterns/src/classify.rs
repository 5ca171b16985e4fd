//! Adoption-rate classification

use screenvault_types::Classification;

/// Lowest adoption rate classified as dominant
pub const DOMINANT_THRESHOLD: f64 = 0.70;
/// Lowest adoption rate classified as common
pub const COMMON_THRESHOLD: f64 = 0.30;

/// Bucket an adoption rate.
///
/// Only the dominant/common boundaries are derived from `rate`. Below
/// [`COMMON_THRESHOLD`] the emerging/outlier split comes from `labeled`,
/// the classification already present in the source data. A label of
/// dominant or common on a low rate contradicts the rate and falls back to
/// emerging. NaN takes the same path as a low rate.
pub fn classify(rate: f64, labeled: Classification) -> Classification {
    if rate >= DOMINANT_THRESHOLD {
        Classification::Dominant
    } else if rate >= COMMON_THRESHOLD {
        Classification::Common
    } else {
        match labeled {
            Classification::Emerging | Classification::Outlier => labeled,
            Classification::Dominant | Classification::Common => Classification::Emerging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_boundary() {
        assert_eq!(classify(0.70, Classification::Outlier), Classification::Dominant);
        assert_eq!(classify(1.0, Classification::Emerging), Classification::Dominant);
        assert_eq!(classify(0.6999, Classification::Dominant), Classification::Common);
    }

    #[test]
    fn test_common_boundary() {
        assert_eq!(classify(0.30, Classification::Outlier), Classification::Common);
        assert_eq!(classify(0.2999, Classification::Outlier), Classification::Outlier);
    }

    #[test]
    fn test_low_rates_trust_label() {
        assert_eq!(classify(0.1, Classification::Emerging), Classification::Emerging);
        assert_eq!(classify(0.1, Classification::Outlier), Classification::Outlier);
        assert_eq!(classify(0.1, Classification::Dominant), Classification::Emerging);
        assert_eq!(classify(f64::NAN, Classification::Outlier), Classification::Outlier);
    }

    #[test]
    fn test_buckets_follow_rate_on_a_grid() {
        for i in 0..=100 {
            let rate = f64::from(i) / 100.0;
            let class = classify(rate, Classification::Outlier);
            assert_eq!(class == Classification::Dominant, rate >= 0.70, "rate {rate}");
            assert_eq!(
                class == Classification::Common,
                (0.30..0.70).contains(&rate),
                "rate {rate}"
            );
        }
    }
}

//! Property-based tests for engine invariants

use feature_engine::physics::SPEED_OF_LIGHT;
use feature_engine::{
    atomic_number, distance_km, frequency, utrd, CompositeWeights, MetricResult, TextEngine, Utrd,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_text_scores_bounded(text in ".{0,200}") {
        for engine in TextEngine::ALL {
            let v = engine.score(&text).into_value().expect("text engines always produce a value");
            prop_assert!((0.0..=1.0).contains(&v), "{} = {}", engine, v);
        }
    }

    #[test]
    fn test_text_scores_idempotent(text in "[A-Za-z0-9 .,!?']{0,120}") {
        for engine in TextEngine::ALL {
            prop_assert_eq!(engine.score(&text), engine.score(&text));
        }
    }

    #[test]
    fn test_numeric_engines_idempotent(
        w in -1e6f64..1e6,
        lat in -100.0f64..100.0,
        lon in -200.0f64..200.0,
    ) {
        prop_assert_eq!(frequency(w), frequency(w));
        prop_assert_eq!(distance_km(lat, lon, 0.0, 0.0), distance_km(lat, lon, 0.0, 0.0));
    }

    #[test]
    fn test_atomic_number_idempotent(symbol in "[A-Za-z]{0,3}") {
        prop_assert_eq!(atomic_number(&symbol), atomic_number(&symbol));
    }

    #[test]
    fn test_utrd_metrics_idempotent(text in "[A-Za-z0-9 .,!?']{0,120}") {
        let first = utrd(&text).map(|report| *report.metrics());
        let second = utrd(&text).map(|report| *report.metrics());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_composite_follows_weights(text in "[A-Za-z0-9 .!?]{1,120}[A-Za-z]") {
        let metrics = Utrd::default().metrics(&text).into_value().expect("non-blank text");
        let expected = CompositeWeights::DEFAULT.combine(
            metrics.fallacy_score(),
            metrics.entropy_score(),
            metrics.contradiction_score(),
            metrics.signal_sharpness(),
        );
        prop_assert_eq!(metrics.composite_score(), expected);
        prop_assert!((0.0..=1.0).contains(&expected));
    }

    #[test]
    fn test_frequency_positive_domain(w in 1e-6f64..1e12) {
        let f = frequency(w).into_value().expect("positive wavelength");
        let expected = SPEED_OF_LIGHT / (w / 1000.0);
        prop_assert!(((f - expected) / expected).abs() < 1e-12);
    }

    #[test]
    fn test_frequency_non_positive_domain(w in -1e12f64..=0.0) {
        prop_assert!(frequency(w).domain_error().is_some());
    }

    #[test]
    fn test_distance_symmetric_and_bounded(
        lat1 in -90.0f64..=90.0,
        lon1 in -180.0f64..=180.0,
        lat2 in -90.0f64..=90.0,
        lon2 in -180.0f64..=180.0,
    ) {
        let ab = distance_km(lat1, lon1, lat2, lon2).into_value().expect("valid points");
        let ba = distance_km(lat2, lon2, lat1, lon1).into_value().expect("valid points");
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!(ab <= std::f64::consts::PI * 6371.0 + 1e-6);
    }

    #[test]
    fn test_distance_same_point_zero(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
        prop_assert_eq!(distance_km(lat, lon, lat, lon), MetricResult::Value(0.0));
    }

    #[test]
    fn test_atomic_number_case_insensitive(z in 1u32..=118) {
        let symbol = feature_engine::tables::symbol_of(z).unwrap();
        prop_assert_eq!(atomic_number(&symbol.to_uppercase()), MetricResult::Value(z));
        prop_assert_eq!(atomic_number(&symbol.to_lowercase()), MetricResult::Value(z));
    }
}

//! Engine contract integration tests

use feature_engine::physics::SPEED_OF_LIGHT;
use feature_engine::{
    atomic_number, contradiction_score, distance_km, element_name, entropy_score, evaluate,
    fallacy_score, frequency, sharpness, utrd, CompositeWeights, DomainErrorKind, MetricRequest,
    MetricResult, MetricValue, TextEngine, Utrd,
};
use rstest::rstest;

// === Physics ===

#[rstest]
#[case(1.0)]
#[case(21.1)]
#[case(500.0)]
#[case(1e-3)]
#[case(1e9)]
fn test_frequency_matches_formula(#[case] wavelength_mm: f64) {
    let expected = SPEED_OF_LIGHT / (wavelength_mm / 1000.0);
    let got = frequency(wavelength_mm).into_value().unwrap();
    assert!(
        ((got - expected) / expected).abs() < 1e-12,
        "wavelength {wavelength_mm}: got {got}, expected {expected}"
    );
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(-1e-9)]
fn test_frequency_rejects_non_positive(#[case] wavelength_mm: f64) {
    assert_eq!(
        frequency(wavelength_mm),
        MetricResult::DomainError(DomainErrorKind::NonPositiveInput)
    );
}

// === Chemistry ===

#[rstest]
#[case("Au", 79)]
#[case("AU", 79)]
#[case("au", 79)]
#[case("h", 1)]
#[case("Og", 118)]
#[case(" Fe ", 26)]
fn test_atomic_number(#[case] symbol: &str, #[case] expected: u32) {
    assert_eq!(atomic_number(symbol), MetricResult::Value(expected));
}

#[rstest]
#[case("Xx")]
#[case("")]
#[case("   ")]
#[case("Auu")]
fn test_unknown_symbol(#[case] symbol: &str) {
    assert_eq!(
        atomic_number(symbol),
        MetricResult::DomainError(DomainErrorKind::UnknownSymbol)
    );
    assert_eq!(
        element_name(symbol),
        MetricResult::DomainError(DomainErrorKind::UnknownSymbol)
    );
}

// === Geometry ===

#[test]
fn test_distance_lake_charles_sulphur() {
    let d = distance_km(30.2266, -93.2174, 30.2366, -93.3774)
        .into_value()
        .unwrap();
    assert!(d > 10.0 && d < 20.0, "got {d}");
}

#[rstest]
#[case(0.0, 0.0)]
#[case(90.0, 180.0)]
#[case(-90.0, -180.0)]
#[case(30.2266, -93.2174)]
fn test_distance_same_point(#[case] lat: f64, #[case] lon: f64) {
    let d = distance_km(lat, lon, lat, lon).into_value().unwrap();
    assert!(d.abs() < 1e-9, "got {d}");
}

#[rstest]
#[case(91.0, 0.0, 0.0, 0.0)]
#[case(0.0, 0.0, -90.0001, 0.0)]
#[case(0.0, 181.0, 0.0, 0.0)]
#[case(0.0, 0.0, 0.0, -180.5)]
fn test_distance_out_of_range(
    #[case] lat1: f64,
    #[case] lon1: f64,
    #[case] lat2: f64,
    #[case] lon2: f64,
) {
    assert_eq!(
        distance_km(lat1, lon1, lat2, lon2),
        MetricResult::DomainError(DomainErrorKind::OutOfRange)
    );
}

// === Text engines ===

#[rstest]
#[case("")]
#[case(" ")]
#[case("\t\n  ")]
fn test_text_engines_zero_on_blank(#[case] text: &str) {
    assert_eq!(fallacy_score(text), MetricResult::Value(0.0));
    assert_eq!(entropy_score(text), MetricResult::Value(0.0));
    assert_eq!(contradiction_score(text), MetricResult::Value(0.0));
    assert_eq!(sharpness(text), MetricResult::Value(0.0));
}

#[test]
fn test_entropy_low_and_high_diversity() {
    assert!(entropy_score("aaaaaa").into_value().unwrap() < 0.3);
    assert!(
        entropy_score("The quick brown fox jumps over the lazy dog")
            .into_value()
            .unwrap()
            > 0.5
    );
}

#[test]
fn test_sharpness_examples() {
    assert!(
        sharpness("The temperature was 72.5 degrees at 14:23 on January 16th.")
            .into_value()
            .unwrap()
            > 0.3
    );
    assert!(
        sharpness("Maybe it could possibly work perhaps.")
            .into_value()
            .unwrap()
            < 0.5
    );
}

#[rstest]
#[case("Everyone knows this.", 0.25)]
#[case("Obviously everyone always agrees.", 0.75)]
#[case("It must be broken because it never works, clearly.", 0.75)]
#[case("A plain sentence.", 0.0)]
fn test_fallacy_examples(#[case] text: &str, #[case] expected: f64) {
    assert_eq!(fallacy_score(text), MetricResult::Value(expected));
}

#[test]
fn test_scores_have_three_decimals() {
    let text = "The launch happened on March 3rd. Perhaps it was late.";
    for engine in TextEngine::ALL {
        let v = engine.score(text).into_value().unwrap();
        assert_eq!(v, (v * 1000.0).round() / 1000.0, "{engine} = {v}");
    }
}

// === Composite ===

#[test]
fn test_utrd_empty_is_domain_error() {
    assert_eq!(
        utrd("").domain_error(),
        Some(DomainErrorKind::EmptyInput)
    );
    assert_eq!(
        utrd("  \n ").domain_error(),
        Some(DomainErrorKind::EmptyInput)
    );
}

#[test]
fn test_utrd_composite_matches_formula() {
    let text = "Obviously the server never fails. The server fails every night at 02:00. \
                Maybe it could be the disk.";
    let report = utrd(text).into_value().unwrap();

    let f = fallacy_score(text).into_value().unwrap();
    let e = entropy_score(text).into_value().unwrap();
    let c = contradiction_score(text).into_value().unwrap();
    let s = sharpness(text).into_value().unwrap();

    assert_eq!(report.metrics().fallacy_score(), f);
    assert_eq!(report.metrics().entropy_score(), e);
    assert_eq!(report.metrics().contradiction_score(), c);
    assert_eq!(report.metrics().signal_sharpness(), s);
    assert_eq!(
        report.composite_score(),
        CompositeWeights::DEFAULT.combine(f, e, c, s)
    );
    assert!((0.0..=1.0).contains(&report.composite_score()));
}

#[test]
fn test_utrd_echo_truncated() {
    let text = "a".repeat(80);
    let report = utrd(&text).into_value().unwrap();
    assert_eq!(report.input(), format!("{}...", "a".repeat(50)));

    let report = utrd("short").into_value().unwrap();
    assert_eq!(report.input(), "short");
}

#[test]
fn test_utrd_wire_schema() {
    let report = utrd("Clearly, the answer is 42.").into_value().unwrap();
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    let top: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(top.len(), 3);
    for key in ["input", "metrics", "timestamp"] {
        assert!(top.contains(&key), "missing {key}");
    }

    let metrics = value["metrics"].as_object().unwrap();
    for key in [
        "fallacy_score",
        "entropy_score",
        "contradiction_score",
        "signal_sharpness",
        "composite_score",
    ] {
        let v = metrics[key].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&v), "{key} = {v}");
    }

    let timestamp = value["timestamp"].as_str().unwrap();
    assert!(timestamp.ends_with('Z'), "not UTC: {timestamp}");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[test]
fn test_utrd_idempotent_metrics() {
    let text = "Nobody expected 3 failures. Nobody expected failures to stop.";
    let utrd = Utrd::default();
    let first = utrd.metrics(text);
    let second = utrd.metrics(text);
    assert_eq!(first, second);
}

// === Dispatch ===

#[test]
fn test_evaluate_utrd_request() {
    let result = evaluate(&MetricRequest::Utrd {
        text: "Clearly true.".into(),
    });
    match result {
        MetricResult::Value(MetricValue::Report(report)) => {
            assert_eq!(report.input(), "Clearly true.");
        }
        other => panic!("expected report, got {other:?}"),
    }
}

#[test]
fn test_error_markers_never_look_numeric() {
    let rendered = [
        evaluate(&MetricRequest::Frequency { wavelength_mm: -1.0 }).to_string(),
        evaluate(&MetricRequest::AtomicNumber {
            symbol: "Xx".into(),
        })
        .to_string(),
        evaluate(&MetricRequest::Utrd { text: "".into() }).to_string(),
    ];
    for marker in rendered {
        assert!(marker.starts_with("#DOMAIN!("), "{marker}");
        assert!(marker.parse::<f64>().is_err());
    }
}

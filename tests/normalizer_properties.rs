//! Integration tests for price normalization across market formats.

use covert_finder::{normalize, normalize_str, rank, ItemResult, Listings, MarketQuote};
use covert_finder::{PriceNormalizer, RawPrice, SeparatorRule, UNPARSEABLE};

/// Prices as the markets actually return them.
const MARKET_SAMPLES: &[(&str, f64)] = &[
    ("$4.15", 4.15),
    ("$0.03", 0.03),
    ("$1,577.29", 1577.29),
    ("1 577,29€", 1577.29),
    ("1\u{a0}577,29€", 1577.29),
    ("27,--€", 27.0),
    ("27.--€", 27.0),
    ("10,50€", 10.5),
    ("£12.40", 12.4),
    ("1.234,56", 1234.56),
    ("1,234.56", 1234.56),
    ("CDN$ 5.99", 5.99),
];

#[test]
fn test_market_samples() {
    for (text, expected) in MARKET_SAMPLES {
        assert_eq!(normalize_str(text), *expected, "normalizing {:?}", text);
    }
}

#[test]
fn test_sentinel_inputs() {
    assert_eq!(normalize(None), UNPARSEABLE);
    assert_eq!(normalize_str(""), UNPARSEABLE);
    assert_eq!(normalize_str("N/A"), UNPARSEABLE);
    assert!(UNPARSEABLE.is_infinite() && UNPARSEABLE > 0.0);
}

#[test]
fn test_numeric_input_passes_through() {
    assert_eq!(normalize(Some(&RawPrice::Number(42.0))), 42.0);
    assert_eq!(normalize(Some(&RawPrice::Number(24.5))), 24.5);
}

#[test]
fn test_reparsing_a_value_is_stable() {
    for rule in [SeparatorRule::Strict, SeparatorRule::CommaDecimal] {
        let normalizer = PriceNormalizer::new(rule);
        for (text, _) in MARKET_SAMPLES {
            let value = normalizer.normalize_text(text);
            assert!(value.is_finite());
            assert_eq!(normalizer.normalize_text(&value.to_string()), value, "{:?} under {}", text, rule);
        }
    }
}

#[test]
fn test_results_are_finite_non_negative_or_sentinel() {
    let inputs = [
        "", "-", "--", ",", ".", "$", "€-", "-5", "5-", "1..2", ",,5", "1 2 3", "abc123def", "١٢٣",
        "9999999999999999999999999", "0", "0,00€",
    ];

    for input in inputs {
        let value = normalize_str(input);
        assert!(
            value == UNPARSEABLE || (value.is_finite() && value >= 0.0),
            "{:?} normalized to {}",
            input,
            value
        );
    }
}

#[test]
fn test_sorting_by_normalized_value() {
    let normalizer = PriceNormalizer::default();
    let prices = ["N/A", "$12.00", "", "1 577,29€", "0,99€", "garbage", "$4.15"];

    let items: Vec<ItemResult> = prices
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let quote = MarketQuote::new(Some((*p).into()), Listings::Count(1));
            ItemResult::new(format!("item {}", i), quote, &normalizer)
        })
        .collect();

    let ranked: Vec<String> = rank(items).into_iter().map(|i| i.quote.to_string()).collect();
    assert_eq!(ranked, vec!["0,99€", "$4.15", "$12.00", "1 577,29€", "N/A", "", "garbage"]);
}

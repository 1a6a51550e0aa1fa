use ncss_convert::number::{to_cardinal, to_number, to_ordinal};
use proptest::prelude::*;

proptest! {
    #[test]
    fn words_round_trip_to_digits(n in -1_000_000i64..1_000_000) {
        let words = to_cardinal(&n.to_string()).unwrap();
        prop_assert_eq!(to_number(&words).unwrap(), n.to_string());
    }

    #[test]
    fn every_integer_has_a_rank(n in 0u32..1_000_000) {
        let rank = to_ordinal(&n.to_string()).unwrap();
        prop_assert!(!rank.is_empty());
        prop_assert_ne!(rank, to_cardinal(&n.to_string()).unwrap());
    }

    #[test]
    fn words_with_trailing_text_are_rejected(n in 1u32..1_000, noun in "(apples|meters|days)") {
        let words = to_cardinal(&n.to_string()).unwrap();
        let input = format!("{words} {noun}");
        prop_assert!(to_number(&input).is_err());
    }

    #[test]
    fn non_numeric_values_are_rejected(value in "[a-hj-mo-z]{1,12}") {
        prop_assert!(to_cardinal(&value).is_err());
    }
}

#[test]
fn compound_numbers_round_trip() {
    for n in ["0", "21", "99", "101", "1234", "1234567", "-7", "-1000001"] {
        let words = to_cardinal(n).unwrap();
        assert_eq!(to_number(&words).unwrap(), n, "{words}");
    }
}

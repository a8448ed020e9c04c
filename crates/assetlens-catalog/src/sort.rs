//! Natural, case-insensitive ordering for sibling names.
//!
//! Digit runs compare by numeric value (`"2"` before `"10"`), everything
//! else compares by lowercased character. Accented letters first compare as
//! their base letter (`"Éclair"` before `"Zebra"`), then accents break ties.
//! Names that still compare equal fall back to a plain ordinal comparison so
//! the order is total.

use crate::model::AssetNode;
use icu_normalizer::DecomposingNormalizerBorrowed;
use icu_properties::props::GeneralCategory;
use icu_properties::CodePointMapData;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two names in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_cmp_folded(&base_letters(a), &base_letters(b))
        .then_with(|| natural_cmp_folded(a, b))
        .then_with(|| a.cmp(b))
}

/// Sort nodes by name in natural order.
pub fn sort_nodes(nodes: &mut [AssetNode]) {
    nodes.sort_by(|a, b| natural_cmp(a.name(), b.name()));
}

/// `name` with diacritics removed: canonical decomposition, then every
/// nonspacing mark dropped.
fn base_letters(name: &str) -> Cow<'_, str> {
    if name.is_ascii() {
        return Cow::Borrowed(name);
    }
    let categories = CodePointMapData::<GeneralCategory>::new();
    Cow::Owned(
        DecomposingNormalizerBorrowed::new_nfd()
            .normalize_iter(name.chars())
            .filter(|&c| categories.get(c) != GeneralCategory::NonspacingMark)
            .collect(),
    )
}

fn natural_cmp_folded(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let ord = compare_numbers(&take_digits(&mut left), &take_digits(&mut right));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(l), Some(r)) => {
                let ord = l.to_lowercase().cmp(r.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    digits
}

/// Compare digit runs of any length without overflowing.
fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        // "007" after "7"
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        names.sort_by(|a, b| natural_cmp(a, b));
        names
    }

    #[test]
    fn test_numeric_and_case_insensitive() {
        assert_eq!(sorted(&["B", "a", "10", "2"]), vec!["2", "10", "a", "B"]);
    }

    #[test]
    fn test_embedded_numbers() {
        assert_eq!(
            sorted(&["icon10", "Icon2", "icon1", "icon"]),
            vec!["icon", "icon1", "Icon2", "icon10"]
        );
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(sorted(&["7", "007", "08"]), vec!["7", "007", "08"]);
    }

    #[test]
    fn test_case_tie_is_deterministic() {
        assert_eq!(sorted(&["logo", "Logo"]), vec!["Logo", "logo"]);
        assert_eq!(sorted(&["Logo", "logo"]), vec!["Logo", "logo"]);
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(
            sorted(&["Zebra", "Éclair", "eclair", "apple", "Ångström"]),
            vec!["Ångström", "apple", "eclair", "Éclair", "Zebra"]
        );
        assert_eq!(base_letters("Crème brûlée"), "Creme brulee");
        assert_eq!(natural_cmp("café2", "cafe10"), Ordering::Less);
    }

    #[test]
    fn test_huge_numbers_do_not_overflow() {
        let big = "99999999999999999999999999";
        assert_eq!(natural_cmp("1", big), Ordering::Less);
    }

    proptest! {
        #[test]
        fn test_antisymmetric(a in "[a-zA-Z0-9 ._-]{0,12}", b in "[a-zA-Z0-9 ._-]{0,12}") {
            prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
        }

        #[test]
        fn test_equal_only_when_identical(a in "[a-zA-Z0-9]{0,8}", b in "[a-zA-Z0-9]{0,8}") {
            prop_assert_eq!(natural_cmp(&a, &b) == Ordering::Equal, a == b);
        }

        #[test]
        fn test_order_independent_of_input_order(
            mut names in prop::collection::vec("[a-zA-Z0-9]{1,6}", 0..12)
        ) {
            let mut forward = names.clone();
            forward.sort_by(|a, b| natural_cmp(a, b));
            names.reverse();
            names.sort_by(|a, b| natural_cmp(a, b));
            prop_assert_eq!(forward, names);
        }
    }
}

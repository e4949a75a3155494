//! Spreadsheet-style column labels (A, B, ..., Z, AA, AB, ...).

/// Convert a 0-indexed column to its label.
///
/// This is bijective base-26: after each digit the remaining quotient is
/// decremented, so 25 is "Z" and 26 is "AA" rather than "BA".
pub fn column_label(index: usize) -> String {
    let mut label = String::new();
    let mut remaining = Some(index);

    while let Some(n) = remaining {
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        remaining = (n / 26).checked_sub(1);
    }

    label
}

/// Convert a column label back to its 0-indexed column. Case-insensitive.
pub fn parse_column_label(label: &str) -> Option<usize> {
    if label.is_empty() {
        return None;
    }

    let mut col: usize = 0;
    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as usize) - ('A' as usize) + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }

    Some(col - 1)
}

/// A1-style name of a cell, e.g. row 4, column 2 -> "C5"
pub fn cell_name(row: usize, col: usize) -> String {
    format!("{}{}", column_label(col), row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_letters() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(1), "B");
        assert_eq!(column_label(25), "Z");
    }

    #[test]
    fn test_rollover_points() {
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(51), "AZ");
        assert_eq!(column_label(52), "BA");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
        assert_eq!(column_label(16_383), "XFD");
    }

    #[test]
    fn test_parse_column_label() {
        assert_eq!(parse_column_label("A"), Some(0));
        assert_eq!(parse_column_label("z"), Some(25));
        assert_eq!(parse_column_label("AA"), Some(26));
        assert_eq!(parse_column_label("ba"), Some(52));
        assert_eq!(parse_column_label("AAA"), Some(702));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(parse_column_label(""), None);
        assert_eq!(parse_column_label("A1"), None);
        assert_eq!(parse_column_label("-"), None);
    }

    #[test]
    fn test_cell_name() {
        assert_eq!(cell_name(0, 0), "A1");
        assert_eq!(cell_name(4, 2), "C5");
        assert_eq!(cell_name(199, 26), "AA200");
    }

    #[test]
    fn test_largest_index_is_total() {
        let label = column_label(usize::MAX);
        assert!(!label.is_empty());
        assert!(label.chars().all(|c| c.is_ascii_uppercase()));
    }

    proptest! {
        #[test]
        fn prop_label_round_trips(index in 0usize..10_000_000) {
            prop_assert_eq!(parse_column_label(&column_label(index)), Some(index));
        }

        #[test]
        fn prop_length_is_non_decreasing(index in 0usize..10_000_000) {
            prop_assert!(column_label(index).len() <= column_label(index + 1).len());
        }

        #[test]
        fn prop_neighbours_differ(index in 0usize..10_000_000) {
            prop_assert_ne!(column_label(index), column_label(index + 1));
        }
    }
}

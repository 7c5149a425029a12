use chrono::NaiveDate;
use erfgoed_common::Relation;

/// Whether a relation is in force on `at`: started on or before it and not yet ended.
///
/// Only designation relations are guaranteed a validity window (records
/// without one are rejected on conversion); a relation without a window is
/// never valid.
pub fn is_valid(relation: &Relation, at: NaiveDate) -> bool {
    relation.validity.is_some_and(|v| v.contains(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use erfgoed_common::{Validity, DESIGNATION_KIND};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn relation(start: NaiveDate, end: Option<NaiveDate>) -> Relation {
        Relation {
            related_kind: DESIGNATION_KIND,
            relation_type: None,
            uri: "https://id.erfgoed.net/aanduidingsobjecten/1".into(),
            validity: Some(Validity { start, end }),
            legal_protection: true,
            formal_listing: false,
            designation_type: None,
        }
    }

    #[test]
    fn open_ended_relation_is_valid_from_its_start() {
        let r = relation(date(1990, 5, 1), None);
        assert!(!is_valid(&r, date(1990, 4, 30)));
        assert!(is_valid(&r, date(1990, 5, 1)));
        assert!(is_valid(&r, date(2026, 10, 19)));
    }

    #[test]
    fn bounded_relation_is_valid_up_to_but_excluding_its_end() {
        let r = relation(date(1990, 5, 1), Some(date(2000, 1, 1)));
        for (at, expected) in [
            (date(1990, 4, 30), false),
            (date(1990, 5, 1), true),
            (date(1999, 12, 31), true),
            (date(2000, 1, 1), false),
            (date(2026, 1, 1), false),
        ] {
            assert_eq!(is_valid(&r, at), expected, "at {at}");
        }
    }

    #[test]
    fn end_before_start_is_never_valid() {
        let r = relation(date(2000, 1, 1), Some(date(1990, 1, 1)));
        assert!(!is_valid(&r, date(1995, 1, 1)));
        assert!(!is_valid(&r, date(2005, 1, 1)));
    }

    #[test]
    fn relation_without_window_is_not_valid() {
        let mut r = relation(date(1990, 1, 1), None);
        r.validity = None;
        assert!(!is_valid(&r, date(2026, 1, 1)));
    }
}

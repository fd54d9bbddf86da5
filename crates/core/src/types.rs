/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Parse a loosely-typed id value (query string or form field).
///
/// Missing, non-numeric and zero values mean "no id". Any other integer,
/// negative included, is an id and is looked up like any other.
pub fn parse_id(raw: Option<&str>) -> Option<DbId> {
    raw.and_then(|s| s.trim().parse::<DbId>().ok())
        .filter(|id| *id != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonzero_integer_is_an_id() {
        assert_eq!(parse_id(Some("42")), Some(42));
        assert_eq!(parse_id(Some(" 7 ")), Some(7));
        assert_eq!(parse_id(Some("-3")), Some(-3));
    }

    #[test]
    fn missing_or_garbage_is_no_id() {
        assert_eq!(parse_id(None), None);
        assert_eq!(parse_id(Some("")), None);
        assert_eq!(parse_id(Some("abc")), None);
        assert_eq!(parse_id(Some("0")), None);
    }
}

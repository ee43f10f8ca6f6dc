use crate::domain::model::Record;
use crate::utils::error::{ImportError, Result};

/// Parses one raw input line as a single CSV record.
///
/// A line that yields no record (or cannot be decoded) fails with
/// `MalformedRecord` for that line only; callers decide whether to skip or
/// propagate.
pub fn parse_line(line: &str) -> Result<Record> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut raw = csv::StringRecord::new();
    match reader.read_record(&mut raw) {
        Ok(true) => Ok(Record::new(raw.iter().map(str::to_owned).collect())),
        Ok(false) => Err(ImportError::MalformedRecord {
            reason: "empty line".to_string(),
        }),
        Err(e) => Err(ImportError::MalformedRecord {
            reason: e.to_string(),
        }),
    }
}

/// Finds the index of the email column in the first record.
///
/// A field whose lowercase form equals "email" wins regardless of position;
/// only when no such header exists does the first field containing '@' count.
pub fn find_email_column(record: &Record) -> Option<usize> {
    if let Some(index) = record
        .fields
        .iter()
        .position(|field| field.eq_ignore_ascii_case("email"))
    {
        return Some(index);
    }
    record.fields.iter().position(|field| field.contains('@'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_splits_on_commas() {
        let record = parse_line("John,Doe,jdoe@example.com").unwrap();
        assert_eq!(record.fields, vec!["John", "Doe", "jdoe@example.com"]);
    }

    #[test]
    fn test_parse_line_honors_quoting() {
        let record = parse_line(r#""Doe, John","he said ""hi""",jdoe@example.com"#).unwrap();
        assert_eq!(
            record.fields,
            vec!["Doe, John", r#"he said "hi""#, "jdoe@example.com"]
        );
    }

    #[test]
    fn test_parse_line_rejects_empty_line() {
        let err = parse_line("").unwrap_err();
        assert!(matches!(err, ImportError::MalformedRecord { .. }));
    }

    #[test]
    fn test_find_email_column_prefers_header_name_anywhere() {
        let record: Record = ["first_name", "last_name", "email", "gender"]
            .into_iter()
            .collect();
        assert_eq!(find_email_column(&record), Some(2));

        let record: Record = ["Email", "first_name"].into_iter().collect();
        assert_eq!(find_email_column(&record), Some(0));
    }

    #[test]
    fn test_find_email_column_header_wins_over_earlier_at_sign() {
        // A data-looking field to the left of a literal header must not win.
        let record: Record = ["someone@example.com", "email"].into_iter().collect();
        assert_eq!(find_email_column(&record), Some(1));
    }

    #[test]
    fn test_find_email_column_falls_back_to_at_sign() {
        let record: Record = ["John", "Doe", "jdoe@example.com", "Male"]
            .into_iter()
            .collect();
        assert_eq!(find_email_column(&record), Some(2));
    }

    #[test]
    fn test_find_email_column_none_when_no_candidate() {
        let record: Record = ["first_name", "last_name", "gender"].into_iter().collect();
        assert_eq!(find_email_column(&record), None);
    }
}

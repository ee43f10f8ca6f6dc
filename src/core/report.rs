use crate::domain::model::{DomainCount, DomainTable, Report, SortPolicy};
use crate::utils::error::{ImportError, Result};

/// Turns a domain table into the final report under the given policy.
///
/// Both policies are fully deterministic: domains are unique, and the
/// count-descending order breaks ties ascending by domain name.
pub fn sort_domains(table: DomainTable, policy: SortPolicy) -> Report {
    let mut entries: Vec<DomainCount> = table
        .into_iter()
        .map(|(domain, count)| DomainCount { domain, count })
        .collect();

    match policy {
        SortPolicy::DomainAscending => {
            entries.sort_by(|a, b| a.domain.cmp(&b.domain));
        }
        SortPolicy::CountDescending => {
            entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.domain.cmp(&b.domain)));
        }
    }

    entries
}

/// Serializes a report as `domain,count` lines, one per entry, with standard
/// CSV quoting and a trailing newline on every line.
pub fn write_report_csv(report: &Report) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for entry in report {
        writer.write_record([entry.domain.as_str(), entry.count.to_string().as_str()])?;
    }
    writer
        .into_inner()
        .map_err(|e| ImportError::ProcessingError {
            message: format!("failed to flush report writer: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table(entries: &[(&str, u64)]) -> DomainTable {
        entries
            .iter()
            .map(|(domain, count)| (domain.to_string(), *count))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_sort_domains_ascending_by_domain() {
        let report = sort_domains(
            table(&[("y.com", 1), ("x.com", 2)]),
            SortPolicy::DomainAscending,
        );
        let domains: Vec<&str> = report.iter().map(|e| e.domain.as_str()).collect();
        assert_eq!(domains, vec!["x.com", "y.com"]);
    }

    #[test]
    fn test_sort_domains_descending_by_count_with_domain_tiebreak() {
        let report = sort_domains(
            table(&[("b.com", 2), ("a.com", 2), ("c.com", 7)]),
            SortPolicy::CountDescending,
        );
        let domains: Vec<&str> = report.iter().map(|e| e.domain.as_str()).collect();
        assert_eq!(domains, vec!["c.com", "a.com", "b.com"]);
    }

    #[test]
    fn test_write_report_csv_exact_bytes() {
        let report = sort_domains(
            table(&[("x.com", 2), ("y.com", 1)]),
            SortPolicy::DomainAscending,
        );
        let bytes = write_report_csv(&report).unwrap();
        assert_eq!(bytes, b"x.com,2\ny.com,1\n");
    }

    #[test]
    fn test_write_report_csv_quotes_delimiter_in_domain() {
        let report = vec![DomainCount {
            domain: "weird,domain".to_string(),
            count: 1,
        }];
        let bytes = write_report_csv(&report).unwrap();
        assert_eq!(bytes, b"\"weird,domain\",1\n");
    }

    #[test]
    fn test_write_report_csv_empty_report() {
        let bytes = write_report_csv(&Vec::new()).unwrap();
        assert!(bytes.is_empty());
    }
}

use crate::domain::model::{DomainTable, Record};
use crate::utils::error::{ImportError, Result};
use tokio::task::JoinSet;

/// Extracts the domain part of an email field.
///
/// Only a two-part shape counts: exactly one '@' with a non-empty domain
/// behind it. The domain is returned verbatim, without case normalization.
pub fn extract_domain(email: &str) -> Option<&str> {
    let mut parts = email.split('@');
    let _local = parts.next()?;
    let domain = parts.next()?;
    if parts.next().is_some() || domain.is_empty() {
        return None;
    }
    Some(domain)
}

/// Counts one worker's chunk into a local table. Records that are too short
/// for the email column or whose email field has the wrong shape are skipped.
fn count_chunk(records: Vec<Record>, email_column: usize) -> DomainTable {
    let mut local = DomainTable::new();
    for record in &records {
        let Some(email) = record.fields.get(email_column) else {
            continue;
        };
        if let Some(domain) = extract_domain(email) {
            *local.entry(domain.to_owned()).or_insert(0) += 1;
        }
    }
    local
}

/// Tallies customers per email domain across `workers` parallel chunks.
///
/// Each worker builds an independent local table; after the join barrier the
/// partial tables are merged by summing matching keys, so the result is
/// identical to a sequential pass regardless of worker count or completion
/// order.
pub async fn count_domains(
    records: Vec<Record>,
    email_column: usize,
    workers: usize,
) -> Result<DomainTable> {
    if records.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let chunk_size = records.len().div_ceil(workers.max(1)).max(1);
    let mut join_set = JoinSet::new();
    let mut remaining = records;
    while !remaining.is_empty() {
        let chunk: Vec<Record> = remaining
            .drain(..chunk_size.min(remaining.len()))
            .collect();
        join_set.spawn_blocking(move || count_chunk(chunk, email_column));
    }

    // 合併各工作者的局部計數
    let mut table = DomainTable::new();
    while let Some(joined) = join_set.join_next().await {
        let partial = joined.map_err(|e| ImportError::ProcessingError {
            message: format!("aggregation worker failed: {}", e),
        })?;
        for (domain, count) in partial {
            *table.entry(domain).or_insert(0) += count;
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(email: &str) -> Record {
        ["First", "Last", email, "IP"].into_iter().collect()
    }

    #[test]
    fn test_extract_domain_two_part_email() {
        assert_eq!(extract_domain("jdoe@example.com"), Some("example.com"));
    }

    #[test]
    fn test_extract_domain_rejects_wrong_shapes() {
        assert_eq!(extract_domain("not-an-email"), None);
        assert_eq!(extract_domain("a@b@c.com"), None);
        assert_eq!(extract_domain("trailing@"), None);
        assert_eq!(extract_domain(""), None);
    }

    #[test]
    fn test_extract_domain_keeps_case() {
        assert_eq!(extract_domain("a@Example.com"), Some("Example.com"));
    }

    #[tokio::test]
    async fn test_count_domains_tallies_per_domain() {
        let records = vec![
            customer("a@x.com"),
            customer("b@x.com"),
            customer("c@y.com"),
        ];
        let table = count_domains(records, 2, 2).await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["x.com"], 2);
        assert_eq!(table["y.com"], 1);
    }

    #[tokio::test]
    async fn test_count_domains_skips_malformed_and_short_records() {
        let records = vec![
            customer("a@x.com"),
            customer("not-an-email"),
            customer("double@at@x.com"),
            Record::new(vec!["only".to_string(), "two".to_string()]),
        ];
        let table = count_domains(records, 2, 2).await.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table["x.com"], 1);
    }

    #[tokio::test]
    async fn test_count_domains_case_sensitive_domains() {
        let records = vec![customer("a@Example.com"), customer("b@example.com")];
        let table = count_domains(records, 2, 2).await.unwrap();
        assert_eq!(table["Example.com"], 1);
        assert_eq!(table["example.com"], 1);
    }

    #[tokio::test]
    async fn test_count_domains_empty_input() {
        let err = count_domains(Vec::new(), 0, 4).await.unwrap_err();
        assert!(matches!(err, ImportError::EmptyInput));
    }

    #[tokio::test]
    async fn test_count_domains_invariant_to_worker_count() {
        let mut records = Vec::new();
        for i in 0..97 {
            records.push(customer(&format!("user{}@domain{}.com", i, i % 7)));
        }

        let sequential = count_domains(records.clone(), 2, 1).await.unwrap();
        for workers in [2, 3, 8, 200] {
            let parallel = count_domains(records.clone(), 2, workers).await.unwrap();
            assert_eq!(sequential, parallel, "workers = {}", workers);
        }
    }

    #[tokio::test]
    async fn test_count_sum_matches_well_formed_records() {
        let records = vec![
            customer("a@x.com"),
            customer("bad"),
            customer("b@y.com"),
            customer("c@x.com"),
        ];
        let table = count_domains(records, 2, 3).await.unwrap();
        let total: u64 = table.values().sum();
        assert_eq!(total, 3);
    }
}

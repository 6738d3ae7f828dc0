//! Line-oriented output artifacts: the transaction dump and the rule report.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use quarry_core::errors::OutputError;
use quarry_core::types::{Rule, Transaction};

/// `label,label,...` in transaction order.
pub fn transaction_line(transaction: &Transaction) -> String {
    transaction.labels().join(",")
}

/// `lhs -> rhs (Lift: x.xxxxx, Conf: x.xxxxx, Supp: x.xxxxx)`.
pub fn rule_line(rule: &Rule) -> String {
    format!(
        "{} (Lift: {:.5}, Conf: {:.5}, Supp: {:.5})",
        rule.full_name(),
        rule.lift,
        rule.confidence,
        rule.support
    )
}

/// Write one line per transaction.
pub fn write_transaction_dump(path: &Path, transactions: &[Transaction]) -> Result<(), OutputError> {
    write_lines(path, transactions.iter().map(transaction_line))?;
    tracing::info!(path = %path.display(), transactions = transactions.len(), "wrote transaction dump");
    Ok(())
}

/// Write one line per rule, in the given (ranked) order.
pub fn write_rule_report(path: &Path, rules: &[Rule]) -> Result<(), OutputError> {
    write_lines(path, rules.iter().map(rule_line))?;
    tracing::info!(path = %path.display(), rules = rules.len(), "wrote rule report");
    Ok(())
}

fn write_lines<I>(path: &Path, lines: I) -> Result<(), OutputError>
where
    I: IntoIterator<Item = String>,
{
    let io_err = |source: std::io::Error| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut out = BufWriter::new(fs::File::create(path).map_err(io_err)?);
    for line in lines {
        out.write_all(line.as_bytes()).map_err(io_err)?;
        out.write_all(b"\n").map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_line_format() {
        let rule = Rule {
            lhs: vec!["Item/Pump".to_string(), "Observation/Leak".to_string()],
            rhs: vec!["Activity/Replace".to_string()],
            support: 0.001234567,
            confidence: 0.75,
            lift: 12.3456789,
        };
        assert_eq!(
            rule_line(&rule),
            "Item/Pump, Observation/Leak -> Activity/Replace (Lift: 12.34568, Conf: 0.75000, Supp: 0.00123)"
        );
    }

    #[test]
    fn test_transaction_line() {
        let tx = Transaction::from_labels(1, ["A", "A/1", "B"]);
        assert_eq!(transaction_line(&tx), "A,A/1,B");
        assert_eq!(transaction_line(&Transaction::empty(2)), "");
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("transactions.csv");
        let txs = vec![
            Transaction::from_labels(1, ["A", "A/1"]),
            Transaction::empty(2),
        ];
        write_transaction_dump(&path, &txs).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A,A/1\n\n");
    }
}

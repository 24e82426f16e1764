use crate::error::{LoadError, Result};
use knnreg_core::Table;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Load a table from a whitespace/tab separated numeric text file.
/// One row per line, no header. Blank lines are skipped.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(BufReader::new(file), path)
}

/// Parse rows from any buffered reader. `source` only labels errors.
pub fn parse_table<R: BufRead>(reader: R, source: &Path) -> Result<Table> {
    let mut table = Table::new();
    let mut row: Vec<f32> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| LoadError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;

        row.clear();
        for token in line.split_whitespace() {
            let value = token.parse::<f32>().map_err(|_| LoadError::Parse {
                path: source.to_path_buf(),
                line: line_no,
                token: token.to_string(),
            })?;
            row.push(value);
        }

        if row.is_empty() {
            continue;
        }

        table.append(&row).map_err(|e| LoadError::Row {
            path: source.to_path_buf(),
            line: line_no,
            source: e,
        })?;
    }

    debug!(
        path = %source.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;

    fn parse(text: &str) -> Result<Table> {
        parse_table(Cursor::new(text), Path::new("inline"))
    }

    #[test]
    fn test_parse_tabs_and_spaces() {
        let table = parse("1 2\t3\n4.5\t  5   -6e1\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row(1).unwrap(), &[4.5f32, 5.0, -60.0][..]);
    }

    #[test]
    fn test_skips_blank_lines() {
        let table = parse("\n1 2\n   \n3 4\n\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_min(0).unwrap(), 1.0);
        assert_eq!(table.column_max(1).unwrap(), 4.0);
    }

    #[test]
    fn test_bad_token_reports_line() {
        let err = parse("1 2\n3 x\n").unwrap_err();
        match err {
            LoadError::Parse { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = parse("1 2 3\n4 5\n").unwrap_err();
        match err {
            LoadError::Row { line, source, .. } => {
                assert_eq!(line, 2);
                assert_eq!(source, knnreg_core::Error::SchemaMismatch { expected: 3, actual: 2 });
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_tokens_rejected() {
        for text in ["nan 1\n1 2\n3 3\n", "1 2\n3 inf\n", "1 2\n-infinity 4\n"] {
            match parse(text).unwrap_err() {
                LoadError::Row { source, .. } => {
                    assert!(matches!(source, knnreg_core::Error::NonFiniteValue { .. }))
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        let err = parse("1 2\n3 NaN\n").unwrap_err();
        assert!(matches!(err, LoadError::Row { line: 2, .. }));
    }

    #[test]
    fn test_empty_input() {
        let table = parse("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1\t1\t10").unwrap();
        writeln!(file, "2\t2\t20").unwrap();
        file.flush().unwrap();

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_max(2).unwrap(), 20.0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_table(dir.path().join("nope.dat")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}

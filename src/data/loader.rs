use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. All variants are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        /// 1-based line of the offending row, 0 when unknown.
        line: u64,
        message: String,
    },

    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a salary dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – comma-separated, header row with the column names
/// * `.tsv`  – same layout, tab-separated
/// * `.json` – `[{ "job_title": "...", "salary_in_usd": 120000, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        other => {
            return Err(LoadError::UnsupportedFormat {
                extension: other.to_string(),
            })
        }
    };

    log::debug!("parsed {} records from {}", records.len(), path.display());
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Delimited loader
// ---------------------------------------------------------------------------

/// Header row names the columns; rows are deserialized by header name so
/// column order does not matter.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<Record>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = reader.headers().map_err(|e| csv_error(path, e))?;
    if let Some(missing) = missing_column(headers) {
        return Err(LoadError::Parse {
            path: path.to_path_buf(),
            line: 1,
            message: format!("missing required column '{missing}'"),
        });
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<Record>() {
        let record = result.map_err(|e| csv_error(path, e))?;
        records.push(record);
    }
    Ok(records)
}

/// First required column absent from the header row. An empty file has no
/// header row, so every column is missing.
fn missing_column(headers: &csv::StringRecord) -> Option<&'static str> {
    Record::REQUIRED_COLUMNS
        .into_iter()
        .find(|&column| !headers.iter().any(|h| h == column))
}

fn csv_error(path: &Path, err: csv::Error) -> LoadError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
        csv::ErrorKind::Deserialize { err, .. } => LoadError::Parse {
            path: path.to_path_buf(),
            line,
            message: err.to_string(),
        },
        other => LoadError::Parse {
            path: path.to_path_buf(),
            line,
            message: format!("{other:?}"),
        },
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<Record>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        line: e.line() as u64,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    const HEADER: &str = "work_year,job_title,job_category,salary_currency,salary,salary_in_usd,\
employee_residence,experience_level,employment_type,work_setting,company_location,company_size";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_csv_rows_in_file_order() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{HEADER}\n\
2023,Data Scientist,Data Science and Research,USD,120000,120000,United States,Senior,Full-time,Remote,United States,M\n\
2022,Data Engineer,Data Engineering,EUR,80000,86000,Germany,Mid-level,Full-time,Hybrid,Germany,L\n"
        );
        let path = write_file(&dir, "jobs.csv", &body);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].job_title, "Data Scientist");
        assert_eq!(ds.records[1].salary_in_usd, 86_000.0);
        assert_eq!(ds.records[1].salary, Some(80_000.0));
        assert_eq!(ds.options.currencies.len(), 2);
    }

    #[test]
    fn optional_columns_may_be_missing() {
        let dir = TempDir::new().unwrap();
        let body = "work_year,job_title,job_category,salary_currency,salary_in_usd,\
employee_residence,experience_level,employment_type,company_location,company_size\n\
2021,Analyst,Data Analysis,USD,60000,Canada,Entry-level,Part-time,Canada,S\n";
        let path = write_file(&dir, "ten_columns.csv", body);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records[0].salary, None);
        assert_eq!(ds.records[0].work_setting, None);
    }

    #[test]
    fn tab_separated_files_load() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{}\n2023\tA\tB\tUSD\t1\t1\tX\tSenior\tFull-time\tRemote\tX\tM\n",
            HEADER.replace(',', "\t")
        );
        let path = write_file(&dir, "jobs.tsv", &body);
        assert_eq!(load_file(&path).unwrap().len(), 1);
    }

    #[test]
    fn json_records_load() {
        let dir = TempDir::new().unwrap();
        let body = r#"[{"work_year": 2024, "job_title": "Data Scientist", "job_category": "ML",
            "salary_currency": "GBP", "salary_in_usd": 95000.5, "employee_residence": "United Kingdom",
            "experience_level": "Mid-level", "employment_type": "Full-time",
            "company_location": "United Kingdom", "company_size": "L"}]"#;
        let path = write_file(&dir, "jobs.json", body);

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.records[0].salary_in_usd, 95_000.5);
        assert_eq!(ds.options.work_year.map(|b| b.min), Some(2024));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn unparseable_number_is_parse_error_with_line() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{HEADER}\n\
2023,A,B,USD,1,1,X,Senior,Full-time,Remote,X,M\n\
2023,A,B,USD,1,lots,X,Senior,Full-time,Remote,X,M\n"
        );
        let path = write_file(&dir, "bad.csv", &body);

        match load_file(&path).unwrap_err() {
            LoadError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_column_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "short.csv", "work_year,job_title\n2023,A\n");
        assert!(matches!(load_file(&path).unwrap_err(), LoadError::Parse { .. }));
    }

    #[test]
    fn header_without_required_columns_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "products.csv", "id,name,price\n");
        match load_file(&path).unwrap_err() {
            LoadError::Parse { line, message, .. } => {
                assert_eq!(line, 1);
                assert!(message.contains("work_year"), "{message}");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn header_only_file_with_required_columns_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty_rows.csv", &format!("{HEADER}\n"));
        assert!(load_file(&path).unwrap().is_empty());
    }

    #[test]
    fn zero_byte_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "blank.csv", "");
        assert!(matches!(
            load_file(&path).unwrap_err(),
            LoadError::Parse { line: 1, .. }
        ));
    }

    #[test]
    fn tsv_header_is_checked_too() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "wrong.tsv", "work_year\tjob_title\n");
        match load_file(&path).unwrap_err() {
            LoadError::Parse { message, .. } => assert!(message.contains("job_category"), "{message}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn json_syntax_error_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "broken.json", "[\n  {\"work_year\": 2023,\n  oops\n]");
        match load_file(&path).unwrap_err() {
            LoadError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn json_missing_field_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "partial.json", r#"[{"work_year": 2023, "job_title": "A"}]"#);
        assert!(matches!(load_file(&path).unwrap_err(), LoadError::Parse { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "jobs.xlsx", "");
        assert!(matches!(
            load_file(&path).unwrap_err(),
            LoadError::UnsupportedFormat { extension } if extension == "xlsx"
        ));
    }
}

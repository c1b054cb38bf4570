use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use super::Record;
use super::parse::parse_records;

/// Where the chart's records come from.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    File(PathBuf),
    Demo,
}

impl Source {
    pub fn load(&self) -> Result<Vec<Record>> {
        match self {
            Self::File(path) => load_records(path),
            Self::Demo => Ok(demo_records()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Demo => "built-in demo".to_owned(),
        }
    }
}

fn load_records(path: &Path) -> Result<Vec<Record>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read records from {}", path.display()))?;
    let records =
        parse_records(&raw).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::info!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Word frequencies used when no input file is given.
fn demo_records() -> Vec<Record> {
    const WORDS: [(&str, u32, u32, f64); 24] = [
        ("engine", 1, 6, 14.0),
        ("engine", 3, 1, 10.0),
        ("engine", 3, 2, 10.0),
        ("piston", 2, 14, 7.0),
        ("cylinder", 2, 20, 9.0),
        ("turbocharger", 3, 11, 12.0),
        ("crankshaft", 4, 2, 6.0),
        ("camshaft", 4, 18, 5.0),
        ("valve", 5, 7, 4.0),
        ("diesel", 5, 9, 16.0),
        ("hybrid", 6, 1, 11.0),
        ("electric", 6, 3, 18.0),
        ("torque", 6, 21, 8.0),
        ("horsepower", 7, 4, 13.0),
        ("emissions", 8, 15, 9.0),
        ("ignition", 8, 16, 3.0),
        ("injection", 9, 2, 7.5),
        ("radiator", 9, 27, 4.5),
        ("exhaust", 10, 10, 6.5),
        ("gearbox", 10, 30, 8.5),
        ("clutch", 11, 5, 3.5),
        ("supercharger", 11, 24, 10.5),
        ("battery", 12, 8, 15.0),
        ("alternator", 12, 20, 5.5),
    ];

    WORDS
        .iter()
        .filter_map(|&(word, month, day, frequency)| {
            NaiveDate::from_ymd_opt(2014, month, day).map(|date| Record::new(date, frequency, word))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_records_are_all_valid_dates() {
        let records = demo_records();
        assert_eq!(records.len(), 24);
        assert!(records.iter().all(|record| record.frequency > 0.0));
    }

    #[test]
    fn demo_source_never_fails() {
        let records = Source::Demo.load().expect("demo records");
        assert_eq!(records, demo_records());
        assert_eq!(Source::Demo.describe(), "built-in demo");
    }

    #[test]
    fn missing_file_mentions_path() {
        let error = load_records(Path::new("/definitely/not/here.json"))
            .expect_err("file does not exist");
        assert!(format!("{error:#}").contains("/definitely/not/here.json"));
    }
}

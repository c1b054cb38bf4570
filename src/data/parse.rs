use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::Record;

pub(super) fn parse_records(raw: &str) -> Result<Vec<Record>> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in records file")?;

    let entries = match parsed {
        Value::Array(entries) => entries,
        Value::Object(mut object) => match object.remove("records") {
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(anyhow!("`records` must be a JSON array")),
            None => return Err(anyhow!("expected a JSON array or an object with `records`")),
        },
        _ => return Err(anyhow!("unexpected JSON type for records")),
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let record = Record::deserialize(entry)
            .with_context(|| format!("invalid record at index {index}"))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn parses_plain_array_with_word_alias() {
        let raw = r#"[
            {"date": "2014-03-01", "frequency": 10, "word": "engine"},
            {"date": "2014-04-12", "frequency": 4.5, "label": "piston"}
        ]"#;

        let records = parse_records(raw).expect("records parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "engine");
        assert_eq!(
            records[0].date,
            NaiveDate::from_ymd_opt(2014, 3, 1).expect("valid date")
        );
        assert_eq!(records[1].frequency, 4.5);
    }

    #[test]
    fn parses_wrapped_object() {
        let raw = r#"{"records": [{"date": "2015-01-31", "frequency": 1, "label": "valve"}]}"#;
        let records = parse_records(raw).expect("records parse");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn reports_index_of_bad_record() {
        let raw = r#"[{"date": "2014-03-01", "frequency": 1, "label": "a"}, {"date": "nope", "label": "b"}]"#;
        let error = parse_records(raw).expect_err("second record is invalid");
        assert!(format!("{error:#}").contains("index 1"));
    }

    #[test]
    fn rejects_scalar_json() {
        assert!(parse_records("42").is_err());
        assert!(parse_records(r#"{"records": 3}"#).is_err());
    }
}

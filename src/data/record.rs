use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Record {
    pub date: NaiveDate,
    #[serde(default)]
    pub frequency: f64,
    #[serde(alias = "word")]
    pub label: String,
}

impl Record {
    pub fn new(date: NaiveDate, frequency: f64, label: impl Into<String>) -> Self {
        Self {
            date,
            frequency,
            label: label.into(),
        }
    }
}

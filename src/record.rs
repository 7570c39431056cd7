use chrono::Duration;
use serde::{Deserialize, Deserializer};

use crate::error::{ParseError, PlotError};

/// One row of the remote dataset, exactly as served
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RaceResult {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Nationality")]
    pub nationality: String,
    #[serde(rename = "Year", deserialize_with = "text_or_number")]
    pub year: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Doping", default)]
    pub doping: String,
    #[serde(rename = "URL", default)]
    pub url: String,
}

/// A race result ready for plotting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotPoint {
    pub name: String,
    pub nationality: String,
    pub year: i32,
    /// Elapsed time since the origin; only minutes and seconds are meaningful
    pub time: Duration,
    pub doping: String,
    pub url: String,
}

impl PlotPoint {
    pub fn has_doping(&self) -> bool {
        !self.doping.is_empty()
    }
}

// The public dataset serves years as numbers, older mirrors as strings.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

/// Parse "MM:SS" into an elapsed duration. Each field may carry surrounding
/// whitespace and must be in 0..=59, so every accepted value formats back to
/// the same minutes and seconds.
pub fn parse_time(s: &str) -> Result<Duration, ParseError> {
    let invalid = || ParseError::Time(s.to_string());

    let mut parts = s.split(':');
    let (minutes, seconds) = match (parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(s), None) => (component(m).ok_or_else(invalid)?, component(s).ok_or_else(invalid)?),
        _ => return Err(invalid()),
    };

    if minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    Ok(Duration::seconds(minutes * 60 + seconds))
}

fn component(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub fn parse_year(s: &str) -> Result<i32, ParseError> {
    s.trim()
        .parse::<i32>()
        .map_err(|_| ParseError::Year(s.to_string()))
}

/// Format an elapsed duration as zero-padded "MM:SS"
pub fn format_time(d: Duration) -> String {
    let total = d.num_seconds();
    format!("{:02}:{:02}", (total / 60) % 60, total % 60)
}

pub fn transform(raw: &RaceResult) -> Result<PlotPoint, ParseError> {
    Ok(PlotPoint {
        name: raw.name.clone(),
        nationality: raw.nationality.clone(),
        year: parse_year(&raw.year)?,
        time: parse_time(&raw.time)?,
        doping: raw.doping.clone(),
        url: raw.url.clone(),
    })
}

/// Transform every record in order; the first malformed record fails the batch
pub fn transform_all(raws: &[RaceResult]) -> Result<Vec<PlotPoint>, PlotError> {
    raws.iter()
        .enumerate()
        .map(|(index, raw)| {
            transform(raw).map_err(|source| PlotError::Record {
                index,
                name: raw.name.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn race_result(name: &str, year: &str, time: &str, doping: &str) -> RaceResult {
    RaceResult {
        name: name.to_string(),
        nationality: "ITA".to_string(),
        year: year.to_string(),
        time: time.to_string(),
        doping: doping.to_string(),
        url: String::new(),
    }
}

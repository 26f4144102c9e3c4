//! Load tracks from CSV or JSON files

use super::data::{period_count_from, RepaymentMethod, TrackParams, DEFAULT_ANNUAL_INDEX_RATE};
use crate::error::{Result, ScheduleError};
use csv::Reader;
use std::fs::File;
use std::path::Path;

/// Raw CSV row matching the tracks file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: Option<String>,
    method: String,
    principal: f64,
    annual_interest_rate: f64,
    period_count: i64,
    #[serde(default)]
    annual_index_rate: Option<f64>,
    /// `;`-separated index observations
    #[serde(default)]
    index_series: Option<String>,
}

impl CsvRow {
    fn into_track(self) -> Result<TrackParams> {
        let method: RepaymentMethod = self.method.parse()?;
        let index_series = match self.index_series.as_deref() {
            Some(raw) => parse_index_series(raw)?,
            None => Vec::new(),
        };

        Ok(TrackParams {
            name: self.name.filter(|n| !n.trim().is_empty()),
            method,
            principal: self.principal,
            annual_interest_rate: self.annual_interest_rate,
            period_count: period_count_from(self.period_count)?,
            annual_index_rate: self.annual_index_rate.unwrap_or(DEFAULT_ANNUAL_INDEX_RATE),
            index_series,
        })
    }
}

/// Parse a `;`-separated list of index observations. Empty input yields an empty series.
pub fn parse_index_series(raw: &str) -> Result<Vec<f64>> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| ScheduleError::InvalidIndexSeries(s.to_string()))
        })
        .collect()
}

/// Load all tracks from a CSV file
pub fn load_tracks<P: AsRef<Path>>(path: P) -> Result<Vec<TrackParams>> {
    let file = File::open(path)?;
    load_tracks_from_reader(file)
}

/// Load tracks from any reader (e.g., string buffer, stdin)
pub fn load_tracks_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<TrackParams>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut tracks = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        tracks.push(row.into_track()?);
    }

    Ok(tracks)
}

/// Load tracks from a JSON array of [`TrackParams`]
pub fn load_tracks_json<P: AsRef<Path>>(path: P) -> Result<Vec<TrackParams>> {
    let file = File::open(path)?;
    let tracks: Vec<TrackParams> = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(tracks)
}

/// Load tracks, picking the format from the file extension (`.json`, otherwise CSV)
pub fn load_tracks_auto<P: AsRef<Path>>(path: P) -> Result<Vec<TrackParams>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        load_tracks_json(path)
    } else {
        load_tracks(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACKS_CSV: &str = "\
name,method,principal,annual_interest_rate,period_count,annual_index_rate,index_series
Prime,straight,400000,3.5,300,,
CPI linked,declining,250000,2.1,240,2.0,1
Fixed,bullet,100000,4.0,60,0,
";

    #[test]
    fn test_load_tracks_from_reader() {
        let tracks = load_tracks_from_reader(TRACKS_CSV.as_bytes()).expect("Failed to load tracks");
        assert_eq!(tracks.len(), 3);

        let prime = &tracks[0];
        assert_eq!(prime.name.as_deref(), Some("Prime"));
        assert_eq!(prime.method, RepaymentMethod::Straight);
        assert_eq!(prime.period_count, 300);
        assert_eq!(prime.annual_index_rate, DEFAULT_ANNUAL_INDEX_RATE);
        assert!(prime.index_series.is_empty());

        let cpi = &tracks[1];
        assert_eq!(cpi.method, RepaymentMethod::Declining);
        assert_eq!(cpi.index_series, vec![1.0]);
        assert!((cpi.inflation() - 2.0).abs() < 1e-12);

        assert_eq!(tracks[2].method, RepaymentMethod::Bullet);
    }

    #[test]
    fn test_negative_period_rejected() {
        let csv = "method,principal,annual_interest_rate,period_count\nbullet,1000,4,-6\n";
        let err = load_tracks_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidPeriod { period_count: -6 }));
    }

    #[test]
    fn test_unknown_method_rejected() {
        let csv = "method,principal,annual_interest_rate,period_count\nballoon,1000,4,6\n";
        let err = load_tracks_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownMethod(_)));
    }

    #[test]
    fn test_parse_index_series() {
        assert_eq!(parse_index_series("").unwrap(), Vec::<f64>::new());
        assert_eq!(parse_index_series("101.2; 102.5;").unwrap(), vec![101.2, 102.5]);
        assert!(parse_index_series("101.2;abc").is_err());
    }

    #[test]
    fn test_track_json_defaults() {
        let json = r#"[{
            "method": "straight",
            "principal": 1000.0,
            "annual_interest_rate": 3.0,
            "period_count": 12
        }]"#;
        let tracks: Vec<TrackParams> = serde_json::from_str(json).unwrap();
        assert_eq!(tracks[0].annual_index_rate, DEFAULT_ANNUAL_INDEX_RATE);
        assert!(tracks[0].index_series.is_empty());
        assert!(tracks[0].name.is_none());
    }
}

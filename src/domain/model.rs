use std::fmt;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::utils::{calculate_speed, format_human_size, index_width};

use super::error::{AppError, Result};

/// Size class of the file used for a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Small,
    Medium,
    Large,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Small => "small",
            Category::Medium => "medium",
            Category::Large => "large",
        };
        f.write_str(name)
    }
}

/// One completed download measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    bytes_downloaded: u64,
    duration_seconds: f64,
    speed_mbps: f64,
}

impl Sample {
    /// Build a sample, deriving the speed from size and duration.
    ///
    /// Fails when the duration is not a positive finite number of seconds.
    pub fn new(bytes_downloaded: u64, duration_seconds: f64) -> Result<Self> {
        if !(duration_seconds.is_finite() && duration_seconds > 0.0) {
            return Err(AppError::InvalidConfiguration(format!(
                "transfer of {} bytes measured a duration of {} s",
                bytes_downloaded, duration_seconds
            )));
        }

        Ok(Self {
            bytes_downloaded,
            duration_seconds,
            speed_mbps: calculate_speed(bytes_downloaded, duration_seconds),
        })
    }

    pub fn bytes_downloaded(&self) -> u64 {
        self.bytes_downloaded
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    pub fn speed_mbps(&self) -> f64 {
        self.speed_mbps
    }
}

/// Arithmetic mean of the sample speeds, `None` for an empty slice
pub fn mean_speed(samples: &[Sample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: f64 = samples.iter().map(Sample::speed_mbps).sum();
    Some(total / samples.len() as f64)
}

/// Result of one run: every sample in invocation order plus their mean
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    started_at: DateTime<Local>,
    samples: Vec<Sample>,
    mean_speed_mbps: f64,
}

impl RunReport {
    pub fn new(started_at: DateTime<Local>, samples: Vec<Sample>) -> Result<Self> {
        let mean_speed_mbps = mean_speed(&samples).ok_or_else(|| {
            AppError::InvalidConfiguration("a run report needs at least one sample".to_string())
        })?;

        Ok(Self {
            started_at,
            samples,
            mean_speed_mbps,
        })
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn mean_speed_mbps(&self) -> f64 {
        self.mean_speed_mbps
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.samples.len();
        let width = index_width(count);
        let delimiter = "=".repeat(10);

        writeln!(
            f,
            ">>> Began test at {}",
            self.started_at.format("%d-%m-%Y %H:%M:%S")
        )?;
        for (i, sample) in self.samples.iter().enumerate() {
            writeln!(
                f,
                "Test {:>width$}:\tSpeed: {:.2} Mbps\tFilesize: {}\tDuration: {:.1} s",
                i + 1,
                sample.speed_mbps,
                format_human_size(sample.bytes_downloaded),
                sample.duration_seconds,
            )?;
        }
        write!(
            f,
            "{delimiter} Average: {:.2} Mbps\tTests completed: {} {delimiter}",
            self.mean_speed_mbps, count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn started_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn test_sample_speed_from_bytes_and_duration() {
        let first = Sample::new(10_000_000, 1.0).unwrap();
        let second = Sample::new(50_000_000, 2.0).unwrap();
        assert_eq!(first.speed_mbps(), 80.0);
        assert_eq!(second.speed_mbps(), 200.0);
        assert_eq!(mean_speed(&[first, second]), Some(140.0));
    }

    #[test]
    fn test_sample_rejects_degenerate_duration() {
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Sample::new(1_000, duration).unwrap_err();
            assert!(matches!(err, AppError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_zero_bytes_is_zero_speed() {
        let sample = Sample::new(0, 3.0).unwrap();
        assert_eq!(sample.speed_mbps(), 0.0);
    }

    #[test]
    fn test_mean_is_order_invariant() {
        let samples: Vec<Sample> = [(1_234_567, 0.7), (98_765_432, 3.3), (5_000, 0.01)]
            .iter()
            .map(|&(b, d)| Sample::new(b, d).unwrap())
            .collect();
        let mut reversed = samples.clone();
        reversed.reverse();

        let forward = mean_speed(&samples).unwrap();
        let backward = mean_speed(&reversed).unwrap();
        assert!((forward - backward).abs() < 1e-9);
        let expected = samples.iter().map(|s| s.speed_mbps()).sum::<f64>() / 3.0;
        assert!((forward - expected).abs() < 1e-9);
    }

    #[test]
    fn test_mean_of_nothing() {
        assert_eq!(mean_speed(&[]), None);
        assert!(RunReport::new(started_at(), Vec::new()).is_err());
    }

    #[test]
    fn test_single_sample_report_mean() {
        let sample = Sample::new(52_428_800, 4.2).unwrap();
        let report = RunReport::new(started_at(), vec![sample]).unwrap();
        assert_eq!(report.mean_speed_mbps(), sample.speed_mbps());
    }

    #[test]
    fn test_report_text() {
        let samples = vec![
            Sample::new(10_485_760, 1.0).unwrap(),
            Sample::new(10_485_760, 2.0).unwrap(),
        ];
        let report = RunReport::new(started_at(), samples).unwrap();

        let expected = "\
>>> Began test at 05-03-2024 14:07:09
Test 1:\tSpeed: 83.89 Mbps\tFilesize: 10 MB\tDuration: 1.0 s
Test 2:\tSpeed: 41.94 Mbps\tFilesize: 10 MB\tDuration: 2.0 s
========== Average: 62.91 Mbps\tTests completed: 2 ==========";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_report_pads_index_to_widest() {
        let samples = vec![Sample::new(1_000_000, 1.0).unwrap(); 10];
        let report = RunReport::new(started_at(), samples).unwrap();
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 12);
        assert!(lines[1].starts_with("Test  1:\t"));
        assert!(lines[10].starts_with("Test 10:\t"));
        assert!(lines[11].ends_with("Tests completed: 10 =========="));
    }

    #[test]
    fn test_report_serializes() {
        let report = RunReport::new(started_at(), vec![Sample::new(125_000, 1.0).unwrap()]).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mean_speed_mbps"], 1.0);
        assert_eq!(json["samples"][0]["bytes_downloaded"], 125_000);
        assert_eq!(Category::Medium.to_string(), "medium");
    }
}

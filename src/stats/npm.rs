//! npm download statistics

use super::ApiClient;
use crate::Result;
use chrono::{Days, NaiveDate};
use serde::Deserialize;

/// Days of history requested: the current 90-day window and the one before it.
const HISTORY_DAYS: u64 = 180;

#[derive(Debug, Deserialize)]
struct DownloadRange {
    #[serde(default)]
    downloads: Vec<DailyDownloads>,
}

#[derive(Debug, Deserialize)]
struct DailyDownloads {
    downloads: u64,
}

/// Windowed download figures of a package.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DownloadStats {
    pub total_downloads30: u64,
    pub total_downloads90: u64,
    pub average_downloads30: f64,
    pub average_downloads90: f64,
    pub percentage_change: f64,
}

/// Client for the npm downloads API.
#[derive(Debug, Clone)]
pub struct NpmApi {
    client: ApiClient,
    base: String,
}

impl NpmApi {
    #[must_use]
    pub fn new(client: ApiClient, base: &str) -> Self {
        Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Download figures of `package` for the windows ending on `today`.
    pub async fn downloads(&self, package: &str, today: NaiveDate) -> Result<DownloadStats> {
        let start = today.checked_sub_days(Days::new(HISTORY_DAYS - 1)).unwrap_or(today);
        let url = format!(
            "{}/downloads/range/{}:{}/{package}",
            self.base,
            start.format("%Y-%m-%d"),
            today.format("%Y-%m-%d")
        );

        let range: DownloadRange = self.client.get_json(&url).await?;
        let daily: Vec<u64> = range.downloads.iter().map(|d| d.downloads).collect();
        Ok(summarize(&daily))
    }
}

/// Summarize daily download counts, oldest first.
#[must_use]
pub fn summarize(daily: &[u64]) -> DownloadStats {
    let len = daily.len();
    let last30 = daily.get(len.saturating_sub(30)..).unwrap_or_default();
    let last90 = daily.get(len.saturating_sub(90)..).unwrap_or_default();
    let previous90 = daily
        .get(len.saturating_sub(180)..len.saturating_sub(90))
        .unwrap_or_default();

    let total30: u64 = last30.iter().sum();
    let total90: u64 = last90.iter().sum();
    let previous_total90: u64 = previous90.iter().sum();

    let percentage_change = if previous_total90 == 0 {
        0.0
    } else {
        round2((total90 as f64 - previous_total90 as f64) / previous_total90 as f64 * 100.0)
    };

    DownloadStats {
        total_downloads30: total30,
        total_downloads90: total90,
        average_downloads30: round2(total30 as f64 / 30.0),
        average_downloads90: round2(total90 as f64 / 90.0),
        percentage_change,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::HttpPolicy;
    use core::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_summarize_full_history() {
        let mut daily = vec![10; 90];
        daily.extend(vec![20; 90]);

        let stats = summarize(&daily);
        assert_eq!(stats.total_downloads30, 600);
        assert_eq!(stats.total_downloads90, 1800);
        assert!((stats.average_downloads30 - 20.0).abs() < f64::EPSILON);
        assert!((stats.average_downloads90 - 20.0).abs() < f64::EPSILON);
        assert!((stats.percentage_change - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_rounds_to_two_decimals() {
        let mut daily = vec![3; 90];
        daily.extend(vec![1; 89]);
        daily.push(2);

        let stats = summarize(&daily);
        assert_eq!(stats.total_downloads90, 91);
        assert!((stats.average_downloads90 - 1.01).abs() < f64::EPSILON);
        assert!((stats.percentage_change - -66.3).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_without_previous_window() {
        let stats = summarize(&[5; 40]);
        assert_eq!(stats.total_downloads30, 150);
        assert_eq!(stats.total_downloads90, 200);
        assert!(stats.percentage_change.abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), DownloadStats::default());
    }

    #[tokio::test]
    async fn test_downloads_requests_180_day_range() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/downloads/range/2024-01-04:2024-07-01/@nuxtjs/robots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "start": "2024-01-04",
                "end": "2024-07-01",
                "package": "@nuxtjs/robots",
                "downloads": [
                    { "downloads": 4, "day": "2024-06-30" },
                    { "downloads": 6, "day": "2024-07-01" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(None, HttpPolicy::single_attempt(Duration::from_secs(5))).unwrap();
        let npm = NpmApi::new(client, &server.uri());
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let stats = npm.downloads("@nuxtjs/robots", today).await.unwrap();
        assert_eq!(stats.total_downloads30, 10);
        assert_eq!(stats.total_downloads90, 10);
    }
}

//! Where the holiday schedule comes from.

use std::future::Future;

use reqwest::StatusCode;

use crate::config::{SyncConfig, expand_year};
use crate::error::{HolidayError, HolidayResult};
use crate::holiday::HolidayMap;

/// A provider of the yearly holiday schedule.
pub trait HolidaySource {
    /// Fetch and parse the schedule for `year`.
    fn fetch(&self, year: i32) -> impl Future<Output = HolidayResult<HolidayMap>> + Send;

    /// Human-readable origin of the data for `year` (shown before fetching).
    fn describe(&self, year: i32) -> String;
}

/// Downloads the schedule as JSON over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpSource {
    pub fn new(config: &SyncConfig) -> HolidayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("tinycal-holiday/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HolidayError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpSource {
            client,
            url_template: config.source_url.clone(),
        })
    }

    pub fn url_for(&self, year: i32) -> String {
        expand_year(&self.url_template, year)
    }
}

impl HolidaySource for HttpSource {
    async fn fetch(&self, year: i32) -> HolidayResult<HolidayMap> {
        let url = self.url_for(year);
        tracing::debug!(%url, "Fetching holiday data");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| HolidayError::Fetch { year, source })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(HolidayError::NotFound(year));
        }
        if !status.is_success() {
            return Err(HolidayError::HttpStatus {
                year,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| HolidayError::Fetch { year, source })?;

        let map = HolidayMap::from_json(year, &body)?;
        tracing::debug!(days = map.len(), "Parsed holiday data");
        Ok(map)
    }

    fn describe(&self, year: i32) -> String {
        self.url_for(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_year() {
        let source = HttpSource::new(&SyncConfig::default()).unwrap();
        assert_eq!(
            source.url_for(2026),
            "https://raw.githubusercontent.com/NateScarlet/holiday-cn/master/2026.json"
        );
        assert_eq!(source.describe(2026), source.url_for(2026));
    }

    use std::time::Duration;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Source pointed at the mock server, `timeout_secs` = 1.
    fn mock_source(server: &MockServer) -> HttpSource {
        let config = SyncConfig {
            source_url: format!("{}/holiday-cn/{{year}}.json", server.uri()),
            timeout_secs: 1,
            ..SyncConfig::default()
        };
        HttpSource::new(&config).unwrap()
    }

    async fn serve(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/holiday-cn/2025.json"))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_parses_schedule() {
        let server = MockServer::start().await;
        serve(
            &server,
            ResponseTemplate::new(200).set_body_string(
                r#"{"year": 2025, "days": [{"name": "元旦", "date": "2025-01-01", "isOffDay": true}]}"#,
            ),
        )
        .await;

        let map = mock_source(&server).fetch(2025).await.unwrap();

        let new_year = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&new_year), Some(crate::DayKind::Rest));
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        serve(&server, ResponseTemplate::new(404)).await;

        let err = mock_source(&server).fetch(2025).await.unwrap_err();
        assert!(matches!(err, HolidayError::NotFound(2025)));
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let server = MockServer::start().await;
        serve(&server, ResponseTemplate::new(503).set_body_string("unavailable")).await;

        let err = mock_source(&server).fetch(2025).await.unwrap_err();
        assert!(matches!(
            err,
            HolidayError::HttpStatus {
                year: 2025,
                status: 503
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_non_json_body() {
        let server = MockServer::start().await;
        serve(
            &server,
            ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"),
        )
        .await;

        let err = mock_source(&server).fetch(2025).await.unwrap_err();
        assert!(matches!(err, HolidayError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        serve(
            &server,
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"date": "2025-01-01", "isOffDay": true}]"#)
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let err = mock_source(&server).fetch(2025).await.unwrap_err();
        match err {
            HolidayError::Fetch { year, source } => {
                assert_eq!(year, 2025);
                assert!(source.is_timeout());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_template() {
        let config = SyncConfig {
            source_url: "https://mirror.example.com/holiday-cn/{year}.json".into(),
            ..SyncConfig::default()
        };
        let source = HttpSource::new(&config).unwrap();
        assert_eq!(source.url_for(2024), "https://mirror.example.com/holiday-cn/2024.json");
    }
}

//! Aggregation orchestrator: drives one full dashboard refresh and the
//! independent compare/historical lookups.

use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use tracing::warn;

use crate::{
    error::{Result, WeatherError},
    model::{ComparisonResult, CurrentConditions, HistoricalWeather, MetricStats, RefreshResult},
    provider::ProviderGateway,
};

/// Most locations honored by one compare request; extras are dropped.
pub const MAX_COMPARE_LOCATIONS: usize = 5;

pub struct Dashboard {
    gateway: Box<dyn ProviderGateway>,
}

impl Dashboard {
    pub fn new(gateway: Box<dyn ProviderGateway>) -> Self {
        Self { gateway }
    }

    /// Full refresh for one location query.
    ///
    /// Two phases: current conditions is required and its failure fails the
    /// whole refresh with no further calls; the remaining facets then run
    /// concurrently and each failure only leaves that facet absent.
    pub async fn refresh(&self, query: &str) -> Result<RefreshResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::Validation("location query must not be empty".into()));
        }

        let current = self.gateway.fetch_current(query).await?;

        let (forecast, air_quality, alerts) = tokio::join!(
            self.gateway.fetch_forecast(query),
            self.gateway.fetch_air_quality(query),
            self.gateway.fetch_alerts(query),
        );

        Ok(RefreshResult {
            current,
            forecast: optional_facet("forecast", forecast),
            air_quality: optional_facet("air quality", air_quality),
            alerts: optional_facet("alerts", alerts),
        })
    }

    /// Current conditions for several locations side by side, with
    /// aggregate stats over the lookups that succeeded.
    pub async fn compare(&self, queries: &[String]) -> Result<ComparisonResult> {
        let queries: Vec<&str> =
            queries.iter().map(|q| q.trim()).filter(|q| !q.is_empty()).collect();

        if queries.len() < 2 {
            return Err(WeatherError::Validation(
                "at least 2 locations are required for comparison".into(),
            ));
        }

        let lookups = queries
            .iter()
            .take(MAX_COMPARE_LOCATIONS)
            .map(|query| self.gateway.fetch_current(query));
        let results = join_all(lookups).await;

        let mut locations = Vec::new();
        for (query, result) in queries.iter().copied().zip(results) {
            match result {
                Ok(current) => locations.push(current),
                Err(err) => warn!(%err, query, "dropping failed comparison lookup"),
            }
        }

        if locations.is_empty() {
            return Err(WeatherError::Upstream(
                "none of the compared locations could be fetched".into(),
            ));
        }

        let temperature = metric_stats(locations.iter().map(|c| c.temperature_c));
        let humidity = metric_stats(locations.iter().map(|c| c.humidity_pct));
        let wind = metric_stats(locations.iter().map(|c| c.wind_speed_kph));

        Ok(ComparisonResult { locations, temperature, humidity, wind })
    }

    /// Observed data for one past calendar day. Dates are validated here,
    /// at the input boundary, and nowhere below.
    pub async fn historical(&self, query: &str, date: NaiveDate) -> Result<HistoricalWeather> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::Validation("location query must not be empty".into()));
        }
        if date > Utc::now().date_naive() {
            return Err(WeatherError::Validation(format!(
                "historical date {date} must not be in the future"
            )));
        }

        self.gateway.fetch_historical(query, date).await
    }

    /// Saved-location add path resolves the query first so the stored
    /// entry carries the provider's canonical identity.
    pub async fn resolve(&self, query: &str) -> Result<CurrentConditions> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WeatherError::Validation("location query must not be empty".into()));
        }
        self.gateway.fetch_current(query).await
    }
}

/// Collapse an optional facet result, logging and dropping the failure.
fn optional_facet<T>(facet: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(%err, facet, "optional facet unavailable for this refresh");
            None
        }
    }
}

/// Highest / lowest / average over a non-empty value sequence. The average
/// is rounded to the nearest whole number for output parity with the
/// dashboard's display contract.
fn metric_stats(values: impl Iterator<Item = f64>) -> MetricStats {
    let mut highest = f64::NEG_INFINITY;
    let mut lowest = f64::INFINITY;
    let mut sum = 0.0;
    let mut count = 0usize;

    for value in values {
        highest = highest.max(value);
        lowest = lowest.min(value);
        sum += value;
        count += 1;
    }

    MetricStats { highest, lowest, average: (sum / count as f64).round() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AirQualitySnapshot, ForecastDay, LocationInfo, WeatherAlert,
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn sample_current(name: &str, temperature_c: f64) -> CurrentConditions {
        CurrentConditions {
            location: LocationInfo {
                name: name.to_string(),
                country: "Testland".to_string(),
                region: String::new(),
                localtime: "2024-03-15 12:00".to_string(),
                lat: 0.0,
                lon: 0.0,
            },
            temperature_c,
            weather_code: 1000,
            weather_descriptions: vec!["Sunny".to_string()],
            weather_icons: vec![],
            wind_speed_kph: 10.0,
            wind_degree: 90,
            wind_dir: "E".to_string(),
            pressure_mb: 1012.0,
            precip_mm: 0.0,
            humidity_pct: 60.0,
            cloudcover_pct: 0.0,
            feelslike_c: temperature_c,
            uv_index: 4.0,
            visibility_km: 10.0,
            is_day: true,
        }
    }

    /// Gateway double: configurable failures, counts every current lookup.
    #[derive(Debug, Default)]
    struct FakeState {
        fail_current: bool,
        fail_forecast: bool,
        fail_air_quality: bool,
        fail_alerts: bool,
        current_calls: AtomicUsize,
    }

    #[derive(Debug, Clone, Default)]
    struct FakeGateway(Arc<FakeState>);

    #[async_trait]
    impl ProviderGateway for FakeGateway {
        async fn fetch_current(&self, query: &str) -> Result<CurrentConditions> {
            self.0.current_calls.fetch_add(1, Ordering::SeqCst);
            if self.0.fail_current {
                return Err(WeatherError::Upstream("current unavailable".into()));
            }
            Ok(sample_current(query, 20.0))
        }

        async fn fetch_forecast(&self, _query: &str) -> Result<Vec<ForecastDay>> {
            if self.0.fail_forecast {
                return Err(WeatherError::Upstream("forecast unavailable".into()));
            }
            Ok(vec![])
        }

        async fn fetch_air_quality(&self, _query: &str) -> Result<AirQualitySnapshot> {
            if self.0.fail_air_quality {
                return Err(WeatherError::Upstream("air quality unavailable".into()));
            }
            Ok(AirQualitySnapshot {
                co: 250.0,
                no2: 20.0,
                o3: 80.0,
                so2: 10.0,
                pm2_5: 12.0,
                pm10: 20.0,
                us_epa_index: 2,
                gb_defra_index: 2,
            })
        }

        async fn fetch_alerts(&self, _query: &str) -> Result<Vec<WeatherAlert>> {
            if self.0.fail_alerts {
                return Err(WeatherError::Upstream("alerts unavailable".into()));
            }
            Ok(vec![])
        }

        async fn fetch_historical(
            &self,
            query: &str,
            date: NaiveDate,
        ) -> Result<HistoricalWeather> {
            let _ = (query, date);
            Err(WeatherError::Upstream("not under test".into()))
        }
    }

    fn dashboard_with(state: FakeState) -> (Dashboard, Arc<FakeState>) {
        let gateway = FakeGateway(Arc::new(state));
        let state = gateway.0.clone();
        (Dashboard::new(Box::new(gateway)), state)
    }

    #[tokio::test]
    async fn refresh_rejects_empty_query_without_any_call() {
        let (dash, state) = dashboard_with(FakeState::default());

        for query in ["", "   ", "\t\n"] {
            let err = dash.refresh(query).await.unwrap_err();
            assert!(matches!(err, WeatherError::Validation(_)));
        }
        assert_eq!(state.current_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn refresh_fails_when_current_fails() {
        let (dash, _) = dashboard_with(FakeState { fail_current: true, ..Default::default() });
        let err = dash.refresh("London").await.unwrap_err();
        assert!(matches!(err, WeatherError::Upstream(_)));
    }

    #[tokio::test]
    async fn refresh_tolerates_optional_facet_failures() {
        let (dash, _) = dashboard_with(FakeState { fail_forecast: true, ..Default::default() });
        let result = dash.refresh("London").await.expect("refresh succeeds");
        assert_eq!(result.current.location.name, "London");
        assert!(result.forecast.is_none());
        assert!(result.air_quality.is_some());
        assert!(result.alerts.is_some());
    }

    #[tokio::test]
    async fn refresh_tolerates_every_optional_facet_failing() {
        let (dash, _) = dashboard_with(FakeState {
            fail_forecast: true,
            fail_air_quality: true,
            fail_alerts: true,
            ..Default::default()
        });
        let result = dash.refresh("London").await.expect("refresh succeeds");
        assert!(result.forecast.is_none());
        assert!(result.air_quality.is_none());
        assert!(result.alerts.is_none());
    }

    #[tokio::test]
    async fn compare_requires_two_queries_before_any_call() {
        let (dash, state) = dashboard_with(FakeState::default());

        let err = dash.compare(&["London".to_string()]).await.unwrap_err();
        assert!(matches!(err, WeatherError::Validation(_)));

        let err = dash.compare(&[]).await.unwrap_err();
        assert!(matches!(err, WeatherError::Validation(_)));

        assert_eq!(state.current_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn compare_truncates_to_five_locations() {
        let (dash, state) = dashboard_with(FakeState::default());

        let queries: Vec<String> =
            ["A", "B", "C", "D", "E", "F", "G"].iter().map(|s| s.to_string()).collect();
        let result = dash.compare(&queries).await.expect("compare succeeds");

        assert_eq!(result.locations.len(), 5);
        assert_eq!(state.current_calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn compare_fails_upstream_when_all_lookups_fail() {
        let (dash, _) = dashboard_with(FakeState { fail_current: true, ..Default::default() });
        let err = dash.compare(&["A".to_string(), "B".to_string()]).await.unwrap_err();
        assert!(matches!(err, WeatherError::Upstream(_)));
    }

    #[tokio::test]
    async fn compare_computes_stats_over_survivors() {
        let (dash, _) = dashboard_with(FakeState::default());
        let result = dash
            .compare(&["A".to_string(), "B".to_string(), "C".to_string()])
            .await
            .expect("compare succeeds");
        assert_eq!(result.temperature.highest, 20.0);
        assert_eq!(result.temperature.lowest, 20.0);
        assert_eq!(result.temperature.average, 20.0);
        assert_eq!(result.humidity.average, 60.0);
        assert_eq!(result.wind.average, 10.0);
    }

    #[tokio::test]
    async fn historical_rejects_future_dates() {
        let (dash, state) = dashboard_with(FakeState::default());
        let tomorrow = Utc::now().date_naive() + chrono::Duration::days(1);
        let err = dash.historical("London", tomorrow).await.unwrap_err();
        assert!(matches!(err, WeatherError::Validation(_)));
        assert_eq!(state.current_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn metric_stats_over_known_values() {
        let stats = metric_stats([20.0, 10.0, 15.0].into_iter());
        assert_eq!(stats.highest, 20.0);
        assert_eq!(stats.lowest, 10.0);
        assert_eq!(stats.average, 15.0);

        // Average rounds to the nearest whole number.
        let stats = metric_stats([20.0, 21.0].into_iter());
        assert_eq!(stats.average, 21.0);
    }
}

use crate::{
    config::Config,
    error::{Result, WeatherError},
    model::{
        AirQualitySnapshot, CurrentConditions, ForecastDay, HistoricalWeather, WeatherAlert,
    },
    provider::{synthetic::SyntheticGenerator, weatherstack::WeatherstackGateway},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Debug;

pub mod synthetic;
pub mod weatherstack;

/// One operation per dashboard facet. Each is independent of the others;
/// ordering is the orchestrator's concern, not the gateway's.
#[async_trait]
pub trait ProviderGateway: Send + Sync + Debug {
    /// Current conditions for one location. The only facet whose failure
    /// is fatal to a dashboard refresh.
    async fn fetch_current(&self, query: &str) -> Result<CurrentConditions>;

    /// Seven-day forecast, 24 hourly entries per day, index 0 = today.
    async fn fetch_forecast(&self, query: &str) -> Result<Vec<ForecastDay>>;

    /// Pollutant concentrations plus index scores.
    async fn fetch_air_quality(&self, query: &str) -> Result<AirQualitySnapshot>;

    /// Zero or more active advisories.
    async fn fetch_alerts(&self, query: &str) -> Result<Vec<WeatherAlert>>;

    /// Observed data for one past calendar day.
    async fn fetch_historical(&self, query: &str, date: NaiveDate) -> Result<HistoricalWeather>;
}

/// Construct the gateway from config, or fail when no credential is present.
pub fn gateway_from_config(config: &Config) -> Result<Box<dyn ProviderGateway>> {
    let api_key = config.api_key().ok_or_else(|| {
        WeatherError::Config(
            "No provider API key configured.\n\
             Hint: run `skycast configure` or set WEATHERSTACK_API_KEY."
                .to_string(),
        )
    })?;

    let synth = SyntheticGenerator::new(config.synthetic_seed);
    let gateway = match &config.base_url {
        Some(url) => WeatherstackGateway::with_base_url(api_key, url.clone(), synth)?,
        None => WeatherstackGateway::new(api_key, synth)?,
    };

    Ok(Box::new(gateway))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_from_config_errors_when_missing_api_key() {
        if std::env::var(crate::config::API_KEY_ENV).is_ok() {
            // Ambient credential would satisfy the fallback; skip.
            return;
        }
        let cfg = Config::default();
        let err = gateway_from_config(&cfg).unwrap_err();
        assert!(matches!(err, WeatherError::Config(_)));
        assert!(err.to_string().contains("No provider API key configured"));
    }

    #[test]
    fn gateway_from_config_works_when_key_set() {
        let cfg = Config { api_key: Some("KEY".into()), ..Config::default() };
        assert!(gateway_from_config(&cfg).is_ok());
    }
}

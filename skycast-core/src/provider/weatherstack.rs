use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::{collections::HashMap, time::Duration};
use tracing::{debug, warn};

use crate::{
    error::{Result, WeatherError},
    model::{
        AirQualitySnapshot, Astro, CurrentConditions, ForecastDay, HistoricalDay, HistoricalHour,
        HistoricalWeather, LocationInfo, WeatherAlert,
    },
    provider::{ProviderGateway, synthetic::SyntheticGenerator},
};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherstack.com";

/// Gateway backed by the Weatherstack HTTP API.
///
/// Only current conditions and historical data exist on the real API;
/// forecast, air quality and alerts are free-tier gaps and are served by
/// the synthetic generator so the dashboard is always exercisable.
#[derive(Debug, Clone)]
pub struct WeatherstackGateway {
    api_key: String,
    base_url: String,
    http: Client,
    synth: SyntheticGenerator,
}

impl WeatherstackGateway {
    pub fn new(api_key: String, synth: SyntheticGenerator) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), synth)
    }

    /// Same gateway against a different host; tests point this at a local
    /// mock server.
    pub fn with_base_url(
        api_key: String,
        base_url: String,
        synth: SyntheticGenerator,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("skycast/0.1")
            .build()?;

        Ok(Self { api_key, base_url, http, synth })
    }

    /// GET one endpoint and return the decoded JSON body, mapping
    /// non-success statuses and embedded error payloads to `Upstream`.
    async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(endpoint, "querying weather provider");

        let res = self
            .http
            .get(&url)
            .query(&[("access_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Upstream(format!(
                "{endpoint} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        let value: Value = serde_json::from_str(&body)?;

        // Weatherstack reports errors inside a 200 body.
        if let Some(error) = value.get("error") {
            let info = error
                .get("info")
                .and_then(Value::as_str)
                .unwrap_or("provider returned an error payload")
                .to_string();
            return Err(WeatherError::Upstream(info));
        }

        Ok(value)
    }

    async fn try_fetch_historical(
        &self,
        query: &str,
        date: NaiveDate,
    ) -> Result<HistoricalWeather> {
        let date_str = date.to_string();
        let value = self
            .get_json("historical", &[("query", query), ("historical_date", date_str.as_str())])
            .await?;

        let raw: WsHistoricalResponse = serde_json::from_value(value)?;
        let day = raw.historical.get(&date_str).ok_or_else(|| {
            WeatherError::Upstream(format!("historical response is missing day {date_str}"))
        })?;

        Ok(HistoricalWeather {
            location: raw.location.normalize()?,
            day: day.normalize(date),
        })
    }
}

#[async_trait]
impl ProviderGateway for WeatherstackGateway {
    async fn fetch_current(&self, query: &str) -> Result<CurrentConditions> {
        let value = self.get_json("current", &[("query", query)]).await?;
        let raw: WsCurrentResponse = serde_json::from_value(value)?;
        raw.normalize()
    }

    // Forecast data is not on the free tier; synthesized instead.
    async fn fetch_forecast(&self, _query: &str) -> Result<Vec<ForecastDay>> {
        Ok(self.synth.forecast())
    }

    // Air quality is not on the free tier; synthesized instead.
    async fn fetch_air_quality(&self, _query: &str) -> Result<AirQualitySnapshot> {
        Ok(self.synth.air_quality())
    }

    // Alerts are not on the free tier; synthesized instead.
    async fn fetch_alerts(&self, _query: &str) -> Result<Vec<WeatherAlert>> {
        Ok(self.synth.alerts())
    }

    async fn fetch_historical(&self, query: &str, date: NaiveDate) -> Result<HistoricalWeather> {
        match self.try_fetch_historical(query, date).await {
            Ok(record) => Ok(record),
            Err(err) => {
                warn!(%err, %date, "historical fetch failed, synthesizing fallback day");
                Ok(self.synth.historical(query, date))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct WsLocation {
    name: String,
    country: String,
    region: String,
    lat: String,
    lon: String,
    localtime: String,
}

impl WsLocation {
    fn normalize(&self) -> Result<LocationInfo> {
        let lat = self.lat.parse::<f64>().map_err(|_| {
            WeatherError::Upstream(format!("provider returned malformed latitude: {}", self.lat))
        })?;
        let lon = self.lon.parse::<f64>().map_err(|_| {
            WeatherError::Upstream(format!("provider returned malformed longitude: {}", self.lon))
        })?;

        Ok(LocationInfo {
            name: self.name.clone(),
            country: self.country.clone(),
            region: self.region.clone(),
            localtime: self.localtime.clone(),
            lat,
            lon,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WsCurrent {
    temperature: f64,
    weather_code: i32,
    weather_descriptions: Vec<String>,
    weather_icons: Vec<String>,
    wind_speed: f64,
    wind_degree: i32,
    wind_dir: String,
    pressure: f64,
    precip: f64,
    humidity: f64,
    cloudcover: f64,
    feelslike: f64,
    uv_index: f64,
    visibility: f64,
    is_day: String,
}

#[derive(Debug, Deserialize)]
struct WsCurrentResponse {
    location: WsLocation,
    current: WsCurrent,
}

impl WsCurrentResponse {
    fn normalize(self) -> Result<CurrentConditions> {
        Ok(CurrentConditions {
            location: self.location.normalize()?,
            temperature_c: self.current.temperature,
            weather_code: self.current.weather_code,
            weather_descriptions: self.current.weather_descriptions,
            weather_icons: self.current.weather_icons,
            wind_speed_kph: self.current.wind_speed,
            wind_degree: self.current.wind_degree,
            wind_dir: self.current.wind_dir,
            pressure_mb: self.current.pressure,
            precip_mm: self.current.precip,
            humidity_pct: self.current.humidity,
            cloudcover_pct: self.current.cloudcover,
            feelslike_c: self.current.feelslike,
            uv_index: self.current.uv_index,
            visibility_km: self.current.visibility,
            is_day: self.current.is_day == "yes",
        })
    }
}

#[derive(Debug, Deserialize)]
struct WsAstro {
    sunrise: String,
    sunset: String,
    moonrise: String,
    moonset: String,
    moon_phase: String,
    moon_illumination: String,
}

#[derive(Debug, Deserialize)]
struct WsHistoricalHour {
    time: String,
    temperature: f64,
    wind_speed: f64,
    wind_degree: i32,
    wind_dir: String,
    weather_code: i32,
    #[serde(default)]
    weather_descriptions: Vec<String>,
    #[serde(default)]
    weather_icons: Vec<String>,
    precip: f64,
    humidity: f64,
    visibility: f64,
    pressure: f64,
    cloudcover: f64,
    heatindex: f64,
    dewpoint: f64,
    windchill: f64,
    windgust: f64,
    feelslike: f64,
}

#[derive(Debug, Deserialize)]
struct WsHistoricalDay {
    astro: WsAstro,
    mintemp: f64,
    maxtemp: f64,
    avgtemp: f64,
    #[serde(default)]
    totalsnow: f64,
    #[serde(default)]
    sunhour: f64,
    #[serde(default)]
    uv_index: f64,
    hourly: Vec<WsHistoricalHour>,
}

impl WsHistoricalDay {
    fn normalize(&self, date: NaiveDate) -> HistoricalDay {
        HistoricalDay {
            date,
            astro: Astro {
                sunrise: self.astro.sunrise.clone(),
                sunset: self.astro.sunset.clone(),
                moonrise: self.astro.moonrise.clone(),
                moonset: self.astro.moonset.clone(),
                moon_phase: self.astro.moon_phase.clone(),
                moon_illumination: self.astro.moon_illumination.clone(),
            },
            mintemp_c: self.mintemp,
            maxtemp_c: self.maxtemp,
            avgtemp_c: self.avgtemp,
            totalsnow_cm: self.totalsnow,
            sunhour: self.sunhour,
            uv_index: self.uv_index,
            hourly: self
                .hourly
                .iter()
                .map(|h| HistoricalHour {
                    time: h.time.clone(),
                    temperature_c: h.temperature,
                    wind_speed_kph: h.wind_speed,
                    wind_degree: h.wind_degree,
                    wind_dir: h.wind_dir.clone(),
                    weather_code: h.weather_code,
                    weather_descriptions: h.weather_descriptions.clone(),
                    weather_icons: h.weather_icons.clone(),
                    precip_mm: h.precip,
                    humidity_pct: h.humidity,
                    visibility_km: h.visibility,
                    pressure_mb: h.pressure,
                    cloudcover_pct: h.cloudcover,
                    heatindex_c: h.heatindex,
                    dewpoint_c: h.dewpoint,
                    windchill_c: h.windchill,
                    windgust_kph: h.windgust,
                    feelslike_c: h.feelslike,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WsHistoricalResponse {
    location: WsLocation,
    historical: HashMap<String, WsHistoricalDay>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

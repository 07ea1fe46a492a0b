use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a resolved place, as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub country: String,
    pub region: String,
    pub localtime: String,
    pub lat: f64,
    pub lon: f64,
}

/// Instantaneous observation for one location. Immutable once fetched;
/// a new search replaces the whole snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: LocationInfo,
    pub temperature_c: f64,
    pub weather_code: i32,
    pub weather_descriptions: Vec<String>,
    pub weather_icons: Vec<String>,
    pub wind_speed_kph: f64,
    pub wind_degree: i32,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub precip_mm: f64,
    pub humidity_pct: f64,
    pub cloudcover_pct: f64,
    pub feelslike_c: f64,
    pub uv_index: f64,
    pub visibility_km: f64,
    pub is_day: bool,
}

/// Textual + coded weather condition with its icon URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastHour {
    pub time: DateTime<Utc>,
    pub temp_c: f64,
    pub condition: Condition,
    pub wind_kph: f64,
    pub precip_mm: f64,
    pub humidity_pct: f64,
    pub chance_of_rain: f64,
}

/// Aggregate metrics for one forecast day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub avgtemp_c: f64,
    pub maxwind_kph: f64,
    pub totalprecip_mm: f64,
    pub avghumidity_pct: f64,
    pub condition: Condition,
    pub uv_index: f64,
}

/// One day of forecast: a summary plus 24 hourly entries.
/// A full forecast is seven of these, index 0 being today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: ForecastDaySummary,
    pub hour: Vec<ForecastHour>,
}

/// Pollutant concentrations plus the two index scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualitySnapshot {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub us_epa_index: u8,
    pub gb_defra_index: u8,
}

/// Provider- or generator-issued advisory. No deduplication across refreshes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub headline: String,
    pub msgtype: String,
    pub severity: String,
    pub urgency: String,
    pub areas: String,
    pub category: String,
    pub certainty: String,
    pub event: String,
    pub note: String,
    pub effective: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub desc: String,
    pub instruction: String,
}

/// Astronomical data for one historical day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    pub moon_illumination: String,
}

/// Observed hourly metrics; carries more fields than a forecast hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalHour {
    pub time: String,
    pub temperature_c: f64,
    pub wind_speed_kph: f64,
    pub wind_degree: i32,
    pub wind_dir: String,
    pub weather_code: i32,
    pub weather_descriptions: Vec<String>,
    pub weather_icons: Vec<String>,
    pub precip_mm: f64,
    pub humidity_pct: f64,
    pub visibility_km: f64,
    pub pressure_mb: f64,
    pub cloudcover_pct: f64,
    pub heatindex_c: f64,
    pub dewpoint_c: f64,
    pub windchill_c: f64,
    pub windgust_kph: f64,
    pub feelslike_c: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalDay {
    pub date: NaiveDate,
    pub astro: Astro,
    pub mintemp_c: f64,
    pub maxtemp_c: f64,
    pub avgtemp_c: f64,
    pub totalsnow_cm: f64,
    pub sunhour: f64,
    pub uv_index: f64,
    pub hourly: Vec<HistoricalHour>,
}

/// One fetched historical record, keyed by the requested date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalWeather {
    pub location: LocationInfo,
    pub day: HistoricalDay,
}

/// Highest / lowest / average over one metric across compared locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub highest: f64,
    pub lowest: f64,
    pub average: f64,
}

/// Side-by-side current conditions (at most five) with aggregate stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub locations: Vec<CurrentConditions>,
    pub temperature: MetricStats,
    pub humidity: MetricStats,
    pub wind: MetricStats,
}

/// Everything one dashboard refresh produced. Current conditions is the
/// only required facet; the rest are absent when their fetch failed.
#[derive(Debug, Clone)]
pub struct RefreshResult {
    pub current: CurrentConditions,
    pub forecast: Option<Vec<ForecastDay>>,
    pub air_quality: Option<AirQualitySnapshot>,
    pub alerts: Option<Vec<WeatherAlert>>,
}

/// A location the user saved for quick recall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLocation {
    pub id: String,
    pub name: String,
    pub query: String,
    pub country: String,
    pub added_at: DateTime<Utc>,
}

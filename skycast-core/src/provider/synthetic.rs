//! Placeholder data for facets the provider's free tier does not cover.
//!
//! Values are random but bounded so the dashboard is always exercisable.
//! A fixed seed makes the output reproducible, which is what tests use
//! instead of asserting on ranges alone.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::model::{
    AirQualitySnapshot, Astro, Condition, ForecastDay, ForecastDaySummary, ForecastHour,
    HistoricalDay, HistoricalHour, HistoricalWeather, LocationInfo, WeatherAlert,
};

/// Fixed condition set used for synthesized entries. Codes line up with
/// the icon classifier's sun/cloud/rain groups.
const CONDITIONS: [(&str, i32); 4] =
    [("Sunny", 1000), ("Partly cloudy", 1003), ("Cloudy", 1006), ("Light rain", 1183)];

const CONDITION_ICON: &str = "//cdn.weatherapi.com/weather/64x64/day/116.png";

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    seed: Option<u64>,
}

impl SyntheticGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Seven days, 24 hourly entries each, starting today.
    pub fn forecast(&self) -> Vec<ForecastDay> {
        let mut rng = self.rng();
        let today = Utc::now().date_naive();

        (0..7)
            .map(|offset| {
                let date = today + Duration::days(offset);
                let day = ForecastDaySummary {
                    maxtemp_c: rng.random_range(20..=35) as f64,
                    mintemp_c: rng.random_range(10..=20) as f64,
                    avgtemp_c: rng.random_range(15..=25) as f64,
                    maxwind_kph: rng.random_range(10..=30) as f64,
                    totalprecip_mm: rng.random_range(0..=5) as f64,
                    avghumidity_pct: rng.random_range(50..=80) as f64,
                    condition: pick_condition(&mut rng),
                    uv_index: rng.random_range(0..=10) as f64,
                };

                let hour = (0..24)
                    .map(|h| ForecastHour {
                        time: date.and_time(NaiveTime::MIN).and_utc() + Duration::hours(h),
                        temp_c: rng.random_range(10..=25) as f64,
                        condition: pick_condition(&mut rng),
                        wind_kph: rng.random_range(10..=30) as f64,
                        precip_mm: rng.random_range(0..=5) as f64,
                        humidity_pct: rng.random_range(50..=80) as f64,
                        chance_of_rain: rng.random_range(0..=100) as f64,
                    })
                    .collect();

                ForecastDay { date, day, hour }
            })
            .collect()
    }

    /// Pollutant snapshot within provider-plausible ranges.
    pub fn air_quality(&self) -> AirQualitySnapshot {
        let mut rng = self.rng();
        AirQualitySnapshot {
            co: rng.random_range(200..=500) as f64,
            no2: rng.random_range(10..=50) as f64,
            o3: rng.random_range(50..=150) as f64,
            so2: rng.random_range(5..=20) as f64,
            pm2_5: rng.random_range(5..=30) as f64,
            pm10: rng.random_range(10..=50) as f64,
            us_epa_index: rng.random_range(1..=5),
            gb_defra_index: rng.random_range(1..=5),
        }
    }

    /// Two advisory templates, each kept with probability 0.7, stamped
    /// relative to call time.
    pub fn alerts(&self) -> Vec<WeatherAlert> {
        let mut rng = self.rng();
        let now = Utc::now();

        let templates = [
            WeatherAlert {
                headline: "Heat Wave Warning".to_string(),
                msgtype: "Alert".to_string(),
                severity: "Moderate".to_string(),
                urgency: "Expected".to_string(),
                areas: "Metropolitan Area".to_string(),
                category: "Met".to_string(),
                certainty: "Likely".to_string(),
                event: "Excessive Heat Warning".to_string(),
                note: "Temperatures expected to reach 35°C+ for the next 3 days".to_string(),
                effective: now,
                expires: now + Duration::days(3),
                desc: "An Excessive Heat Warning means that a prolonged period of dangerously \
                       hot temperatures will occur."
                    .to_string(),
                instruction: "Drink plenty of fluids, stay in an air-conditioned room, stay out \
                              of the sun, and check up on relatives and neighbors."
                    .to_string(),
            },
            WeatherAlert {
                headline: "Thunderstorm Watch".to_string(),
                msgtype: "Alert".to_string(),
                severity: "Minor".to_string(),
                urgency: "Future".to_string(),
                areas: "Regional Area".to_string(),
                category: "Met".to_string(),
                certainty: "Possible".to_string(),
                event: "Thunderstorm Watch".to_string(),
                note: "Conditions favorable for severe thunderstorms this evening".to_string(),
                effective: now + Duration::hours(6),
                expires: now + Duration::hours(12),
                desc: "A Thunderstorm Watch means conditions are favorable for thunderstorm \
                       development."
                    .to_string(),
                instruction: "Stay indoors and avoid outdoor activities during thunderstorms."
                    .to_string(),
            },
        ];

        templates.into_iter().filter(|_| rng.random_bool(0.7)).collect()
    }

    /// Single-day fallback record when the real historical call fails.
    pub fn historical(&self, query: &str, date: NaiveDate) -> HistoricalWeather {
        let mut rng = self.rng();

        let hourly = (0..24)
            .map(|h| {
                let wind_degree = rng.random_range(0..360);
                HistoricalHour {
                    time: format!("{h:02}00"),
                    temperature_c: rng.random_range(10..=20) as f64,
                    wind_speed_kph: rng.random_range(5..=20) as f64,
                    wind_degree,
                    wind_dir: compass_dir(wind_degree).to_string(),
                    weather_code: [1000, 1003, 1006, 1009][rng.random_range(0..4)],
                    weather_descriptions: vec![pick_condition(&mut rng).text],
                    weather_icons: vec![CONDITION_ICON.to_string()],
                    precip_mm: rng.random_range(0..=5) as f64,
                    humidity_pct: rng.random_range(50..=80) as f64,
                    visibility_km: rng.random_range(8..=15) as f64,
                    pressure_mb: rng.random_range(1010..=1030) as f64,
                    cloudcover_pct: rng.random_range(0..=100) as f64,
                    heatindex_c: rng.random_range(12..=20) as f64,
                    dewpoint_c: rng.random_range(5..=15) as f64,
                    windchill_c: rng.random_range(8..=13) as f64,
                    windgust_kph: rng.random_range(10..=30) as f64,
                    feelslike_c: rng.random_range(11..=19) as f64,
                }
            })
            .collect();

        HistoricalWeather {
            location: LocationInfo {
                name: query.to_string(),
                country: String::new(),
                region: String::new(),
                localtime: format!("{date} 12:00"),
                lat: 0.0,
                lon: 0.0,
            },
            day: HistoricalDay {
                date,
                astro: Astro {
                    sunrise: "06:42 AM".to_string(),
                    sunset: "07:18 PM".to_string(),
                    moonrise: "11:47 PM".to_string(),
                    moonset: "09:54 AM".to_string(),
                    moon_phase: "Waxing Crescent".to_string(),
                    moon_illumination: "23".to_string(),
                },
                mintemp_c: rng.random_range(8..=13) as f64,
                maxtemp_c: rng.random_range(18..=26) as f64,
                avgtemp_c: rng.random_range(13..=18) as f64,
                totalsnow_cm: 0.0,
                sunhour: rng.random_range(4..=10) as f64,
                uv_index: rng.random_range(3..=7) as f64,
                hourly,
            },
        }
    }
}

fn pick_condition(rng: &mut StdRng) -> Condition {
    let (text, code) = CONDITIONS[rng.random_range(0..CONDITIONS.len())];
    Condition { text: text.to_string(), icon: CONDITION_ICON.to_string(), code }
}

fn compass_dir(degree: i32) -> &'static str {
    let sector = ((degree.rem_euclid(360) + 22) / 45) as usize % COMPASS.len();
    COMPASS[sector]
}

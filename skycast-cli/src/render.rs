//! Plain-text rendering for each dashboard facet.

use skycast_core::derive::{
    alert_variant, classify_air_quality, classify_icon, estimate_rain_chance,
};
use skycast_core::model::{
    AirQualitySnapshot, ComparisonResult, CurrentConditions, ForecastDay, HistoricalWeather,
    MetricStats, RefreshResult, SavedLocation, WeatherAlert,
};

/// Full refresh: current conditions plus whichever facets succeeded.
pub fn dashboard(result: &RefreshResult) {
    current(&result.current);

    if let Some(alerts) = &result.alerts {
        if !alerts.is_empty() {
            println!();
            alert_banners(alerts);
        }
    }

    if let Some(air) = &result.air_quality {
        println!();
        air_quality(air);
    }

    if let Some(days) = &result.forecast {
        println!();
        forecast_strip(days);
    }
}

pub fn current(conditions: &CurrentConditions) {
    let loc = &conditions.location;
    let icon = classify_icon(conditions.weather_code, conditions.is_day);
    let description = conditions.weather_descriptions.first().map_or("Unknown", |d| d.as_str());
    let rain = estimate_rain_chance(conditions.precip_mm, conditions.humidity_pct);

    println!("{} {}, {} ({})", icon.glyph(), loc.name, loc.country, loc.region);
    println!("  local time     {}", loc.localtime);
    println!(
        "  {description}, {:.0}°C (feels like {:.0}°C)",
        conditions.temperature_c, conditions.feelslike_c
    );
    println!(
        "  wind           {:.0} km/h {} ({}°)",
        conditions.wind_speed_kph, conditions.wind_dir, conditions.wind_degree
    );
    println!(
        "  humidity {:.0}%  pressure {:.0} mb  cloud {:.0}%  visibility {:.0} km  UV {:.0}",
        conditions.humidity_pct,
        conditions.pressure_mb,
        conditions.cloudcover_pct,
        conditions.visibility_km,
        conditions.uv_index
    );
    println!("  precipitation  {:.1} mm, rain chance {rain:.0}%", conditions.precip_mm);
}

pub fn air_quality(air: &AirQualitySnapshot) {
    let band = classify_air_quality(i32::from(air.us_epa_index));
    println!("Air quality: {} — {}", band.level, band.description);
    println!(
        "  CO {:.0}  NO2 {:.0}  O3 {:.0}  SO2 {:.0}  PM2.5 {:.0}  PM10 {:.0}",
        air.co, air.no2, air.o3, air.so2, air.pm2_5, air.pm10
    );
    println!("  US EPA index {}  UK DEFRA index {}", air.us_epa_index, air.gb_defra_index);
}

pub fn alert_banners(alerts: &[WeatherAlert]) {
    println!("Active alerts:");
    for alert in alerts {
        let variant = alert_variant(&alert.severity);
        println!("  [{}] {} — {}", variant.label(), alert.headline, alert.event);
        println!("      {} / {} / {}", alert.severity, alert.urgency, alert.areas);
        println!("      {} → {}", alert.effective, alert.expires);
        println!("      {}", alert.note);
    }
}

/// One line per forecast day.
pub fn forecast_strip(days: &[ForecastDay]) {
    println!("Forecast:");
    for day in days {
        let icon = classify_icon(day.day.condition.code, true);
        println!(
            "  {} {} {:>2.0}/{:<2.0}°C  {}  precip {:.0} mm  humidity {:.0}%  UV {:.0}",
            day.date.format("%a %d %b"),
            icon.glyph(),
            day.day.maxtemp_c,
            day.day.mintemp_c,
            day.day.condition.text,
            day.day.totalprecip_mm,
            day.day.avghumidity_pct,
            day.day.uv_index,
        );
    }
}

/// Daily strip plus hourly detail for the first rendered day.
pub fn forecast(days: &[ForecastDay], limit: usize) {
    forecast_strip(&days[..limit.min(days.len())]);

    if let Some(today) = days.first() {
        println!();
        println!("Hourly for {}:", today.date);
        for hour in &today.hour {
            let rain = estimate_rain_chance(hour.precip_mm, hour.humidity_pct);
            println!(
                "  {}  {:>2.0}°C  {}  wind {:.0} km/h  rain {:.0}%",
                hour.time.format("%H:%M"),
                hour.temp_c,
                hour.condition.text,
                hour.wind_kph,
                rain,
            );
        }
    }
}

pub fn historical(record: &HistoricalWeather) {
    let loc = &record.location;
    let day = &record.day;

    println!("{} {} — {}", loc.name, loc.country, day.date);
    println!(
        "  temp {:.0}/{:.0}°C (avg {:.0}°C)  sun {:.1} h  UV {:.0}",
        day.maxtemp_c, day.mintemp_c, day.avgtemp_c, day.sunhour, day.uv_index
    );
    println!(
        "  sunrise {}  sunset {}  moon {} ({}%)",
        day.astro.sunrise, day.astro.sunset, day.astro.moon_phase, day.astro.moon_illumination
    );

    println!();
    println!("Hourly:");
    for hour in &day.hourly {
        println!(
            "  {}  {:>2.0}°C (feels {:.0}°C)  wind {:.0} km/h {}  gust {:.0}  humidity {:.0}%",
            hour.time,
            hour.temperature_c,
            hour.feelslike_c,
            hour.wind_speed_kph,
            hour.wind_dir,
            hour.windgust_kph,
            hour.humidity_pct,
        );
    }
}

pub fn comparison(result: &ComparisonResult) {
    println!("{:<24} {:>8} {:>10} {:>10}", "Location", "Temp °C", "Humidity %", "Wind km/h");
    for current in &result.locations {
        println!(
            "{:<24} {:>8.0} {:>10.0} {:>10.0}",
            format!("{}, {}", current.location.name, current.location.country),
            current.temperature_c,
            current.humidity_pct,
            current.wind_speed_kph,
        );
    }

    println!();
    stats_line("temperature", &result.temperature);
    stats_line("humidity", &result.humidity);
    stats_line("wind", &result.wind);
}

fn stats_line(name: &str, stats: &MetricStats) {
    println!(
        "  {name:<12} highest {:.0}  lowest {:.0}  average {:.0}",
        stats.highest, stats.lowest, stats.average
    );
}

pub fn favorites(locations: &[SavedLocation]) {
    if locations.is_empty() {
        println!("No saved locations");
        return;
    }

    for location in locations {
        println!(
            "{}  {} ({})  query '{}'  added {}",
            location.id,
            location.name,
            location.country,
            location.query,
            location.added_at.format("%Y-%m-%d %H:%M"),
        );
    }
}

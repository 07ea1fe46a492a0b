//! Pure derivation functions applied to fetched data at presentation time.
//!
//! These are heuristics with exact output contracts, not provider values;
//! callers elsewhere rely on the precise boundary behavior tested below.

/// Icon category for a coded weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Sun,
    Moon,
    Cloud,
    Rain,
    Snow,
    Thunder,
}

impl IconKind {
    /// Terminal glyph used by the CLI renderer.
    pub fn glyph(self) -> &'static str {
        match self {
            IconKind::Sun => "☀",
            IconKind::Moon => "☾",
            IconKind::Cloud => "☁",
            IconKind::Rain => "☂",
            IconKind::Snow => "❄",
            IconKind::Thunder => "⚡",
        }
    }
}

/// Map a provider condition code to an icon category.
/// Unknown codes fall back to sun; that is not an error.
pub fn classify_icon(code: i32, is_day: bool) -> IconKind {
    match code {
        1000 => {
            if is_day {
                IconKind::Sun
            } else {
                IconKind::Moon
            }
        }
        1003 | 1006 | 1009 => IconKind::Cloud,
        1063 | 1180 | 1183 | 1186 | 1189 | 1192 | 1195 => IconKind::Rain,
        1066 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 => IconKind::Snow,
        1087 | 1273 | 1276 | 1279 | 1282 => IconKind::Thunder,
        _ => IconKind::Sun,
    }
}

/// Named air-quality band with a short description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQualityBand {
    pub level: &'static str,
    pub description: &'static str,
}

/// Bucket an air-quality index. Bands are exhaustive and non-overlapping;
/// boundary values belong to the lower band.
pub fn classify_air_quality(index: i32) -> AirQualityBand {
    if index <= 50 {
        AirQualityBand { level: "Good", description: "Air quality is satisfactory" }
    } else if index <= 100 {
        AirQualityBand { level: "Moderate", description: "Air quality is acceptable" }
    } else if index <= 150 {
        AirQualityBand {
            level: "Unhealthy for Sensitive Groups",
            description: "Sensitive people may experience symptoms",
        }
    } else if index <= 200 {
        AirQualityBand { level: "Unhealthy", description: "Everyone may experience symptoms" }
    } else {
        AirQualityBand { level: "Very Unhealthy", description: "Health alert for everyone" }
    }
}

/// Estimate the chance of rain in percent, clamped to [0, 90].
pub fn estimate_rain_chance(precip_mm: f64, humidity_pct: f64) -> f64 {
    if precip_mm > 0.0 {
        (precip_mm * 10.0 + humidity_pct * 0.5).min(90.0)
    } else {
        ((humidity_pct - 60.0) * 2.0).max(0.0)
    }
}

/// Presentation variant for an alert severity string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Destructive,
    Warning,
    Info,
    Default,
}

impl AlertVariant {
    pub fn label(self) -> &'static str {
        match self {
            AlertVariant::Destructive => "destructive",
            AlertVariant::Warning => "warning",
            AlertVariant::Info => "info",
            AlertVariant::Default => "default",
        }
    }
}

/// Map a free-text severity to its presentation variant, case-insensitively.
pub fn alert_variant(severity: &str) -> AlertVariant {
    match severity.to_lowercase().as_str() {
        "severe" => AlertVariant::Destructive,
        "moderate" => AlertVariant::Warning,
        "minor" => AlertVariant::Info,
        _ => AlertVariant::Default,
    }
}

//! Converters: units, Unix timestamps and color codes

use super::ToolInput;
use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

/// A family of convertible units with factors relative to a base unit
#[derive(Debug)]
pub struct UnitKind {
    pub id: &'static str,
    pub name: &'static str,
    /// (unit id, display name, factor). Temperature factors are unused.
    pub units: &'static [(&'static str, &'static str, f64)],
}

pub const UNIT_KINDS: &[UnitKind] = &[
    UnitKind {
        id: "length",
        name: "Length",
        units: &[
            ("meter", "Meter", 1.0),
            ("kilometer", "Kilometer", 1000.0),
            ("centimeter", "Centimeter", 0.01),
            ("millimeter", "Millimeter", 0.001),
            ("inch", "Inch", 0.0254),
            ("foot", "Foot", 0.3048),
            ("yard", "Yard", 0.9144),
            ("mile", "Mile", 1609.344),
        ],
    },
    UnitKind {
        id: "weight",
        name: "Weight",
        units: &[
            ("kilogram", "Kilogram", 1.0),
            ("gram", "Gram", 0.001),
            ("pound", "Pound", 0.453592),
            ("ounce", "Ounce", 0.0283495),
            ("ton", "Ton", 1000.0),
        ],
    },
    UnitKind {
        id: "temperature",
        name: "Temperature",
        units: &[
            ("celsius", "Celsius", 1.0),
            ("fahrenheit", "Fahrenheit", 1.0),
            ("kelvin", "Kelvin", 1.0),
        ],
    },
    UnitKind {
        id: "volume",
        name: "Volume",
        units: &[
            ("liter", "Liter", 1.0),
            ("milliliter", "Milliliter", 0.001),
            ("gallon", "Gallon (US)", 3.78541),
            ("quart", "Quart", 0.946353),
            ("cup", "Cup", 0.236588),
            ("fluid_ounce", "Fluid Ounce", 0.0295735),
        ],
    },
];

fn convert_temperature(value: f64, from: &str, to: &str) -> f64 {
    let celsius = match from {
        "fahrenheit" => (value - 32.0) * 5.0 / 9.0,
        "kelvin" => value - 273.15,
        _ => value,
    };
    match to {
        "fahrenheit" => celsius * 9.0 / 5.0 + 32.0,
        "kelvin" => celsius + 273.15,
        _ => celsius,
    }
}

/// Convert `value` between two units of the same kind
pub fn convert(kind_id: &str, value: f64, from: &str, to: &str) -> Result<f64> {
    let kind = UNIT_KINDS
        .iter()
        .find(|k| k.id == kind_id)
        .ok_or_else(|| anyhow!("Unknown unit kind: {}", kind_id))?;

    let factor = |unit: &str| {
        kind.units
            .iter()
            .find(|(id, _, _)| *id == unit)
            .map(|(_, _, factor)| *factor)
            .ok_or_else(|| anyhow!("Unknown {} unit: {}", kind.id, unit))
    };
    let from_factor = factor(from)?;
    let to_factor = factor(to)?;

    if kind.id == "temperature" {
        return Ok(convert_temperature(value, from, to));
    }
    Ok(value * from_factor / to_factor)
}

pub fn convert_units(input: &ToolInput) -> Result<String> {
    let kind_ids: Vec<&str> = UNIT_KINDS.iter().map(|k| k.id).collect();
    let kind_id = input.choice("kind", &kind_ids, "length")?;
    let kind = UNIT_KINDS
        .iter()
        .find(|k| k.id == kind_id)
        .ok_or_else(|| anyhow!("Unknown unit kind: {}", kind_id))?;

    let from = input.option("from").unwrap_or(kind.units[0].0);
    let to = input
        .option("to")
        .unwrap_or(kind.units.get(1).unwrap_or(&kind.units[0]).0);

    let raw = input.text.trim();
    let value: f64 = raw
        .parse()
        .map_err(|_| anyhow!("Not a number: '{}'", raw))?;

    let result = convert(kind.id, value, from, to)?;
    Ok(format!("{} {} = {} {}", value, from, result, to))
}

fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let plural = |n: i64| if n > 1 { "s" } else { "" };
    if days > 0 {
        format!("{} day{} ago", days, plural(days))
    } else if hours > 0 {
        format!("{} hour{} ago", hours, plural(hours))
    } else if minutes > 0 {
        format!("{} minute{} ago", minutes, plural(minutes))
    } else {
        format!("{} second{} ago", seconds, plural(seconds))
    }
}

/// Parse a human date: RFC 3339, or the `YYYY-MM-DDTHH:MM` form of a
/// datetime-local field (interpreted as UTC)
fn parse_human_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    bail!("Unrecognized date: '{}'", raw)
}

/// Unix seconds to dates, or a date to Unix seconds, depending on the input
pub fn convert_timestamp(input: &ToolInput, now: DateTime<Utc>) -> Result<String> {
    let raw = input.text.trim();
    if raw.is_empty() {
        return Ok(now.timestamp().to_string());
    }

    if let Ok(seconds) = raw.parse::<i64>() {
        let date = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| anyhow!("Timestamp out of range: {}", seconds))?;
        return Ok(format!(
            "ISO: {}\nUTC: {}\nRelative: {}",
            date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            date.to_rfc2822(),
            relative_time(date, now)
        ));
    }

    let date = parse_human_date(raw)?;
    Ok(date.timestamp().to_string())
}

/// An RGB triple parsed from a hex color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn from_hex(hex: &str) -> Result<Self> {
        let re = Regex::new(r"(?i)^#?([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})$")
            .context("Failed to compile hex color regex")?;
        let caps = re
            .captures(hex.trim())
            .ok_or_else(|| anyhow!("Invalid hex color: '{}'", hex.trim()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&caps[i], 16).with_context(|| format!("Invalid hex channel: {}", &caps[i]))
        };
        Ok(Self {
            r: channel(1)?,
            g: channel(2)?,
            b: channel(3)?,
        })
    }

    /// (hue degrees, saturation %, lightness %), each rounded
    pub fn to_hsl(self) -> (u32, u32, u32) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let (h, s) = if max == min {
            (0.0, 0.0)
        } else {
            let d = max - min;
            let s = if l > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            let h = if max == r {
                (g - b) / d + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / d + 2.0
            } else {
                (r - g) / d + 4.0
            };
            (h / 6.0, s)
        };

        (
            (h * 360.0).round() as u32,
            (s * 100.0).round() as u32,
            (l * 100.0).round() as u32,
        )
    }
}

pub fn color_formats(input: &ToolInput) -> Result<String> {
    let rgb = Rgb::from_hex(&input.text)?;
    let (h, s, l) = rgb.to_hsl();
    Ok(format!(
        "HEX: #{:02X}{:02X}{:02X}\nRGB: rgb({}, {}, {})\nHSL: hsl({}, {}%, {}%)",
        rgb.r, rgb.g, rgb.b, rgb.r, rgb.g, rgb.b, h, s, l
    ))
}

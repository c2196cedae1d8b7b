//! Display helpers for screener tables.

use std::fmt;

/// Compact share count: `1.3M`, `850.0K` or the plain integer.
pub fn format_volume(volume: u64) -> String {
    if volume >= 1_000_000 {
        return format!("{:.1}M", volume as f64 / 1_000_000.0);
    }
    if volume >= 1_000 {
        return format!("{:.1}K", volume as f64 / 1_000.0);
    }
    volume.to_string()
}

/// Fixed-decimal number with `,` thousands separators, e.g. `1,250.50`.
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Direction of the premarket gap, used to color the gap badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapDirection {
    /// Premarket above the previous close.
    Up,
    /// Premarket below the previous close.
    Down,
    /// Unchanged.
    Flat,
}

impl GapDirection {
    /// Classify a signed gap percentage.
    pub fn from_gap(gap_percent: f64) -> Self {
        if gap_percent > 0.0 {
            GapDirection::Up
        } else if gap_percent < 0.0 {
            GapDirection::Down
        } else {
            GapDirection::Flat
        }
    }
}

impl fmt::Display for GapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self {
            GapDirection::Up => "▲",
            GapDirection::Down => "▼",
            GapDirection::Flat => "•",
        };
        f.write_str(arrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(1_260_000), "1.3M");
        assert_eq!(format_volume(1_000_000), "1.0M");
        assert_eq!(format_volume(850_000), "850.0K");
        assert_eq!(format_volume(1_000), "1.0K");
        assert_eq!(format_volume(999), "999");
        assert_eq!(format_volume(0), "0");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1250.5, 2), "1,250.50");
        assert_eq!(format_number(125.5, 2), "125.50");
        assert_eq!(format_number(1_234_567.891, 1), "1,234,567.9");
        assert_eq!(format_number(-0.9, 2), "-0.90");
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_number(42.0, 0), "42");
    }

    #[test]
    fn test_gap_direction() {
        assert_eq!(GapDirection::from_gap(3.78), GapDirection::Up);
        assert_eq!(GapDirection::from_gap(-0.9), GapDirection::Down);
        assert_eq!(GapDirection::from_gap(0.0), GapDirection::Flat);
    }
}

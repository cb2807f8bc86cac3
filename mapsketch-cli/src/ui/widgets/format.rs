//! Text formatting for sidebar and title lines.

/// Format latitude with hemisphere suffix.
pub fn format_lat(lat: f64) -> String {
    let dir = if lat >= 0.0 { "N" } else { "S" };
    format!("{:.5}°{}", lat.abs(), dir)
}

/// Format longitude with hemisphere suffix.
pub fn format_lng(lng: f64) -> String {
    let dir = if lng >= 0.0 { "E" } else { "W" };
    format!("{:.5}°{}", lng.abs(), dir)
}

/// Shorten `text` to at most `max` characters, ending in `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

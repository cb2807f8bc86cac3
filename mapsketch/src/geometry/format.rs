//! Area formatting for display.

/// Formats an area in square metres with thousands separators.
///
/// # Examples
/// ```
/// use mapsketch::geometry::format_area;
///
/// assert_eq!(format_area(0.0), "0 m²");
/// assert_eq!(format_area(1234567.0), "1,234,567 m²");
/// ```
pub fn format_area(area_m2: f64) -> String {
    let whole = area_m2.round().max(0.0) as u64;
    let digits = whole.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{} m²", grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_have_no_separator() {
        assert_eq!(format_area(999.0), "999 m²");
    }

    #[test]
    fn test_groups_of_three() {
        assert_eq!(format_area(1000.0), "1,000 m²");
        assert_eq!(format_area(12_364_000_000.0), "12,364,000,000 m²");
    }

    #[test]
    fn test_rounds_fractional_metres() {
        assert_eq!(format_area(1499.6), "1,500 m²");
    }
}

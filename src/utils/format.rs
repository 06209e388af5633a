// ============================================================================
// FORMAT - Presentation helpers shared by the views
// ============================================================================

use chrono::{DateTime, NaiveDateTime};

use crate::utils::constants::KRW_PER_1000_TOKENS;

/// `1234567` -> `"1,234,567"`
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rough KRW estimate for a token count
pub fn token_to_cost(tokens: u64) -> String {
    if tokens == 0 {
        return "0".to_string();
    }
    let cost = tokens as f64 / 1000.0 * KRW_PER_1000_TOKENS;
    if cost < 1.0 {
        return "1원 미만".to_string();
    }
    format!("약 {}원", format_number(cost.round() as u64))
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["B", "KB", "MB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

/// Parse the timestamps the backend emits (RFC 3339 or a bare `LocalDateTime`)
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

/// `2024-03-05T14:07:00` -> `"2024.03.05 14:07"`; unparseable input is shown as-is
pub fn format_date(raw: Option<&str>) -> String {
    match raw {
        None | Some("") => "-".to_string(),
        Some(value) => parse_timestamp(value)
            .map(|dt| dt.format("%Y.%m.%d %H:%M").to_string())
            .unwrap_or_else(|| value.to_string()),
    }
}

pub fn operation_label(operation_type: &str) -> &str {
    match operation_type {
        "GENERATION" => "문서 생성",
        "SUMMARIZATION" => "문서 요약",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn cost_estimate() {
        assert_eq!(token_to_cost(0), "0");
        assert_eq!(token_to_cost(100), "1원 미만");
        assert_eq!(token_to_cost(1000), "약 7원");
        assert_eq!(token_to_cost(1_000_000), "약 7,000원");
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    }

    #[test]
    fn dates() {
        assert_eq!(format_date(None), "-");
        assert_eq!(format_date(Some("2024-03-05T14:07:00")), "2024.03.05 14:07");
        assert_eq!(format_date(Some("2024-03-05T14:07:00.123")), "2024.03.05 14:07");
        assert_eq!(format_date(Some("not a date")), "not a date");
    }

    #[test]
    fn labels() {
        assert_eq!(operation_label("GENERATION"), "문서 생성");
        assert_eq!(operation_label("OTHER"), "OTHER");
    }
}

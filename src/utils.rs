// src/utils.rs

/// Normalize a salary string into thousands.
///
/// Accepts plain numbers (`"150"`), raw amounts (`"$120,000"`), ranges
/// (`"$120,000 - $150,000"`) and `k` suffixes (`"90k"`). Ranges resolve to
/// their lower bound.
pub fn parse_salary_text(text: &str) -> Option<u32> {
    let mut digits = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c == ',' && !digits.is_empty() {
            // thousands separator
            continue;
        } else if !digits.is_empty() {
            let in_thousands = matches!(c, 'k' | 'K');
            return amount_to_thousands(&digits, in_thousands);
        }
    }

    if digits.is_empty() {
        None
    } else {
        amount_to_thousands(&digits, false)
    }
}

/// Normalize a numeric salary into thousands.
pub fn normalize_salary_amount(amount: f64) -> Option<u32> {
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }
    let thousands = if amount >= 1000.0 {
        amount / 1000.0
    } else {
        amount
    };
    Some(thousands.round() as u32)
}

fn amount_to_thousands(digits: &str, in_thousands: bool) -> Option<u32> {
    let value: u64 = digits.parse().ok()?;
    let thousands = if in_thousands || value < 1000 {
        value
    } else {
        value / 1000
    };
    u32::try_from(thousands).ok()
}

/// Format a salary in thousands for display.
pub fn format_salary(salary: Option<u32>) -> String {
    match salary {
        Some(k) => format!("${}k", k),
        None => "Salary not disclosed".to_string(),
    }
}

/// Truncate a description for list cards.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Local part of an email, used as the default display name.
pub fn name_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_salary_text() {
        assert_eq!(parse_salary_text("$120,000 - $150,000"), Some(120));
        assert_eq!(parse_salary_text("$90,000 - $110,000"), Some(90));
        assert_eq!(parse_salary_text("150"), Some(150));
        assert_eq!(parse_salary_text("90k"), Some(90));
        assert_eq!(parse_salary_text("up to 75K per year"), Some(75));
        assert_eq!(parse_salary_text("competitive"), None);
        assert_eq!(parse_salary_text(""), None);
    }

    #[test]
    fn test_normalize_salary_amount() {
        assert_eq!(normalize_salary_amount(150.0), Some(150));
        assert_eq!(normalize_salary_amount(120_000.0), Some(120));
        assert_eq!(normalize_salary_amount(-5.0), None);
        assert_eq!(normalize_salary_amount(f64::NAN), None);
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(Some(150)), "$150k");
        assert_eq!(format_salary(None), "Salary not disclosed");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 80), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("abc", 3), "abc");
    }

    #[test]
    fn test_name_from_email() {
        assert_eq!(name_from_email("jane.doe@example.com"), "jane.doe");
        assert_eq!(name_from_email("nobody"), "nobody");
    }
}

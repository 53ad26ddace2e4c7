use chrono::NaiveDate;

pub const PLACEHOLDER: &str = "N/A";

/// `Sep 1, 2021`
pub fn short_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `September 1, 2021`
pub fn long_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}

/// `22 years`, or the placeholder when the age is unknown.
pub fn age(years: Option<u32>) -> String {
    years
        .map(|years| format!("{years} years"))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates() {
        let date = NaiveDate::from_ymd_opt(2021, 9, 1);
        assert_eq!(short_date(date), "Sep 1, 2021");
        assert_eq!(long_date(date), "September 1, 2021");
        assert_eq!(short_date(None), "N/A");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(or_placeholder(""), "N/A");
        assert_eq!(or_placeholder("History"), "History");
        assert_eq!(age(Some(22)), "22 years");
        assert_eq!(age(None), "N/A");
    }
}

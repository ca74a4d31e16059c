use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unsupported locale: {0:?}")]
    UnsupportedLocale(String),
    #[error("month {0} is out of range (1-12)")]
    MonthOutOfRange(u32),
}

const PT_MONTHS: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

fn month_table(locale: Locale) -> &'static [&'static str; 12] {
    match locale {
        Locale::Pt => &PT_MONTHS,
        Locale::En => &EN_MONTHS,
    }
}

pub fn month_name(month: u32, locale: Locale) -> Result<&'static str, FormatError> {
    match month {
        1..=12 => Ok(month_table(locale)[(month - 1) as usize]),
        m => Err(FormatError::MonthOutOfRange(m)),
    }
}

/// Formats a (year, month, day) triple. The day is not checked against the
/// month length, only the month is.
pub fn format_ymd(year: i32, month: u32, day: u32, locale: Locale) -> Result<String, FormatError> {
    let name = month_name(month, locale)?;
    let formatted = match locale {
        Locale::En => format!("{} {}, {}", name, day, year),
        Locale::Pt => format!("{} de {}, {}", day, name.to_lowercase(), year),
    };
    Ok(formatted)
}

pub fn format_date(date: &NaiveDate, locale: Locale) -> String {
    // chrono guarantees month() is 1-12
    format_ymd(date.year(), date.month(), date.day(), locale)
        .unwrap_or_else(|_| date.format("%Y-%m-%d").to_string())
}

/// String-level entry point for callers holding a raw locale code. Unknown
/// codes are an error, they do not fall back to the default locale.
pub fn format_date_code(date: &NaiveDate, locale_code: &str) -> Result<String, FormatError> {
    let locale = Locale::from_code(locale_code)
        .map_err(|_| FormatError::UnsupportedLocale(locale_code.to_string()))?;
    Ok(format_date(date, locale))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_english() {
        assert_eq!(format_date(&date(2024, 1, 5), Locale::En), "January 5, 2024");
        assert_eq!(format_date(&date(2023, 12, 31), Locale::En), "December 31, 2023");
    }

    #[test]
    fn test_portuguese() {
        assert_eq!(format_date(&date(2024, 1, 5), Locale::Pt), "5 de janeiro, 2024");
        assert_eq!(format_date(&date(2022, 3, 18), Locale::Pt), "18 de março, 2022");
    }

    #[test]
    fn test_every_month_matches_pattern() {
        for m in 1..=12 {
            let d = date(2021, m, 9);
            let en = format_date(&d, Locale::En);
            let pt = format_date(&d, Locale::Pt);

            let en_month = en.split(' ').next().unwrap();
            assert!(en_month.chars().next().unwrap().is_uppercase(), "{}", en);
            assert!(en.ends_with(" 9, 2021"), "{}", en);

            assert!(pt.starts_with("9 de "), "{}", pt);
            assert!(pt.ends_with(", 2021"), "{}", pt);
            let pt_month = &pt["9 de ".len()..pt.len() - ", 2021".len()];
            assert_eq!(pt_month, pt_month.to_lowercase());
        }
    }

    #[test]
    fn test_month_out_of_range() {
        assert_eq!(format_ymd(2024, 0, 1, Locale::En), Err(FormatError::MonthOutOfRange(0)));
        assert_eq!(format_ymd(2024, 13, 1, Locale::Pt), Err(FormatError::MonthOutOfRange(13)));
    }

    #[test]
    fn test_locale_code() {
        assert_eq!(format_date_code(&date(2024, 1, 5), "pt"), Ok("5 de janeiro, 2024".to_string()));
        assert_eq!(format_date_code(&date(2024, 1, 5), "de"),
                   Err(FormatError::UnsupportedLocale("de".to_string())));
    }
}

use std::str::FromStr;

use chrono::{NaiveDate, ParseError};
use serde::Deserialize;

/// A TOML local date (`2024-01-05`) or the date part of a TOML datetime.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TomlDate(pub NaiveDate);

impl<'de> Deserialize<'de> for TomlDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let value = toml::value::Datetime::deserialize(deserializer)?;
        let date = match value.date {
            Some(d) => NaiveDate::from_ymd_opt(d.year as i32, d.month as u32, d.day as u32),
            None => None,
        };
        date.map(TomlDate)
            .ok_or_else(|| Error::custom(format!("{} does not carry a valid date", value)))
    }
}

impl FromStr for TomlDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let naive = NaiveDate::from_str(s)?;
        Ok(Self(naive))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Meta {
        pub_date: TomlDate,
    }

    #[test]
    fn test_local_date() {
        let meta: Meta = toml::from_str("pub_date = 2024-01-05").unwrap();
        assert_eq!(meta.pub_date, TomlDate(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
    }

    #[test]
    fn test_datetime_keeps_date() {
        let meta: Meta = toml::from_str("pub_date = 2023-07-14T09:30:00Z").unwrap();
        assert_eq!(meta.pub_date, TomlDate(NaiveDate::from_ymd_opt(2023, 7, 14).unwrap()));
    }

    #[test]
    fn test_time_only_is_rejected() {
        assert!(toml::from_str::<Meta>("pub_date = 09:30:00").is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("2022-04-02".parse::<TomlDate>().unwrap().0, NaiveDate::from_ymd_opt(2022, 4, 2).unwrap());
    }
}

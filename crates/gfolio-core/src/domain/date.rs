use time::{Date, Month};

/// Parse a historical-price date: the compact `DD-Mon-YY` form (`31-Dec-09`)
/// or ISO `YYYY-MM-DD`.
pub fn parse_quote_date(input: &str) -> Option<Date> {
    let mut parts = input.trim().split('-');
    let (first, second, third) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    if first.len() == 4 {
        let year = first.parse::<i32>().ok()?;
        let month = Month::try_from(second.parse::<u8>().ok()?).ok()?;
        let day = third.parse::<u8>().ok()?;
        return Date::from_calendar_date(year, month, day).ok();
    }

    let day = first.parse::<u8>().ok()?;
    let month = month_from_abbrev(second)?;
    let year = expand_two_digit_year(third)?;
    Date::from_calendar_date(year, month, day).ok()
}

fn month_from_abbrev(raw: &str) -> Option<Month> {
    let month = match raw.to_ascii_lowercase().as_str() {
        "jan" => Month::January,
        "feb" => Month::February,
        "mar" => Month::March,
        "apr" => Month::April,
        "may" => Month::May,
        "jun" => Month::June,
        "jul" => Month::July,
        "aug" => Month::August,
        "sep" => Month::September,
        "oct" => Month::October,
        "nov" => Month::November,
        "dec" => Month::December,
        _ => return None,
    };
    Some(month)
}

// POSIX %y pivot: 69..=99 -> 19xx, 00..=68 -> 20xx.
fn expand_two_digit_year(raw: &str) -> Option<i32> {
    if raw.len() != 2 {
        return None;
    }
    let yy = raw.parse::<i32>().ok()?;
    Some(if yy >= 69 { 1900 + yy } else { 2000 + yy })
}

/// Serde adapter writing dates as `YYYY-MM-DD`.
pub mod iso {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(date)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_quote_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_provider_dates() {
        let date = parse_quote_date("31-Dec-09").expect("valid date");
        assert_eq!(date, Date::from_calendar_date(2009, Month::December, 31).expect("date"));

        let date = parse_quote_date("4-Jan-99").expect("valid date");
        assert_eq!(date.year(), 1999);
    }

    #[test]
    fn parses_iso_dates() {
        let date = parse_quote_date("2009-12-31").expect("valid date");
        assert_eq!(date.to_string(), "2009-12-31");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_quote_date("Date").is_none());
        assert!(parse_quote_date("31-Foo-09").is_none());
        assert!(parse_quote_date("2009-02-30").is_none());
    }
}

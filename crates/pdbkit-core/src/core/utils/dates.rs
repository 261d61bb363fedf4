use chrono::NaiveDate;
use phf::{Map, phf_map};

static MONTHS: Map<&'static str, u32> = phf_map! {
    "JAN" => 1, "FEB" => 2, "MAR" => 3, "APR" => 4,
    "MAY" => 5, "JUN" => 6, "JUL" => 7, "AUG" => 8,
    "SEP" => 9, "OCT" => 10, "NOV" => 11, "DEC" => 12,
};

/// Two-digit years below this value belong to the 21st century.
const CENTURY_PIVOT: i32 = 69;

/// Formats a date as `DD-MON-YY` with an upper-case month abbreviation.
pub fn format_pdb_date(date: NaiveDate) -> String {
    date.format("%d-%b-%y").to_string().to_ascii_uppercase()
}

/// Parses a `DD-MON-YY` date. Month names are matched case-insensitively.
///
/// Returns `None` for anything that is not a valid calendar date in that form.
pub fn parse_pdb_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('-');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || year.len() != 2 {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month = *MONTHS.get(month.to_ascii_uppercase().as_str())?;
    let short_year: i32 = year.parse().ok()?;
    let year = if short_year < CENTURY_PIVOT {
        2000 + short_year
    } else {
        1900 + short_year
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pdb_date_uses_upper_case_month() {
        let date = NaiveDate::from_ymd_opt(1990, 9, 1).unwrap();
        assert_eq!(format_pdb_date(date), "01-SEP-90");
        let date = NaiveDate::from_ymd_opt(2017, 12, 25).unwrap();
        assert_eq!(format_pdb_date(date), "25-DEC-17");
    }

    #[test]
    fn parse_pdb_date_applies_century_pivot() {
        assert_eq!(
            parse_pdb_date("01-SEP-90"),
            NaiveDate::from_ymd_opt(1990, 9, 1)
        );
        assert_eq!(
            parse_pdb_date("25-dec-17"),
            NaiveDate::from_ymd_opt(2017, 12, 25)
        );
        assert_eq!(
            parse_pdb_date("01-JAN-69"),
            NaiveDate::from_ymd_opt(1969, 1, 1)
        );
        assert_eq!(
            parse_pdb_date("01-JAN-68"),
            NaiveDate::from_ymd_opt(2068, 1, 1)
        );
    }

    #[test]
    fn parse_pdb_date_rejects_malformed_input() {
        assert_eq!(parse_pdb_date(""), None);
        assert_eq!(parse_pdb_date("01-SEPT-90"), None);
        assert_eq!(parse_pdb_date("31-FEB-90"), None);
        assert_eq!(parse_pdb_date("01-SEP-1990"), None);
        assert_eq!(parse_pdb_date("01-SEP-90-1"), None);
    }

    #[test]
    fn format_then_parse_returns_the_same_date() {
        let date = NaiveDate::from_ymd_opt(2003, 4, 30).unwrap();
        assert_eq!(parse_pdb_date(&format_pdb_date(date)), Some(date));
    }
}

//! Transaction date extraction from receipt OCR text.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, trace};

use super::patterns::DATE_FINDER;

/// One entry of the ordered date-format table.
///
/// Formats are tried strictly in this order and the first valid parse wins.
struct DateFormatRule {
    fmt: &'static str,
    /// Two-digit year, resolved against the extractor's reference date.
    short_year: bool,
}

const DATE_FORMATS: &[DateFormatRule] = &[
    DateFormatRule { fmt: "%d/%m/%y", short_year: true },
    DateFormatRule { fmt: "%d-%m-%y", short_year: true },
    DateFormatRule { fmt: "%d/%m/%Y", short_year: false },
    DateFormatRule { fmt: "%d-%m-%Y", short_year: false },
    DateFormatRule { fmt: "%Y-%m-%d", short_year: false },
    DateFormatRule { fmt: "%d %b %y", short_year: true },
    DateFormatRule { fmt: "%d %b %Y", short_year: false },
];

/// How many years the two-digit-year reference sits in the past. A
/// heuristic window, not a guarantee; receipts far outside the surrounding
/// century need a product decision before this changes.
pub(crate) const REFERENCE_YEARS_BACK: i32 = 10;

/// Date field extractor.
///
/// Scans lines in order and halts at the first line whose date-shaped
/// substring parses to a valid calendar date. It deliberately does not scan
/// on looking for a "better" date later in the text.
pub struct DateExtractor {
    /// Reference date for two-digit-year resolution.
    reference: NaiveDate,
}

impl DateExtractor {
    /// Extractor with the reference set [`REFERENCE_YEARS_BACK`] years
    /// before today, so recent receipt years land in the current decade.
    pub fn new() -> Self {
        Self::with_reference(years_back(
            chrono::Local::now().date_naive(),
            REFERENCE_YEARS_BACK,
        ))
    }

    /// Extractor with an explicit reference date (deterministic tests).
    pub fn with_reference(reference: NaiveDate) -> Self {
        Self { reference }
    }

    /// Extract the first parseable date, if any.
    pub fn extract(&self, text: &str) -> Option<NaiveDate> {
        let lowered = text.to_lowercase();

        for line in lowered.lines() {
            // Only the first date-shaped substring per line is considered.
            let Some(found) = DATE_FINDER.find(line) else {
                continue;
            };
            let candidate = found.as_str().trim();
            trace!("potential date string {candidate:?}");

            if let Some(date) = self.parse_candidate(candidate) {
                debug!("extracted date {date} from {candidate:?}");
                return Some(date);
            }

            // A shape match that fails every format is not an error;
            // later lines may still carry a real date.
            debug!("could not parse date candidate {candidate:?}");
        }

        None
    }

    fn parse_candidate(&self, candidate: &str) -> Option<NaiveDate> {
        for rule in DATE_FORMATS {
            let Ok(parsed) = NaiveDate::parse_from_str(candidate, rule.fmt) else {
                continue;
            };

            let date = if rule.short_year {
                self.resolve_short_year(parsed)
            } else {
                Some(parsed)
            };

            if let Some(date) = date {
                trace!("parsed {candidate:?} with format {}", rule.fmt);
                return Some(date);
            }
        }

        None
    }

    /// Re-anchor a two-digit-year parse so the year falls within
    /// `[reference - 50, reference + 49]`.
    fn resolve_short_year(&self, parsed: NaiveDate) -> Option<NaiveDate> {
        let yy = parsed.year().rem_euclid(100);
        let ref_year = self.reference.year();

        let mut year = (ref_year / 100) * 100 + yy;
        if year < ref_year - 50 {
            year += 100;
        } else if year > ref_year + 49 {
            year -= 100;
        }

        // The century shift can invalidate Feb 29; treat that as no parse.
        NaiveDate::from_ymd_opt(year, parsed.month(), parsed.day())
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// `date` moved `years` back, clamping Feb 29 to Feb 28.
pub(crate) fn years_back(date: NaiveDate, years: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year() - years, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(date.year() - years, date.month(), 28))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> DateExtractor {
        // Pinned reference: as if scanned on 2025-06-01.
        DateExtractor::with_reference(NaiveDate::from_ymd_opt(2015, 6, 1).unwrap())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_two_digit_year_resolves_forward() {
        assert_eq!(extractor().extract("14/03/25"), Some(ymd(2025, 3, 14)));
    }

    #[test]
    fn test_dash_separated_short_year() {
        assert_eq!(extractor().extract("22-03-25"), Some(ymd(2025, 3, 22)));
    }

    #[test]
    fn test_four_digit_year() {
        assert_eq!(extractor().extract("14/03/2025"), Some(ymd(2025, 3, 14)));
        assert_eq!(extractor().extract("14-03-2025"), Some(ymd(2025, 3, 14)));
    }

    #[test]
    fn test_iso_format() {
        assert_eq!(extractor().extract("2025-03-14"), Some(ymd(2025, 3, 14)));
    }

    #[test]
    fn test_month_abbreviation() {
        assert_eq!(extractor().extract("14 Mar 25"), Some(ymd(2025, 3, 14)));
        assert_eq!(extractor().extract("14 mar 2025"), Some(ymd(2025, 3, 14)));
    }

    #[test]
    fn test_first_line_with_valid_date_wins() {
        let text = "MARKET\n14/03/25 11:02\n20/04/25";
        assert_eq!(extractor().extract(text), Some(ymd(2025, 3, 14)));
    }

    #[test]
    fn test_invalid_shape_match_skipped() {
        // 45/45/25 matches the finder shape but no format; the real date
        // further down must still be found.
        let text = "45/45/25\n2025-03-14";
        assert_eq!(extractor().extract(text), Some(ymd(2025, 3, 14)));
    }

    #[test]
    fn test_invalid_calendar_date_rejected() {
        assert_eq!(extractor().extract("30/02/2025"), None);
    }

    #[test]
    fn test_no_date_is_absent() {
        assert_eq!(extractor().extract("TOTAL €12.34"), None);
        assert_eq!(extractor().extract(""), None);
    }

    #[test]
    fn test_short_year_window_wraps_backwards() {
        // Reference 2015: "99" is within [1965, 2064] as 1999.
        assert_eq!(extractor().extract("14/03/99"), Some(ymd(1999, 3, 14)));
    }

    #[test]
    fn test_years_back_handles_leap_day() {
        assert_eq!(years_back(ymd(2024, 2, 29), 10), ymd(2014, 2, 28));
        assert_eq!(years_back(ymd(2025, 6, 1), 10), ymd(2015, 6, 1));
    }
}

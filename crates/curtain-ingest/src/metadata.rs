//! Metadata extracted from source filenames.

use chrono::{Datelike, NaiveDate};
use std::path::Path;

/// Extract the flight base date from the `YYYYMMDD` token of a source
/// filename, e.g. `olympex_CRS_20151110_172155.nc` -> 2015-11-10.
///
/// The first 8-digit run that parses as a plausible date wins; returns
/// `None` when no token is found, which callers must treat as fatal since
/// absolute time cannot be computed without it.
pub fn flight_date_from_name(file_path: &str) -> Option<NaiveDate> {
    let stem = Path::new(file_path).file_stem().and_then(|s| s.to_str())?;

    let bytes = stem.as_bytes();
    let mut run_start = None;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            let start = *run_start.get_or_insert(i);
            if i + 1 - start == 8 {
                let token = &stem[start..=i];
                if let Ok(date) = NaiveDate::parse_from_str(token, "%Y%m%d") {
                    if (1990..=2100).contains(&date.year()) {
                        return Some(date);
                    }
                }
                // Slide the window: a 9+ digit run may still contain a date.
                run_start = Some(start + 1);
            }
        } else {
            run_start = None;
        }
    }
    None
}

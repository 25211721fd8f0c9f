// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Human-readable breakdown of a duration given in seconds.

const SECS_MINUTE: u64 = 60;
const SECS_HOUR: u64 = SECS_MINUTE * 60;
const SECS_DAY: u64 = SECS_HOUR * 24;
const SECS_WEEK: u64 = SECS_DAY * 7;
/// 365.25 days; a whole number of seconds, so no rounding is involved.
const SECS_YEAR: u64 = SECS_DAY * 36525 / 100;

/// Unit counts of a duration, largest unit first.
///
/// Each field is the remainder left over by the larger units, so
/// [`Breakdown::total_secs`] always reconstructs the original input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub years: u64,
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Breakdown {
    /// Split `secs` into years, weeks, days, hours, minutes and seconds.
    pub fn from_secs(secs: u64) -> Self {
        let mut rest = secs;
        let mut take = |unit: u64| {
            let count = rest / unit;
            rest %= unit;
            count
        };

        let years = take(SECS_YEAR);
        let weeks = take(SECS_WEEK);
        let days = take(SECS_DAY);
        let hours = take(SECS_HOUR);
        let minutes = take(SECS_MINUTE);

        Self {
            years,
            weeks,
            days,
            hours,
            minutes,
            seconds: rest,
        }
    }

    /// Weighted sum of all units, in seconds.
    pub fn total_secs(&self) -> u64 {
        self.years * SECS_YEAR
            + self.weeks * SECS_WEEK
            + self.days * SECS_DAY
            + self.hours * SECS_HOUR
            + self.minutes * SECS_MINUTE
            + self.seconds
    }

    fn units(&self) -> [(u64, &'static str); 6] {
        [
            (self.years, "year"),
            (self.weeks, "week"),
            (self.days, "day"),
            (self.hours, "hour"),
            (self.minutes, "minute"),
            (self.seconds, "second"),
        ]
    }
}

/// Render `secs` as space-separated `"<n> <unit>[s]"` segments.
///
/// Zero-valued units are skipped unless `include_zeroes` is set. The seconds
/// unit is always emitted when nothing else was, so the result is never empty.
///
/// # Examples
///
/// ```
/// use webhelpers::utils::timespan;
///
/// assert_eq!(timespan(65, false), "1 minute 5 seconds");
/// assert_eq!(timespan(0, false), "0 seconds");
/// ```
pub fn timespan(secs: u64, include_zeroes: bool) -> String {
    let breakdown = Breakdown::from_secs(secs);
    let units = breakdown.units();
    let last = units.len() - 1;

    let mut segments: Vec<String> = Vec::with_capacity(units.len());
    for (idx, (count, unit)) in units.into_iter().enumerate() {
        let forced = idx == last && segments.is_empty();
        if count > 0 || include_zeroes || forced {
            let plural = if count == 1 { "" } else { "s" };
            segments.push(format!("{count} {unit}{plural}"));
        }
    }

    segments.join(" ")
}

//! Human-readable rendering of completion latencies.
//!
//! Durations render in a single unit, e.g. `"45 seconds"`, `"1 hour"`,
//! `"3 days"`. Months are 30 days and years are 365 days; no calendar
//! arithmetic is involved.

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
const MS_PER_MONTH: i64 = 30 * MS_PER_DAY;
const MS_PER_YEAR: i64 = 365 * MS_PER_DAY;

/// Unit sizes, smallest first.
const UNITS: [(i64, &str); 6] = [
    (MS_PER_SECOND, "second"),
    (MS_PER_MINUTE, "minute"),
    (MS_PER_HOUR, "hour"),
    (MS_PER_DAY, "day"),
    (MS_PER_MONTH, "month"),
    (MS_PER_YEAR, "year"),
];

/// Render a latency in milliseconds as a relative-duration string.
///
/// The count is rounded half-up within the smallest unit, and the unit is
/// promoted while the rounded value reaches a whole next unit, so 59.6
/// seconds renders as `"1 minute"` rather than `"60 seconds"`. Negative
/// inputs render as zero seconds.
pub fn humanize_latency_ms(ms: i64) -> String {
    let ms = ms.max(0);

    let mut chosen = (round_div(ms, MS_PER_SECOND), "second");
    for window in UNITS.windows(2) {
        let (size, unit) = window[0];
        let (next_size, next_unit) = window[1];
        let count = round_div(ms, size);
        if count.saturating_mul(size) < next_size {
            chosen = (count, unit);
            break;
        }
        chosen = (round_div(ms, next_size), next_unit);
    }

    let (count, unit) = chosen;
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Integer division rounding half up, for non-negative inputs.
fn round_div(value: i64, divisor: i64) -> i64 {
    value.saturating_add(divisor / 2) / divisor
}

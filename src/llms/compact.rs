//! Compact number formatting (`1.2K`, `3.4M`) for the llms.txt summary.

/// Compact units, smallest first.
const UNITS: [(u64, &str); 4] = [
    (1_000, "K"),
    (1_000_000, "M"),
    (1_000_000_000, "B"),
    (1_000_000_000_000, "T"),
];

/// Format a count the way `en-US` compact short notation does: `999`, `1.2K`, `15K`, `1.5M`.
///
/// Values below ten units keep one decimal, larger ones are rounded to whole units, halves
/// round up, and a value that rounds up to a thousand moves to the next unit.
#[must_use]
pub fn format_compact(n: u64) -> String {
    let Some(mut unit) = UNITS.iter().rposition(|(divisor, _)| n >= *divisor) else {
        return n.to_string();
    };

    let value = u128::from(n);
    loop {
        let Some(&(divisor, suffix)) = UNITS.get(unit) else {
            return n.to_string();
        };
        let divisor = u128::from(divisor);

        if value < 10 * divisor {
            let tenths = (value * 10 + divisor / 2) / divisor;
            return if tenths % 10 == 0 {
                format!("{}{suffix}", tenths / 10)
            } else {
                format!("{}.{}{suffix}", tenths / 10, tenths % 10)
            };
        }

        let whole = (value + divisor / 2) / divisor;
        if whole >= 1000 && unit + 1 < UNITS.len() {
            unit += 1;
            continue;
        }

        return format!("{whole}{suffix}");
    }
}

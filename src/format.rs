/// Display formatting for traffic metrics
///
/// Every formatter takes an already-normalized `Option<f64>` and degrades
/// to `NOT_AVAILABLE` instead of failing, so one bad upstream field only
/// blanks its own slot.

pub const NOT_AVAILABLE: &str = "N/A";

const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;
const THOUSAND: f64 = 1e3;

/// Fixed-point rendering, rounding ties away from zero
///
/// Rounds the scaled value, not the exact binary one: `to_fixed(8.345, 2)`
/// is "8.35" although 8.345 is stored slightly below the tie.
pub fn to_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    // Avoid "-0" for tiny negatives that round to zero
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", decimals, rounded)
}

/// Compact number: "1.2M", "3K", "999"
///
/// Absent or non-positive values are not available.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(num) if num > 0.0 => {
            if num >= BILLION {
                format!("{}B", to_fixed(num / BILLION, decimals))
            } else if num >= MILLION {
                format!("{}M", to_fixed(num / MILLION, decimals))
            } else if num >= THOUSAND {
                format!("{}K", to_fixed(num / THOUSAND, decimals))
            } else {
                to_fixed(num, decimals)
            }
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Rank with a leading "#"; ranks <= 0 are invalid
pub fn format_rank(rank: Option<f64>) -> String {
    match rank {
        Some(r) if r > 0.0 => format!("#{}", format_number(Some(r), 0)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Fraction in [0, 1] rendered as a percentage with one decimal
pub fn format_percentage(fraction: Option<f64>) -> String {
    match fraction {
        Some(f) if f == 0.0 => "0%".to_string(),
        Some(f) if f > 0.0 => format!("{}%", to_fixed(f * 100.0, 1)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Seconds as "Xm Ys", or "Ys" under a minute
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s > 0.0 => {
            let minutes = (s / 60.0).floor() as u64;
            let remaining = (s % 60.0).floor() as u64;
            if minutes > 0 {
                format!("{}m {}s", minutes, remaining)
            } else {
                format!("{}s", remaining)
            }
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Chart y-axis tick label: one decimal with B/M/K, plain number below 1000
pub fn format_axis_tick(value: f64) -> String {
    if value >= BILLION {
        format!("{}B", to_fixed(value / BILLION, 1))
    } else if value >= MILLION {
        format!("{}M", to_fixed(value / MILLION, 1))
    } else if value >= THOUSAND {
        format!("{}K", to_fixed(value / THOUSAND, 1))
    } else {
        plain_number(value)
    }
}

/// Integer with thousands separators, used by the chart tooltip
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month key ("2024-01" or "2024-01-01") as "Jan 2024"
///
/// Keys that don't start with a year and month are shown as-is.
pub fn format_month_label(key: &str) -> String {
    let mut parts = key.splitn(3, '-');
    let year = parts.next().filter(|y| y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()));
    let month = parts
        .next()
        .and_then(|m| m.get(..2))
        .and_then(|m| m.parse::<usize>().ok())
        .filter(|m| (1..=12).contains(m));

    match (year, month) {
        (Some(year), Some(month)) => format!("{} {}", MONTH_NAMES[month - 1], year),
        _ => key.to_string(),
    }
}

fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

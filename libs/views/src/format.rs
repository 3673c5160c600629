//! Number formatting in the dashboard's en-US conventions

/// `$1,234.56`; negatives render as `-$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let amount = finite(amount);
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// `1,234`
pub fn format_count(count: u64) -> String {
    group_thousands(count)
}

/// Axis tick in whole dollars: `$1,234`
pub fn currency_tick(amount: f64) -> String {
    let amount = finite(amount);
    let dollars = amount.abs().round() as u64;
    let sign = if amount < 0.0 && dollars > 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(dollars))
}

/// Axis tick in thousands of dollars: `$12K`
pub fn thousands_tick(amount: f64) -> String {
    let thousands = (finite(amount) / 1000.0).round();
    let sign = if thousands < 0.0 { "-" } else { "" };
    format!("{sign}${}K", group_thousands(thousands.abs() as u64))
}

/// `percent` is already scaled to 0..=100
pub fn format_percent(percent: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, finite(percent))
}

/// `count / total`, or 0 when there is nothing to divide by
pub fn ratio(count: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() {
        0.0
    } else {
        count / total
    }
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a percentage with one decimal place (`15.0`, `inf`).
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}

/// Render a currency amount rounded to whole units with thousands separators.
pub fn format_currency(value: f64) -> String {
    let rounded = format!("{value:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return format!("${sign}{digits}");
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${sign}{grouped}")
}

/// Whole units with thousands separators: `61.91` (millions) -> `"61,910,000"`.
pub fn format_units(millions: f64) -> String {
    let units = (millions * 1_000_000.0).round();
    group_thousands(units)
}

/// Axis tick label for a value-scale tick given in millions.
pub fn format_axis_tick(millions: f64) -> String {
    format_units(millions)
}

fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

//! Frame-rate and time-base rendering.

/// Render a rate (cycles per second) followed by `unit`.
///
/// The value is first rounded to hundredths; that rounded value picks the
/// precision:
///
/// | rounded hundredths | output |
/// |---|---|
/// | zero | `0.0000 fps` |
/// | fractional part | `23.98 fps` |
/// | whole, not a multiple of 1000 | `25 fps` |
/// | multiple of 1000 | `48k fps` |
///
/// # Example
///
/// ```
/// use probe_report::rate::format_rate;
///
/// assert_eq!(format_rate(24000.0 / 1001.0, "fps"), "23.98 fps");
/// assert_eq!(format_rate(90000.0, "tbn"), "90k tbn");
/// ```
pub fn format_rate(value: f64, unit: &str) -> String {
    let hundredths = (value * 100.0).round() as u64;
    if hundredths == 0 {
        format!("{value:.4} {unit}")
    } else if hundredths % 100 != 0 {
        format!("{value:.2} {unit}")
    } else if hundredths % (100 * 1000) != 0 {
        format!("{value:.0} {unit}")
    } else {
        format!("{:.0}k {unit}", value / 1000.0)
    }
}

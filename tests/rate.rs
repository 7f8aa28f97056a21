//! Frame-rate rendering tests.

use probe_report::format_rate;

#[test]
fn fractional_rate_uses_two_decimals() {
    assert_eq!(format_rate(23.976, "fps"), "23.98 fps");
    assert_eq!(format_rate(30000.0 / 1001.0, "fps"), "29.97 fps");
}

#[test]
fn whole_rate_has_no_decimals() {
    assert_eq!(format_rate(25.0, "fps"), "25 fps");
    assert_eq!(format_rate(12800.0, "tbn"), "12800 tbn");
}

#[test]
fn thousands_use_k_suffix() {
    assert_eq!(format_rate(48000.0, "fps"), "48k fps");
    assert_eq!(format_rate(90000.0, "tbn"), "90k tbn");
    assert_eq!(format_rate(1000.0, "tbn"), "1k tbn");
}

#[test]
fn zero_uses_four_decimals() {
    assert_eq!(format_rate(0.0, "fps"), "0.0000 fps");
    assert_eq!(format_rate(0.001, "fps"), "0.0010 fps");
}

#[test]
fn rounding_to_hundredths_picks_precision() {
    // 59.999 rounds to 6000 hundredths, a whole number.
    assert_eq!(format_rate(59.999, "tbr"), "60 tbr");
}

#[test]
fn unit_is_appended_verbatim() {
    assert_eq!(format_rate(25.0, "fps, "), "25 fps, ");
}

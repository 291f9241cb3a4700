//! Decimal formatting for bot replies.

use rust_decimal::Decimal;

/// Values below this get 8 decimal places, the rest 4.
const SMALL_VALUE_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Formats with 8 decimals below 0.1 and 4 decimals otherwise (round half to even),
/// then strips trailing zeros and a dangling decimal point.
pub fn format_decimal(value: Decimal) -> String {
    let dp = if value < SMALL_VALUE_THRESHOLD { 8 } else { 4 };
    let rounded = value.round_dp(dp).normalize();
    if rounded.is_zero() {
        // Avoid "-0" for tiny negatives.
        return "0".to_string();
    }
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_small_values_use_eight_places() {
        assert_eq!(format_decimal(dec!(0.05)), "0.05");
        assert_eq!(format_decimal(dec!(0.0012345678)), "0.00123457");
        assert_eq!(format_decimal(dec!(0.00000001)), "0.00000001");
        assert_eq!(format_decimal(dec!(0.000000001)), "0");
    }

    #[test]
    fn test_large_values_use_four_places() {
        assert_eq!(format_decimal(dec!(0.1)), "0.1");
        assert_eq!(format_decimal(dec!(1.23456)), "1.2346");
        assert_eq!(format_decimal(dec!(1234.5)), "1234.5");
    }

    #[test]
    fn test_trailing_zeros_and_point_removed() {
        assert_eq!(format_decimal(dec!(2)), "2");
        assert_eq!(format_decimal(dec!(2.5000)), "2.5");
        assert_eq!(format_decimal(dec!(100)), "100");
        assert_eq!(format_decimal(dec!(0)), "0");
    }

    #[test]
    fn test_half_to_even() {
        assert_eq!(format_decimal(dec!(1.00005)), "1");
        assert_eq!(format_decimal(dec!(1.00015)), "1.0002");
    }
}

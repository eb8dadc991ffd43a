use super::*;
use shared::LedgerError;

#[test]
fn test_to_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let a = 0.1_f64;
    let b = 0.2_f64;
    let sum_f64 = a + b;

    // f64 fails
    assert_ne!(sum_f64, 0.3);

    // Decimal succeeds
    let sum_dec = to_decimal(a) + to_decimal(b);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_round2_half_up() {
    assert_eq!(round2(10.005), 10.01);
    assert_eq!(round2(10.004), 10.0);
    assert_eq!(round2(2.675), 2.68); // binary float would round this down
}

#[test]
fn test_to_canonical_comma_decimal() {
    assert_eq!(to_canonical("32,50").unwrap(), 32.5);
    assert_eq!(to_canonical("0,01").unwrap(), 0.01);
    assert_eq!(to_canonical("100").unwrap(), 100.0);
}

#[test]
fn test_to_canonical_strips_thousands_separator() {
    assert_eq!(to_canonical("1.234,56").unwrap(), 1234.56);
    assert_eq!(to_canonical("12.345").unwrap(), 12345.0);
}

#[test]
fn test_to_canonical_rejects_garbage() {
    assert!(matches!(
        to_canonical("abc"),
        Err(LedgerError::InvalidNumber(_))
    ));
    assert!(matches!(
        to_canonical("12,3,4"),
        Err(LedgerError::InvalidNumber(_))
    ));
    assert!(matches!(to_canonical(""), Err(LedgerError::InvalidNumber(_))));
    assert!(matches!(
        to_canonical("   "),
        Err(LedgerError::InvalidNumber(_))
    ));
}

#[test]
fn test_to_canonical_rejects_non_finite() {
    assert!(matches!(
        to_canonical("inf"),
        Err(LedgerError::InvalidNumber(_))
    ));
    assert!(matches!(
        to_canonical("NaN"),
        Err(LedgerError::InvalidNumber(_))
    ));
}

#[test]
fn test_to_display_swaps_separator_only() {
    assert_eq!(to_display("32.50"), "32,50");
    assert_eq!(to_display("100"), "100");
}

#[test]
fn test_display_round_trip() {
    // toDisplay(toCanonical(s)) == normalize(s), modulo 2dp rounding
    for s in ["32,50", "0,01", "1250,00", "7,90"] {
        let canonical = to_canonical(s).unwrap();
        assert_eq!(format_display(canonical), s);
    }
}

#[test]
fn test_format_display_always_two_decimals() {
    assert_eq!(format_display(30.0), "30,00");
    assert_eq!(format_display(0.0), "0,00");
    assert_eq!(format_display(7.9), "7,90");
}

#[test]
fn test_format_brl() {
    assert_eq!(format_brl(458.9), "R$ 458,90");
    assert_eq!(format_brl(0.0), "R$ 0,00");
}

#[test]
fn test_money_eq_tolerance() {
    assert!(money_eq(10.0, 10.0));
    assert!(money_eq(10.0, 10.004));
    assert!(!money_eq(10.0, 10.01));
}

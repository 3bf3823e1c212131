use super::*;

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
fn test_accumulation_precision() {
    // Sum 0.01 one thousand times
    let mut total = Decimal::ZERO;
    for _ in 0..1000 {
        total += to_decimal(0.01);
    }
    assert_eq!(to_f64(total), 10.0);
}

#[test]
fn test_negative_delta() {
    // 25.00 + (8.00 - 5.00) - 8.00 == 20.00
    let mut total = to_decimal(25.0);
    total += to_decimal(8.0) - to_decimal(5.0);
    total -= to_decimal(8.0);
    assert_eq!(to_f64(total), 20.0);
}

#[test]
fn test_validate_item_amounts() {
    assert!(validate_item_amounts(1, 10.0, 20.0).is_ok());
    assert!(validate_item_amounts(0, 10.0, 20.0).is_err());
    assert!(validate_item_amounts(1, -0.01, 20.0).is_err());
    assert!(validate_item_amounts(1, 1_000_000.01, 20.0).is_err());
    assert!(validate_item_amounts(1, 10.0, 100_000_000.01).is_err());
    assert!(validate_item_amounts(1, f64::NAN, 20.0).is_err());
    assert!(validate_item_amounts(1, 10.0, f64::INFINITY).is_err());
}

#[test]
fn test_validate_total_amount() {
    assert!(validate_total_amount(0.0).is_ok());
    assert!(validate_total_amount(99.5).is_ok());
    assert!(validate_total_amount(-1.0).is_err());
    assert!(validate_total_amount(f64::NAN).is_err());
}

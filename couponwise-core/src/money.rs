//! Currency helpers. Amounts are `f64` dollars kept at 2-decimal precision.

/// Round an amount to whole cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Tolerance used when comparing accumulated totals against a cap.
pub const CENT_EPSILON: f64 = 0.005;

/// True when `a` has reached `b`, allowing for float drift below half a cent.
pub fn reached(a: f64, b: f64) -> bool {
    a >= b - CENT_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.345), 12.35);
        assert_eq!(round_cents(49.994), 49.99);
        assert_eq!(round_cents(0.0), 0.0);
    }

    #[test]
    fn test_reached_tolerates_drift() {
        let sum: f64 = (0..10).map(|_| 0.1).sum();
        assert!(reached(sum, 1.0));
        assert!(!reached(0.98, 1.0));
    }
}

macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr) => {
        assert_approx_eq!($lhs, $rhs, epsilon = $crate::approx::DEFAULT_EPSILON)
    };
    ($lhs:expr, $rhs:expr, epsilon = $epsilon:expr) => {
        match (&($lhs), &($rhs)) {
            (lhs, rhs) => assert!(
                $crate::approx::approx_eq(*lhs, *rhs, $epsilon),
                r#"assertion failed: `({} ≈ {})`
  left: `{:?}`,
 right: `{:?}`"#,
                stringify!($lhs),
                stringify!($rhs),
                lhs,
                rhs,
            ),
        }
    };
}

pub const DEFAULT_EPSILON: f64 = 1e-6;

pub fn approx_eq(lhs: f64, rhs: f64, epsilon: f64) -> bool {
    (lhs - rhs).abs() < epsilon
}

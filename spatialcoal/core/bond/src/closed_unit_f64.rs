bounded_f64!(
    /// A probability or fraction in `[0.0, 1.0]`.
    ClosedUnitF64,
    ClosedUnitF64Error,
    (0.0_f64..=1.0_f64),
    "in [0.0, 1.0]"
);

impl ClosedUnitF64 {
    /// Clamps `value` into `[0.0, 1.0]`, NaN becomes `0.0`.
    #[must_use]
    pub fn saturating_new(value: f64) -> Self {
        if value >= 1.0_f64 {
            Self::one()
        } else if value > 0.0_f64 {
            Self(value)
        } else {
            Self::zero()
        }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self(0.0_f64)
    }

    #[must_use]
    pub fn one() -> Self {
        Self(1.0_f64)
    }
}

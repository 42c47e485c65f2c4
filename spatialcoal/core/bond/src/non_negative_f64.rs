use core::{iter::Sum, ops::Add};

bounded_f64!(
    /// A weight in `[0.0, +inf)`.
    NonNegativeF64,
    NonNegativeF64Error,
    (0.0_f64..=f64::INFINITY),
    "non-negative"
);

impl NonNegativeF64 {
    #[must_use]
    pub fn zero() -> Self {
        Self(0.0_f64)
    }
}

impl From<u64> for NonNegativeF64 {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: u64) -> Self {
        Self(value as f64)
    }
}

impl Add for NonNegativeF64 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sum for NonNegativeF64 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// Lazily extended table of `ln(n!)`.
#[derive(Debug, Clone)]
pub struct LogFactorials {
    table: Vec<f64>,
}

impl Default for LogFactorials {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFactorials {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: vec![0.0_f64],
        }
    }

    /// Returns `ln(n!)`, extending the table up to `n` if required.
    #[must_use]
    #[debug_ensures(ret >= 0.0_f64, "ln(n!) is non-negative")]
    pub fn ln_factorial(&mut self, n: usize) -> f64 {
        while self.table.len() <= n {
            let next = self.table.len();

            #[allow(clippy::cast_precision_loss)]
            let ln_next = (next as f64).ln();

            self.table.push(self.table[next - 1] + ln_next);
        }

        self.table[n]
    }
}

/// Probability of the occupancy spectrum `occupancy` when `balls` balls are
/// thrown uniformly into `urns` urns:
///
/// `P = N! k! / (N^k prod_j (j!)^M_j M_j!)`
///
/// The computation happens in the log domain. `N! / M_0!` is expanded into
/// the `N - M_0 <= k` largest factors of `N!`, so the cost only depends on
/// `k` and never on `N`.
#[must_use]
#[debug_requires(
    spatialcoal_core::spectrum::balls_are_conserved(balls, occupancy),
    "the occupancy numbers account for every ball"
)]
#[debug_requires(
    spatialcoal_core::spectrum::urns_are_conserved(urns, occupancy),
    "the occupancy numbers account for every urn"
)]
#[debug_ensures((0.0_f64..=1.0_f64).contains(&ret), "returns a probability")]
pub fn probability(
    balls: u32,
    urns: u64,
    occupancy: &[u64],
    log_factorials: &mut LogFactorials,
) -> f64 {
    if balls == 0 {
        return 1.0_f64;
    }

    let empty_urns = occupancy.first().copied().unwrap_or(0);

    // ln(N! / M_0!)
    #[allow(clippy::cast_precision_loss)]
    let ln_falling_factorial: f64 = ((empty_urns + 1)..=urns).map(|i| (i as f64).ln()).sum();

    #[allow(clippy::cast_precision_loss)]
    let ln_urns_pow_balls = f64::from(balls) * (urns as f64).ln();

    let mut ln_denominator = ln_urns_pow_balls;

    #[allow(clippy::cast_possible_truncation)]
    for (j, m_j) in occupancy.iter().enumerate().skip(1) {
        if *m_j > 0 {
            #[allow(clippy::cast_precision_loss)]
            let m_j_f64 = *m_j as f64;

            ln_denominator +=
                m_j_f64 * log_factorials.ln_factorial(j) + log_factorials.ln_factorial(*m_j as usize);
        }
    }

    let ln_numerator = ln_falling_factorial + log_factorials.ln_factorial(balls as usize);

    (ln_numerator - ln_denominator).exp().clamp(0.0_f64, 1.0_f64)
}

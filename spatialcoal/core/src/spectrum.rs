use core::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of throwing `k` balls (lineages) into `N` urns (parents).
///
/// Entry `j` counts the urns that received exactly `j` balls. A spectrum can
/// be shorter than `k + 1` entries if its trailing (all empty) entries were
/// dropped; the missing occupancy numbers are zero.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::module_name_repetitions)]
pub struct OccupancySpectrum {
    balls: u32,
    urns: u64,
    occupancy: Vec<u64>,
}

impl OccupancySpectrum {
    #[must_use]
    #[debug_requires(
        balls_are_conserved(balls, &occupancy),
        "the occupancy numbers account for every ball"
    )]
    #[debug_requires(
        urns_are_conserved(urns, &occupancy),
        "the occupancy numbers account for every urn"
    )]
    pub fn new(balls: u32, urns: u64, occupancy: Vec<u64>) -> Self {
        Self {
            balls,
            urns,
            occupancy,
        }
    }

    #[must_use]
    pub fn balls(&self) -> u32 {
        self.balls
    }

    #[must_use]
    pub fn urns(&self) -> u64 {
        self.urns
    }

    #[must_use]
    pub fn occupancy_numbers(&self) -> &[u64] {
        &self.occupancy
    }

    /// Number of urns that received exactly `j` balls.
    #[must_use]
    pub fn occupancy_number(&self, j: usize) -> u64 {
        self.occupancy.get(j).copied().unwrap_or(0)
    }

    /// Number of urns that received at least one ball, i.e. the number of
    /// lineages left after the corresponding merger.
    #[must_use]
    pub fn non_empty_urns(&self) -> u64 {
        self.occupancy.iter().skip(1).sum()
    }

    /// Drops the trailing zero occupancy numbers.
    #[must_use]
    #[debug_ensures(
        ret.occupancy.last().map_or(true, |m| *m > 0),
        "no trailing empty occupancy numbers remain"
    )]
    pub fn truncate_tail(mut self) -> Self {
        while let Some(0) = self.occupancy.last() {
            self.occupancy.pop();
        }

        self
    }
}

impl fmt::Debug for OccupancySpectrum {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct(stringify!(OccupancySpectrum))
            .field("balls", &self.balls)
            .field("urns", &self.urns)
            .field("occupancy", &self.occupancy)
            .finish()
    }
}

impl fmt::Display for OccupancySpectrum {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_list().entries(self.occupancy.iter()).finish()
    }
}

/// Checks that `sum_j j * M_j == k`.
#[must_use]
pub fn balls_are_conserved(balls: u32, occupancy: &[u64]) -> bool {
    occupancy
        .iter()
        .enumerate()
        .map(|(j, m_j)| (j as u128) * u128::from(*m_j))
        .sum::<u128>()
        == u128::from(balls)
}

/// Checks that `sum_j M_j == N`.
#[must_use]
pub fn urns_are_conserved(urns: u64, occupancy: &[u64]) -> bool {
    occupancy.iter().map(|m_j| u128::from(*m_j)).sum::<u128>() == u128::from(urns)
}

#[cfg(test)]
mod tests {
    use super::{balls_are_conserved, urns_are_conserved, OccupancySpectrum};

    #[test]
    fn conservation_checks() {
        assert!(balls_are_conserved(5, &[3, 1, 2]));
        assert!(!balls_are_conserved(4, &[3, 1, 2]));
        assert!(urns_are_conserved(6, &[3, 1, 2]));
        assert!(!urns_are_conserved(5, &[3, 1, 2]));
    }

    #[test]
    fn truncated_spectrum_keeps_its_occupancy() {
        let spectrum = OccupancySpectrum::new(3, 4, vec![2, 1, 1, 0]).truncate_tail();

        assert_eq!(spectrum.occupancy_numbers(), &[2, 1, 1]);
        assert_eq!(spectrum.occupancy_number(3), 0);
        assert_eq!(spectrum.non_empty_urns(), 2);
        assert_eq!(spectrum.to_string(), "[2, 1, 1]");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "the occupancy numbers account for every ball")]
    fn broken_ball_conservation_is_fatal() {
        let _ = OccupancySpectrum::new(3, 2, vec![1, 1]);
    }
}

/// Enumerates every occupancy spectrum of `balls` balls in `urns` urns.
///
/// Each spectrum `[M_0, M_1, .., M_k]` is passed to `callback` exactly once.
/// The spectra are enumerated by a recursive descent that fixes the largest
/// occupancy number first.
pub fn generate<F: FnMut(Vec<u64>)>(balls: u32, urns: u64, mut callback: F) {
    let balls = balls as usize;

    let mut occupancy = vec![0_u64; balls + 1];

    descend(balls, urns, balls, &mut occupancy, &mut callback);
}

/// Distributes `balls` among `urns`, where no urn may receive more than
/// `j_max` balls.
///
/// All entries of `occupancy` up to `j_max` are zero on entry and are reset
/// to zero before returning.
fn descend<F: FnMut(Vec<u64>)>(
    balls: usize,
    urns: u64,
    j_max: usize,
    occupancy: &mut Vec<u64>,
    callback: &mut F,
) {
    if balls == 0 {
        occupancy[0] = urns;
        callback(occupancy.clone());
        occupancy[0] = 0;

        return;
    }

    if j_max == 0 {
        return;
    }

    // Vertical descent: place i urns with exactly j_max balls
    for i in (1..=(balls / j_max)).rev() {
        if urns < (i as u64) {
            continue;
        }

        occupancy[j_max] = i as u64;

        let balls_left = balls - i * j_max;
        let next_j_max = if balls_left < j_max {
            balls_left
        } else {
            j_max - 1
        };

        descend(
            balls_left,
            urns - (i as u64),
            next_j_max,
            occupancy,
            callback,
        );
    }

    // Horizontal descent: no urn receives exactly j_max balls
    occupancy[j_max] = 0;

    descend(balls, urns, j_max - 1, occupancy, callback);
}

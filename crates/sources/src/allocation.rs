//! Packet allocation across sources: the bias formula and deterministic
//! largest-remainder rounding.

/// Relative launch weights for a set of sources:
///
/// W_s = (1 − ξ) · w_s L_s / Σ(w_s L_s) + ξ · w_s / Σ w_s
///
/// where ξ trades variance (luminosity-proportional launching) for
/// coverage of faint sources (weight-uniform launching). When every
/// emission weight is zero they fall back to one; when the weighted
/// luminosity sum is zero only the uniform term contributes. The result
/// is renormalized so it sums to exactly one whenever any term is
/// positive.
pub fn launch_weights(luminosities: &[f64], emission_weights: &[f64], bias: f64) -> Vec<f64> {
    assert_eq!(luminosities.len(), emission_weights.len());

    let fallback = emission_weights.iter().all(|&w| w == 0.0);
    let weights: Vec<f64> = if fallback {
        vec![1.0; emission_weights.len()]
    } else {
        emission_weights.to_vec()
    };

    let weighted_sum: f64 = luminosities
        .iter()
        .zip(weights.iter())
        .map(|(l, w)| l * w)
        .sum();
    let weight_sum: f64 = weights.iter().sum();

    let mut result: Vec<f64> = luminosities
        .iter()
        .zip(weights.iter())
        .map(|(l, w)| {
            let proportional = if weighted_sum > 0.0 {
                w * l / weighted_sum
            } else {
                0.0
            };
            let uniform = w / weight_sum;
            (1.0 - bias) * proportional + bias * uniform
        })
        .collect();

    let total: f64 = result.iter().sum();
    if total > 0.0 {
        for w in result.iter_mut() {
            *w /= total;
        }
    }
    result
}

/// Round raw allocations `weights[s] * n` to integer counts summing to
/// exactly `n`.
///
/// Deterministic largest-remainder rounding: take the floors, then hand
/// the remaining packets to the sources with the largest fractional
/// parts. Equal fractions go to the source with the smaller floor count
/// first (the relative boost matters most there), then by ascending
/// source index.
pub fn allocate_counts(weights: &[f64], n: usize) -> Vec<usize> {
    let mut counts: Vec<usize> = Vec::with_capacity(weights.len());
    let mut fractions: Vec<(usize, f64, usize)> = Vec::with_capacity(weights.len());

    let mut assigned = 0usize;
    for (index, w) in weights.iter().enumerate() {
        let raw = w * n as f64;
        let floor = raw.floor();
        counts.push(floor as usize);
        assigned += floor as usize;
        fractions.push((index, raw - floor, floor as usize));
    }

    fractions.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap()
            .then(a.2.cmp(&b.2))
            .then(a.0.cmp(&b.0))
    });

    let remainder = n.saturating_sub(assigned);
    for &(index, _, _) in fractions.iter().take(remainder) {
        counts[index] += 1;
    }
    counts
}

/// Prefix sums of the counts: entry s is the first history index of
/// source s, with a sentinel at the end equal to the total.
pub fn prefix_map(counts: &[usize]) -> Vec<usize> {
    let mut map = Vec::with_capacity(counts.len() + 1);
    map.push(0);
    let mut running = 0;
    for &c in counts {
        running += c;
        map.push(running);
    }
    map
}

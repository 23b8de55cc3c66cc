//! Groundwater response and triangular routing.

use crate::constants::ROUTING_BUFFER_LEN;

/// Outflows of the upper reservoir. Returns `(surface_flow, interflow)`.
///
/// Interflow is the always-active linear component; surface flow only
/// activates on the storage above `threshold`.
pub fn upper_outflows(storage: f64, surface_coeff: f64, linear_coeff: f64, threshold: f64) -> (f64, f64) {
    let surface_flow = if storage > threshold {
        surface_coeff * (storage - threshold)
    } else {
        0.0
    };
    (surface_flow, linear_coeff * storage)
}

/// Percolation to the lower reservoir: the configured rate, limited by
/// what the upper reservoir holds.
pub fn percolation(upper_storage: f64, rate: f64) -> f64 {
    rate.min(upper_storage.max(0.0))
}

/// Baseflow from the lower reservoir.
pub fn baseflow(lower_storage: f64, coeff: f64) -> f64 {
    coeff * lower_storage
}

/// Weights of a triangular unit hydrograph with the given base, summing
/// to 1. Fractional bases are supported; `base = 1` collapses to `[1.0]`
/// (no delay).
pub fn triangular_weights(base: f64) -> Vec<f64> {
    let n = (base.ceil() as usize).max(1);
    let half = base / 2.0;
    let mut weights = vec![0.0; n];

    // Triangle with unit area: rising limb 4t/base^2, falling limb
    // 4(base - t)/base^2. Each weight integrates the triangle over one
    // unit interval, split at the apex where needed.
    for (i, weight) in weights.iter_mut().enumerate() {
        let lo = i as f64;
        let hi = ((i + 1) as f64).min(base);
        if hi <= lo {
            continue;
        }

        let mut w = 0.0;
        if lo < half {
            let end = hi.min(half);
            w += 2.0 * (end * end - lo * lo) / (base * base);
        }
        if hi > half {
            let start = lo.max(half);
            w += 4.0 * (hi - start) / base - 2.0 * (hi * hi - start * start) / (base * base);
        }
        *weight = w;
    }

    // Guard against accumulated float error; the analytic weights already
    // sum to 1 up to rounding.
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in &mut weights {
            *w /= total;
        }
    }
    weights
}

/// Spreads this step's groundwater outflow over the routing buffer and
/// takes this step's discharge from the front.
///
/// Returns `(next_buffer, discharge)`. The current step's contribution is
/// included in its own discharge, so `base = 1` routes with no delay.
pub fn route(
    outflow: f64,
    buffer: &[f64; ROUTING_BUFFER_LEN],
    weights: &[f64],
) -> ([f64; ROUTING_BUFFER_LEN], f64) {
    let mut loaded = *buffer;
    for (slot, w) in loaded.iter_mut().zip(weights) {
        *slot += outflow * w;
    }

    let discharge = loaded[0];
    let mut next = [0.0; ROUTING_BUFFER_LEN];
    next[..ROUTING_BUFFER_LEN - 1].copy_from_slice(&loaded[1..]);
    (next, discharge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -- Upper reservoir --

    #[test]
    fn surface_flow_above_threshold() {
        let (surface, inter) = upper_outflows(150.0, 0.2, 0.05, 120.0);
        assert_relative_eq!(surface, 6.0);
        assert_relative_eq!(inter, 7.5);
    }

    #[test]
    fn no_surface_flow_below_threshold() {
        let (surface, inter) = upper_outflows(100.0, 0.2, 0.05, 120.0);
        assert_eq!(surface, 0.0);
        assert_relative_eq!(inter, 5.0);
    }

    // -- Percolation --

    #[test]
    fn percolation_rate_limited() {
        assert_eq!(percolation(100.0, 1.7), 1.7);
    }

    #[test]
    fn percolation_storage_limited() {
        assert_eq!(percolation(0.4, 1.7), 0.4);
    }

    #[test]
    fn percolation_negative_storage_is_zero() {
        assert_eq!(percolation(-1.0, 1.7), 0.0);
    }

    // -- Baseflow --

    #[test]
    fn baseflow_linear() {
        assert_relative_eq!(baseflow(50.0, 0.04), 2.0);
    }

    // -- Triangular weights --

    #[test]
    fn weights_sum_to_one() {
        for base in [1.0, 2.0, 2.5, 3.0, 4.0, 5.5, 7.0] {
            let w = triangular_weights(base);
            assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn base_one_is_identity() {
        let w = triangular_weights(1.0);
        assert_eq!(w.len(), 1);
        assert_relative_eq!(w[0], 1.0);
    }

    #[test]
    fn integer_base_is_symmetric() {
        let w = triangular_weights(4.0);
        assert_relative_eq!(w[0], w[3], epsilon = 1e-12);
        assert_relative_eq!(w[1], w[2], epsilon = 1e-12);
        assert!(w[1] > w[0]);
    }

    #[test]
    fn fractional_base_length() {
        assert_eq!(triangular_weights(2.5).len(), 3);
        assert_eq!(triangular_weights(7.0).len(), 7);
    }

    // -- Routing --

    #[test]
    fn base_one_routes_without_delay() {
        let w = triangular_weights(1.0);
        let buffer = [0.0; ROUTING_BUFFER_LEN];
        let (next, discharge) = route(10.0, &buffer, &w);
        assert_relative_eq!(discharge, 10.0);
        assert_relative_eq!(next.iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn impulse_is_mass_conserving() {
        let w = triangular_weights(3.0);
        let mut buffer = [0.0; ROUTING_BUFFER_LEN];
        let mut total = 0.0;

        let (next, discharge) = route(100.0, &buffer, &w);
        buffer = next;
        total += discharge;
        for _ in 0..10 {
            let (next, discharge) = route(0.0, &buffer, &w);
            buffer = next;
            total += discharge;
        }
        assert_relative_eq!(total, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn impulse_follows_triangle() {
        let w = triangular_weights(3.0);
        let buffer = [0.0; ROUTING_BUFFER_LEN];
        let (buffer, d0) = route(90.0, &buffer, &w);
        let (buffer, d1) = route(0.0, &buffer, &w);
        let (_, d2) = route(0.0, &buffer, &w);
        assert_relative_eq!(d0, 90.0 * w[0], epsilon = 1e-12);
        assert_relative_eq!(d1, 90.0 * w[1], epsilon = 1e-12);
        assert_relative_eq!(d2, 90.0 * w[2], epsilon = 1e-12);
        assert!(d1 > d0);
    }
}

use std::f64::consts::PI;

/// Number of samples used to draw the Bloch-Siegert prediction curve.
pub const PREDICTION_SAMPLES: usize = 300;

/// Distance of each fitted minimum from the unshifted resonance `w0`.
pub fn shift(w0: f64, minima: &[f64]) -> Vec<f64> {
    minima.iter().map(|m| w0 - m).collect()
}

/// `n` evenly spaced values from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Bloch-Siegert shift expected for a linear π pulse of the given width:
/// `(2π / t)² / (16 w0)`.
pub fn bloch_siegert_prediction(pulse_width: f64, w0: f64) -> f64 {
    (2.0 * PI / pulse_width).powi(2) / (16.0 * w0)
}

/// Sampled prediction curve over `[t_min, t_max]`.
pub fn prediction_curve(t_min: f64, t_max: f64, w0: f64) -> Vec<[f64; 2]> {
    linspace(t_min, t_max, PREDICTION_SAMPLES)
        .into_iter()
        .map(|t| [t, bloch_siegert_prediction(t, w0)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_subtracts_from_w0() {
        assert_eq!(shift(10.0, &[9.0, 10.5]), vec![1.0, -0.5]);
        assert!(shift(1.0, &[]).is_empty());
    }

    #[test]
    fn linspace_includes_both_ends() {
        let xs = linspace(1.0, 2.0, 5);
        assert_eq!(xs, vec![1.0, 1.25, 1.5, 1.75, 2.0]);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn prediction_matches_closed_form() {
        // t = 2π makes (2π/t)² == 1
        let value = bloch_siegert_prediction(2.0 * PI, 0.25);
        assert!((value - 0.25).abs() < 1e-12);
    }

    #[test]
    fn prediction_curve_spans_pulse_widths() {
        let curve = prediction_curve(1.0, 6.0, 183.247172);
        assert_eq!(curve.len(), PREDICTION_SAMPLES);
        assert_eq!(curve[0][0], 1.0);
        assert_eq!(curve[PREDICTION_SAMPLES - 1][0], 6.0);
        // shorter pulses shift more
        assert!(curve[0][1] > curve[PREDICTION_SAMPLES - 1][1]);
    }
}

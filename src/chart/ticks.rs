use std::f64::consts::PI;

/// Upper bound on tick marks produced for one axis.
const MAX_MARKS: f64 = 64.0;

/// A grid mark at `value`; `step` is the spacing of the series it belongs to
/// and lets the renderer fade minor marks first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMark {
    pub value: f64,
    pub step: f64,
}

/// Greatest common divisor, `gcd(0, b) == b`.
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Label for `numerator·π/denominator`, reduced to lowest terms.
pub fn pi_fraction_label(numerator: i64, denominator: u64) -> String {
    if numerator == 0 {
        return "0".to_string();
    }
    let denominator = denominator.max(1);
    let divisor = gcd(numerator.unsigned_abs(), denominator);
    let magnitude = numerator.unsigned_abs() / divisor;
    let denominator = denominator / divisor;

    let sign = if numerator < 0 { "-" } else { "" };
    let coefficient = if magnitude == 1 {
        String::new()
    } else {
        magnitude.to_string()
    };

    if denominator == 1 {
        format!("{sign}{coefficient}π")
    } else {
        format!("{sign}{coefficient}π/{denominator}")
    }
}

/// Snap `value` to the closest multiple of π/`denominator` and label it.
pub fn format_pi_tick(value: f64, denominator: u64) -> String {
    let denominator = denominator.max(1);
    let k = (value / (PI / denominator as f64)).round() as i64;
    pi_fraction_label(k, denominator)
}

/// Marks at multiples of π/`denominator` inside `[min, max]`.
///
/// Wide ranges coarsen to halves, then whole multiples of π, then every
/// 2ⁿ-th multiple so an axis never carries more than [`MAX_MARKS`] marks.
/// Every mark stays a multiple of π/`denominator`.
pub fn pi_grid_marks(min: f64, max: f64, denominator: u64) -> Vec<TickMark> {
    if !(min.is_finite() && max.is_finite()) || max < min {
        return Vec::new();
    }

    let mut denominator = denominator.max(1);
    while denominator > 1 && (max - min) / (PI / denominator as f64) > MAX_MARKS {
        denominator = (denominator / 2).max(1);
    }
    let mut step = PI / denominator as f64;
    while (max - min) / step > MAX_MARKS {
        step *= 2.0;
    }

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last)
        .map(|k| {
            let value = k as f64 * step;
            let on_whole_pi = (value / PI - (value / PI).round()).abs() < 1e-9;
            TickMark {
                value,
                step: if on_whole_pi { step.max(PI) } else { step },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(18, 12), 6);
        assert_eq!(gcd(7, 3), 1);
        assert_eq!(gcd(0, 5), 5);
        assert_eq!(gcd(5, 0), 5);
    }

    #[test]
    fn labels_reduce_to_lowest_terms() {
        assert_eq!(pi_fraction_label(0, 4), "0");
        assert_eq!(pi_fraction_label(1, 1), "π");
        assert_eq!(pi_fraction_label(-1, 1), "-π");
        assert_eq!(pi_fraction_label(2, 4), "π/2");
        assert_eq!(pi_fraction_label(4, 2), "2π");
        assert_eq!(pi_fraction_label(3, 2), "3π/2");
        assert_eq!(pi_fraction_label(6, 4), "3π/2");
        assert_eq!(pi_fraction_label(-3, 4), "-3π/4");
        assert_eq!(pi_fraction_label(5, 0), "5π");
    }

    #[test]
    fn ticks_snap_to_nearest_fraction() {
        assert_eq!(format_pi_tick(PI / 2.0, 4), "π/2");
        assert_eq!(format_pi_tick(2.0 * PI + 1e-12, 4), "2π");
        assert_eq!(format_pi_tick(0.78, 4), "π/4");
        assert_eq!(format_pi_tick(-1e-15, 4), "0");
    }

    #[test]
    fn marks_cover_zero_to_two_pi() {
        let marks = pi_grid_marks(0.0, 2.0 * PI, 2);
        let labels: Vec<String> = marks.iter().map(|m| format_pi_tick(m.value, 2)).collect();
        assert_eq!(labels, vec!["0", "π/2", "π", "3π/2", "2π"]);
        assert_eq!(marks[1].step, PI / 2.0);
        assert_eq!(marks[2].step, PI);
    }

    #[test]
    fn wide_ranges_are_coarsened() {
        let marks = pi_grid_marks(0.0, 1000.0, 4);
        assert!(marks.len() as f64 <= MAX_MARKS + 1.0);
        assert!(marks.len() > 4);
        for m in &marks {
            let k = m.value / PI;
            assert!((k - k.round()).abs() < 1e-9, "{} is not a multiple of π", m.value);
        }
    }

    #[test]
    fn invalid_ranges_give_no_marks() {
        assert!(pi_grid_marks(1.0, 0.0, 4).is_empty());
        assert!(pi_grid_marks(f64::NAN, 1.0, 4).is_empty());
    }
}

//! Linear scales and tick placement for the 2D charts.

/// Maps a data interval onto a canvas interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Maps a data value to a canvas coordinate.
    ///
    /// A degenerate domain maps every value to the middle of the range.
    pub fn map(&self, value: f64) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() < f64::EPSILON {
            return (r0 + r1) / 2.0;
        }
        let t = (value - d0) / span;
        r0 + (t as f32) * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

/// Evenly spaced, human-friendly tick positions covering a data interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticks {
    start: f64,
    end: f64,
    step: f64,
}

impl Ticks {
    /// Picks about `target` ticks covering `[min, max]`.
    ///
    /// The first and last tick enclose the interval, so `start()..=end()`
    /// can be used directly as the chart domain.
    pub fn nice(min: f64, max: f64, target: usize) -> Self {
        let (mut min, mut max) = if min <= max { (min, max) } else { (max, min) };
        if (max - min).abs() < f64::EPSILON {
            let pad = if min.abs() > f64::EPSILON { min.abs() * 0.1 } else { 1.0 };
            min -= pad;
            max += pad;
        }

        let range = nice_number(max - min, false);
        let step = nice_number(range / target.max(1) as f64, true);
        Self {
            start: (min / step).floor() * step,
            end: (max / step).ceil() * step,
            step,
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the tick values from `start` to `end` inclusive.
    pub fn values(&self) -> Vec<f64> {
        let count = ((self.end - self.start) / self.step).round() as usize;
        (0..=count)
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }

    /// Formats a tick value with as many decimals as the step needs.
    pub fn label(&self, value: f64) -> String {
        let decimals = (-self.step.log10().floor()).clamp(0.0, 6.0) as usize;
        let text = format!("{value:.decimals$}");
        // Avoid "-0" and "-0.0" labels
        if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
            text.trim_start_matches('-').to_string()
        } else {
            text
        }
    }
}

// Rounds to 1, 2, 5 or 10 times a power of ten
fn nice_number(value: f64, round: bool) -> f64 {
    let exponent = value.log10().floor();
    let fraction = value / 10f64.powf(exponent);
    let nice = if round {
        match fraction {
            f if f < 1.5 => 1.0,
            f if f < 3.0 => 2.0,
            f if f < 7.0 => 5.0,
            _ => 10.0,
        }
    } else {
        match fraction {
            f if f <= 1.0 => 1.0,
            f if f <= 2.0 => 2.0,
            f if f <= 5.0 => 5.0,
            _ => 10.0,
        }
    };
    nice * 10f64.powf(exponent)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_scale_maps_endpoints() {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 300.0));
        assert_approx_eq!(f32, scale.map(0.0), 100.0);
        assert_approx_eq!(f32, scale.map(10.0), 300.0);
        assert_approx_eq!(f32, scale.map(2.5), 150.0);
    }

    #[test]
    fn test_scale_inverted_range() {
        let scale = LinearScale::new((-5.0, 5.0), (200.0, 0.0));
        assert_approx_eq!(f32, scale.map(0.0), 100.0);
        assert_approx_eq!(f32, scale.map(5.0), 0.0);
    }

    #[test]
    fn test_degenerate_scale_maps_to_middle() {
        let scale = LinearScale::new((3.0, 3.0), (0.0, 50.0));
        assert_approx_eq!(f32, scale.map(3.0), 25.0);
    }

    #[test]
    fn test_nice_ticks() {
        let ticks = Ticks::nice(0.0, 36.0, 5);
        assert_approx_eq!(f64, ticks.step(), 10.0);
        assert_approx_eq!(f64, ticks.start(), 0.0);
        assert_approx_eq!(f64, ticks.end(), 40.0);
        assert_eq!(ticks.values().len(), 5);
    }

    #[test]
    fn test_nice_ticks_negative_range() {
        let ticks = Ticks::nice(-1234.0, 870.0, 6);
        assert_approx_eq!(f64, ticks.step(), 1000.0);
        assert_approx_eq!(f64, ticks.start(), -2000.0);
        assert_approx_eq!(f64, ticks.end(), 1000.0);
    }

    #[test]
    fn test_flat_range_is_padded() {
        let ticks = Ticks::nice(0.0, 0.0, 4);
        assert!(ticks.start() < 0.0);
        assert!(ticks.end() > 0.0);
    }

    #[test]
    fn test_labels() {
        let ticks = Ticks::nice(0.0, 1.0, 4);
        assert_eq!(ticks.label(0.4), "0.4");
        let ticks = Ticks::nice(0.0, 100.0, 5);
        assert_eq!(ticks.label(40.0), "40");
        assert_eq!(ticks.label(-0.0), "0");
    }

    proptest! {
        #[test]
        fn prop_ticks_enclose_interval(a in -1.0e5f64..1.0e5, b in -1.0e5f64..1.0e5) {
            let ticks = Ticks::nice(a, b, 5);
            let (lo, hi) = (a.min(b), a.max(b));
            prop_assert!(ticks.start() <= lo + lo.abs() * 1e-12);
            prop_assert!(ticks.end() >= hi - hi.abs() * 1e-12);
            prop_assert!(ticks.values().len() >= 2);
        }
    }
}

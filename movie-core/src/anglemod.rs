//! Inverse solver for the engine's fixed-precision angle quantizer.
//!
//! The source engine stores view angles as 16-bit fixed-point values:
//! `quantize(angle) = floor(angle * 65536 / 360) mod 65536`. Raw mouse
//! counts accumulate as `angle += delta * step` before quantization, and
//! the engine truncates rather than rounds, so the naive
//! `delta = (new - prev) / step` is frequently off by one 16-bit unit.
//! [`resolve_delta`] searches around the naive estimate until the
//! predicted quantized value matches the target exactly.

/// Default angular step per raw mouse count: sensitivity 0.2 times the
/// engine's 0.022 degrees-per-count yaw scale.
pub const DEGREES_PER_COUNT: f64 = 0.2 * 0.022;

/// Quantize an absolute angle to the engine's 16-bit representation.
#[inline]
#[must_use]
pub fn quantize(degrees: f64) -> u16 {
    (((degrees * 65536.0 / 360.0) as i64) & 0xFFFF) as u16
}

/// Snap an absolute angle to the value the engine would actually hold
/// after quantization.
#[inline]
#[must_use]
pub fn angle_mod(degrees: f64) -> f64 {
    (360.0 / 65536.0) * f64::from(quantize(degrees))
}

/// Normalize an angle difference into (-180, 180] degrees.
///
/// A sample may differ from its predecessor by more than 180 degrees
/// only because of wraparound, never because of a real multi-revolution
/// move within one frame.
#[inline]
fn wrap180(mut degrees: f64) -> f64 {
    if degrees < -180.0 {
        degrees += 360.0;
    }
    if degrees > 180.0 {
        degrees -= 360.0;
    }
    degrees
}

/// Find the smallest-magnitude integer mouse delta that moves the
/// quantized angle from `prev_degrees` to exactly `quantize(new_degrees)`.
///
/// Starts from the naive truncated estimate, then nudges by one count at
/// a time, comparing the predicted quantized step against the target
/// with 16-bit wraparound correction. Each nudge strictly reduces the
/// wrap-corrected gap, so the loop terminates; the result is within one
/// count of the naive estimate.
#[must_use]
pub fn resolve_delta(prev_degrees: f64, new_degrees: f64, step: f64) -> i64 {
    let mut delta = (wrap180(new_degrees - prev_degrees) / step) as i64;
    let target = quantize(new_degrees);

    loop {
        let predicted = quantize(delta as f64 * step + angle_mod(prev_degrees));
        if predicted == target {
            return delta;
        }

        let mut gap = i32::from(predicted) - i32::from(target);
        if gap > 32768 {
            gap -= 65536;
        }
        if gap < -32768 {
            gap += 65536;
        }
        delta += if gap > 0 { -1 } else { 1 };
    }
}

/// Per-axis running state for angle resolution.
///
/// The first sample of a stream defines the baseline and yields a zero
/// delta; the state is never reset mid-stream.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuantizerState {
    prev: Option<f64>,
}

impl QuantizerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the delta for the next absolute sample and advance the
    /// baseline.
    pub fn advance(&mut self, degrees: f64, step: f64) -> i64 {
        let delta = match self.prev {
            Some(prev) => resolve_delta(prev, degrees, step),
            None => 0,
        };
        self.prev = Some(degrees);
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_basics() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(360.0), 0);
        assert_eq!(quantize(180.0), 32768);
        assert_eq!(quantize(90.0), 16384);
        // Negative angles wrap into the upper half of the 16-bit range.
        assert_eq!(quantize(-90.0), 49152);
    }

    #[test]
    fn test_resolve_exact_reproduction_dense() {
        // Quantization correctness over a dense sample of angle pairs:
        // feeding the returned delta back through the engine's own
        // formula must reproduce the target quantized angle exactly.
        let step = DEGREES_PER_COUNT;
        let mut prev = 0.0f64;
        let mut angle = 0.0f64;
        while angle < 360.0 {
            let delta = resolve_delta(prev, angle, step);
            let reproduced = quantize(delta as f64 * step + angle_mod(prev));
            assert_eq!(
                reproduced,
                quantize(angle),
                "prev={prev} new={angle} delta={delta}"
            );
            prev = angle;
            angle += 0.73; // coprime-ish stride to hit many residues
        }
    }

    #[test]
    fn test_resolve_minimality() {
        // The correction search never strays more than one count from
        // the naive truncated estimate.
        let step = DEGREES_PER_COUNT;
        let mut angle = 0.05f64;
        let mut prev = 359.4f64;
        while angle < 360.0 {
            let delta = resolve_delta(prev, angle, step);
            let naive = (wrap180(angle - prev) / step) as i64;
            assert!(
                (delta - naive).abs() <= 1,
                "prev={prev} new={angle} delta={delta} naive={naive}"
            );
            prev = angle;
            angle += 1.37;
        }
    }

    #[test]
    fn test_resolve_wraparound_shortest_path() {
        // 350 -> 10 degrees is a +20 degree move, not -340.
        let step = DEGREES_PER_COUNT;
        let delta = resolve_delta(350.0, 10.0, step);
        assert!(delta > 0);
        assert!((delta as f64 * step - 20.0).abs() < 1.0);
    }

    #[test]
    fn test_quantizer_state_first_sample_is_baseline() {
        let mut state = QuantizerState::new();
        assert_eq!(state.advance(10.0, DEGREES_PER_COUNT), 0);
        assert_eq!(state.advance(10.0, DEGREES_PER_COUNT), 0);
        let delta = state.advance(190.0, DEGREES_PER_COUNT);
        // 180 degrees of rotation, reproduced exactly under quantization.
        let reproduced = quantize(delta as f64 * DEGREES_PER_COUNT + angle_mod(10.0));
        assert_eq!(reproduced, quantize(190.0));
    }
}

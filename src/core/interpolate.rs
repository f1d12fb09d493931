/// Piecewise-linear interpolation with clamping at both ends
///
/// Maps `input` from the breakpoints in `input_range` onto the matching
/// breakpoints in `output_range`. Inputs outside the first/last breakpoint
/// clamp to the first/last output value.
///
/// # Arguments
/// * `input` - Value to map
/// * `input_range` - Strictly increasing breakpoints (at least two)
/// * `output_range` - Output value at each breakpoint, same length
///
/// # Returns
/// The interpolated output value
#[inline]
pub fn interpolate(input: f64, input_range: &[f64], output_range: &[f64]) -> f64 {
    debug_assert!(input_range.len() >= 2);
    debug_assert_eq!(input_range.len(), output_range.len());

    let last = input_range.len() - 1;

    if input.is_nan() || input <= input_range[0] {
        return output_range[0];
    }
    if input >= input_range[last] {
        return output_range[last];
    }

    // Find the segment containing the input
    let segment = input_range
        .windows(2)
        .position(|w| input >= w[0] && input <= w[1])
        .unwrap_or(last - 1);

    let (in_lo, in_hi) = (input_range[segment], input_range[segment + 1]);
    let (out_lo, out_hi) = (output_range[segment], output_range[segment + 1]);

    let span = in_hi - in_lo;
    if span <= 0.0 {
        return out_hi;
    }

    out_lo + (input - in_lo) / span * (out_hi - out_lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_midpoints() {
        let value = interpolate(100.0, &[-200.0, 0.0, 200.0], &[-12.0, 0.0, 12.0]);
        assert!((value - 6.0).abs() < 1e-9, "Expected 6.0, got {}", value);

        let value = interpolate(-50.0, &[-200.0, 0.0, 200.0], &[-12.0, 0.0, 12.0]);
        assert!((value + 3.0).abs() < 1e-9, "Expected -3.0, got {}", value);
    }

    #[test]
    fn test_interpolate_clamps() {
        assert_eq!(interpolate(1000.0, &[-300.0, 0.0, 300.0], &[-60.0, 0.0, 60.0]), 60.0);
        assert_eq!(interpolate(-1000.0, &[-300.0, 0.0, 300.0], &[-60.0, 0.0, 60.0]), -60.0);
    }

    #[test]
    fn test_interpolate_uneven_segments() {
        // Two segments with different slopes
        let inputs = [0.0, 100.0, 200.0];
        let outputs = [0.0, 0.8, 1.0];

        assert!((interpolate(50.0, &inputs, &outputs) - 0.4).abs() < 1e-9);
        assert!((interpolate(150.0, &inputs, &outputs) - 0.9).abs() < 1e-9);
        assert_eq!(interpolate(100.0, &inputs, &outputs), 0.8);
    }

    #[test]
    fn test_interpolate_nan_maps_to_first_output() {
        assert_eq!(interpolate(f64::NAN, &[0.0, 1.0], &[5.0, 10.0]), 5.0);
    }
}

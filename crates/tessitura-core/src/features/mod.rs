pub mod mel;
pub mod mfcc;
pub mod onset;
pub mod spectral;

/// Min / max / arithmetic mean over a descriptor sequence.
/// `None` for an empty sequence.
pub fn summarize(values: &[f32]) -> Option<(f32, f32, f32)> {
    if values.is_empty() {
        return None;
    }
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    let mut sum = 0.0f64;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v as f64;
    }
    let mean = (sum / values.len() as f64) as f32;
    Some((min, max, mean))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_orders_min_mean_max() {
        let (min, max, mean) = summarize(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(min, 1.0);
        assert_eq!(max, 3.0);
        assert!((mean - 2.0).abs() < 1e-6);
    }

    #[test]
    fn summarize_empty_is_none() {
        assert!(summarize(&[]).is_none());
    }
}

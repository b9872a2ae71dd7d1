/// Largest magnitude of a pass, floored to 1 so normalization never divides by zero.
pub fn magnitude_ceiling<I>(magnitudes: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    magnitudes
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(1.0_f64, f64::max)
}

pub fn normalize(magnitude: f64, ceiling: f64) -> f64 {
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return 0.0;
    }
    (magnitude / ceiling.max(1.0)).clamp(0.0, 1.0)
}

pub fn scaled_radius(magnitude: f64, ceiling: f64, r_min: f64, r_max: f64) -> f64 {
    r_min + normalize(magnitude, ceiling) * (r_max - r_min)
}

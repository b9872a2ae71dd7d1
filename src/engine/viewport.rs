use tracing::trace;

use super::model::Viewport;

const DEFAULT_THRESHOLD: f64 = 1.0;
const MIN_EXTENT: f64 = 1.0;

/// Turns raw container measurements into a stable layout frame.
///
/// The first measurement is always emitted so the initial frame is never
/// zero-sized; afterwards only changes of at least `threshold` pixels are.
#[derive(Clone, Debug)]
pub struct ViewportTracker {
    current: Option<Viewport>,
    threshold: f64,
    fixed_height: Option<f64>,
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self {
            current: None,
            threshold: DEFAULT_THRESHOLD,
            fixed_height: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = if threshold.is_finite() {
            threshold.max(0.0)
        } else {
            DEFAULT_THRESHOLD
        };
        self
    }

    pub fn with_fixed_height(mut self, height: f64) -> Self {
        self.fixed_height = Some(height);
        self
    }

    pub fn current(&self) -> Option<Viewport> {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn observe(&mut self, width: f64, height: f64) -> Option<Viewport> {
        let measured = self.measure(width, height);

        if let Some(previous) = self.current {
            let width_delta = (measured.width - previous.width).abs();
            let height_delta = (measured.height - previous.height).abs();
            let crossed_degenerate = measured.is_degenerate() != previous.is_degenerate();
            if !crossed_degenerate && width_delta < self.threshold && height_delta < self.threshold
            {
                return None;
            }
        }

        trace!(
            width = measured.width,
            height = measured.height,
            "viewport changed"
        );
        self.current = Some(measured);
        Some(measured)
    }

    fn measure(&self, width: f64, height: f64) -> Viewport {
        let height = self.fixed_height.unwrap_or(height);
        let width = floor_extent(width);
        let height = floor_extent(height);

        if width < MIN_EXTENT || height < MIN_EXTENT {
            Viewport::ZERO
        } else {
            Viewport::new(width, height)
        }
    }
}

fn floor_extent(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0).floor()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_measurement_is_always_emitted() {
        let mut tracker = ViewportTracker::new();
        assert_eq!(tracker.observe(640.4, 480.9), Some(Viewport::new(640.0, 480.0)));
        assert_eq!(tracker.current(), Some(Viewport::new(640.0, 480.0)));
    }

    #[test]
    fn sub_pixel_jitter_is_ignored() {
        let mut tracker = ViewportTracker::new();
        tracker.observe(640.0, 480.0);
        assert_eq!(tracker.observe(640.7, 480.3), None);
        assert_eq!(tracker.observe(642.0, 480.0), Some(Viewport::new(642.0, 480.0)));
    }

    #[test]
    fn hidden_container_reports_zero_viewport() {
        let mut tracker = ViewportTracker::new();
        let viewport = tracker.observe(0.0, 300.0).unwrap();
        assert!(viewport.is_degenerate());
        assert_eq!(tracker.observe(f64::NAN, -4.0), None);

        let shown = tracker.observe(800.0, 300.0).unwrap();
        assert!(!shown.is_degenerate());
    }

    #[test]
    fn fixed_height_ignores_measured_height() {
        let mut tracker = ViewportTracker::new().with_fixed_height(420.0);
        assert_eq!(tracker.observe(500.0, 10.0), Some(Viewport::new(500.0, 420.0)));
        assert_eq!(tracker.observe(500.0, 900.0), None);
    }

    #[test]
    fn larger_threshold_suppresses_small_changes() {
        let mut tracker = ViewportTracker::new().with_threshold(8.0);
        tracker.observe(500.0, 500.0);
        assert_eq!(tracker.observe(506.0, 500.0), None);
        assert!(tracker.observe(509.0, 500.0).is_some());
    }

    #[test]
    fn reset_forgets_previous_measurement() {
        let mut tracker = ViewportTracker::new();
        tracker.observe(500.0, 500.0);
        tracker.reset();
        assert!(tracker.observe(500.0, 500.0).is_some());
    }
}

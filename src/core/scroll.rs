/// Scroll-position owner as seen by the timeline core.
///
/// Mirrors a toolkit scrollbar: the core reads the value and bounds and
/// requests writes, and the owner clamps every write into `[minimum, maximum]`.
pub trait ScrollPort {
    fn value(&self) -> f64;
    fn minimum(&self) -> f64;
    fn maximum(&self) -> f64;

    /// Writes a clamped value and returns the value actually applied.
    fn set_value(&mut self, value: f64) -> f64;
}

/// Headless vertical scroll container.
///
/// Used by the engine directly and by toolkit adapters that paint the
/// viewport themselves instead of embedding a native scrolled window. The
/// value is a whole pixel offset: writes are clamped, then truncated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    value: f64,
    content_height: f64,
    viewport_height: f64,
}

impl ScrollState {
    #[must_use]
    pub fn new(content_height: f64, viewport_height: f64) -> Self {
        Self {
            value: 0.0,
            content_height: content_height.max(0.0),
            viewport_height: viewport_height.max(0.0),
        }
    }

    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Updates the scroll extent and re-clamps the current value.
    pub fn set_extent(&mut self, content_height: f64, viewport_height: f64) {
        self.content_height = content_height.max(0.0);
        self.viewport_height = viewport_height.max(0.0);
        self.value = self.value.clamp(self.minimum(), self.maximum()).trunc();
    }
}

impl ScrollPort for ScrollState {
    fn value(&self) -> f64 {
        self.value
    }

    fn minimum(&self) -> f64 {
        0.0
    }

    fn maximum(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    fn set_value(&mut self, value: f64) -> f64 {
        if value.is_nan() {
            return self.value;
        }
        self.value = value.clamp(self.minimum(), self.maximum()).trunc();
        self.value
    }
}

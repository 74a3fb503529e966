use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::ScrollPort;
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
    Coasting,
    /// A long press picked a time; pointer moves adjust it instead of scrolling.
    /// Reported by the engine, never by `InertialScroll` itself.
    Selecting,
}

/// Tuning for drag velocity estimation and post-release coasting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InertiaConfig {
    /// Weight kept from the previous velocity estimate on every pointer move.
    pub smoothing_keep: f64,
    /// Coasting starts above, and stops below, this speed (px/ms).
    pub stop_threshold: f64,
    /// Deceleration in px/ms².
    pub decel_rate: f64,
    /// Coast tick period in milliseconds.
    pub tick_interval_ms: f64,
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            smoothing_keep: 0.6,
            stop_threshold: 0.02,
            decel_rate: 0.0028,
            tick_interval_ms: 16.0,
        }
    }
}

impl InertiaConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.smoothing_keep.is_finite() || !(0.0..1.0).contains(&self.smoothing_keep) {
            return Err(TimelineError::InvalidConfig(
                "inertia smoothing_keep must be finite and in [0, 1)".to_owned(),
            ));
        }
        if !self.stop_threshold.is_finite() || self.stop_threshold <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "inertia stop_threshold must be finite and > 0".to_owned(),
            ));
        }
        if !self.decel_rate.is_finite() || self.decel_rate <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "inertia decel_rate must be finite and > 0".to_owned(),
            ));
        }
        if !self.tick_interval_ms.is_finite() || self.tick_interval_ms <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "inertia tick_interval_ms must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Live pointer-drag bookkeeping; exists only between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragGestureState {
    pub start_pointer_y: f64,
    pub start_scroll_value: f64,
    pub last_pointer_y: f64,
    pub last_timestamp_ms: u64,
    /// Smoothed scroll velocity in px/ms (positive scrolls content up).
    pub smoothed_velocity: f64,
}

/// Coast state carried over from a release with enough velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InertiaState {
    pub velocity: f64,
    pub decel_rate: f64,
}

/// Result of one coast tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoastStep {
    /// Nothing to do: the controller is not coasting.
    Inactive,
    /// Scroll advanced and coasting continues.
    Moved { value: f64 },
    /// Velocity was already under the stop threshold; nothing was written.
    Settled { value: f64 },
    /// The projected value left the scroll bounds; scroll pinned to the bound.
    HaltedAtBound { value: f64 },
}

impl CoastStep {
    /// Whether this tick wrote a new scroll value.
    #[must_use]
    pub fn moved(self) -> bool {
        matches!(self, Self::Moved { .. } | Self::HaltedAtBound { .. })
    }
}

/// Drag-to-scroll state machine with velocity estimation and inertia.
///
/// `Idle -> Dragging -> (Idle | Coasting) -> Idle`. A press at any point
/// cancels an active coast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertialScroll {
    config: InertiaConfig,
    drag: Option<DragGestureState>,
    inertia: Option<InertiaState>,
}

impl Default for InertialScroll {
    fn default() -> Self {
        Self::new(InertiaConfig::default())
    }
}

impl InertialScroll {
    #[must_use]
    pub fn new(config: InertiaConfig) -> Self {
        Self {
            config,
            drag: None,
            inertia: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> InertiaConfig {
        self.config
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.drag.is_some() {
            InteractionMode::Dragging
        } else if self.inertia.is_some() {
            InteractionMode::Coasting
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn drag_state(&self) -> Option<DragGestureState> {
        self.drag
    }

    #[must_use]
    pub fn inertia_state(&self) -> Option<InertiaState> {
        self.inertia
    }

    /// Current velocity in px/ms, whether dragging or coasting.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        match (self.drag, self.inertia) {
            (Some(drag), _) => drag.smoothed_velocity,
            (None, Some(inertia)) => inertia.velocity,
            (None, None) => 0.0,
        }
    }

    pub fn pointer_down<S: ScrollPort + ?Sized>(
        &mut self,
        pointer_y: f64,
        timestamp_ms: u64,
        scroll: &S,
    ) {
        if self.inertia.take().is_some() {
            debug!("coast cancelled by pointer press");
        }
        self.drag = Some(DragGestureState {
            start_pointer_y: pointer_y,
            start_scroll_value: scroll.value(),
            last_pointer_y: pointer_y,
            last_timestamp_ms: timestamp_ms,
            smoothed_velocity: 0.0,
        });
    }

    /// Applies a drag move and returns the scroll value written, or `None`
    /// when no drag is active.
    pub fn pointer_move<S: ScrollPort + ?Sized>(
        &mut self,
        pointer_y: f64,
        timestamp_ms: u64,
        scroll: &mut S,
    ) -> Option<f64> {
        let keep = self.config.smoothing_keep;
        let drag = self.drag.as_mut()?;

        let applied = scroll.set_value(drag.start_scroll_value - (pointer_y - drag.start_pointer_y));

        let dt_ms = timestamp_ms.saturating_sub(drag.last_timestamp_ms).max(1) as f64;
        let sample = -(pointer_y - drag.last_pointer_y) / dt_ms;
        drag.smoothed_velocity = drag.smoothed_velocity * keep + sample * (1.0 - keep);
        drag.last_pointer_y = pointer_y;
        drag.last_timestamp_ms = timestamp_ms;

        Some(applied)
    }

    /// Ends the drag and decides whether to coast.
    pub fn pointer_up(&mut self) -> InteractionMode {
        let Some(drag) = self.drag.take() else {
            return self.mode();
        };

        if drag.smoothed_velocity.abs() > self.config.stop_threshold {
            debug!(velocity = drag.smoothed_velocity, "coast started");
            self.inertia = Some(InertiaState {
                velocity: drag.smoothed_velocity,
                decel_rate: self.config.decel_rate,
            });
        }
        self.mode()
    }

    /// Starts coasting with a signed velocity in px/ms, ending any drag.
    ///
    /// Speeds at or under the stop threshold leave the controller idle.
    pub fn start_coast(&mut self, velocity: f64) -> InteractionMode {
        self.drag = None;
        self.inertia = (velocity.is_finite() && velocity.abs() > self.config.stop_threshold)
            .then_some(InertiaState {
                velocity,
                decel_rate: self.config.decel_rate,
            });
        self.mode()
    }

    /// Moves the drag origin by `delta` pixels of scroll.
    ///
    /// Called when the window manager compensates scroll mid-drag so the next
    /// pointer move continues from the compensated position.
    pub fn rebase(&mut self, delta: f64) {
        if let Some(drag) = self.drag.as_mut() {
            drag.start_scroll_value += delta;
        }
    }

    pub fn cancel(&mut self) {
        self.drag = None;
        self.inertia = None;
    }

    /// Advances one coast tick.
    ///
    /// A tick that starts under the stop threshold ends the coast without
    /// writing, so a coast from `v0` lasts `ceil(v0 / (decel_rate * interval))`
    /// ticks including the settling one.
    pub fn tick<S: ScrollPort + ?Sized>(&mut self, scroll: &mut S) -> CoastStep {
        let Some(inertia) = self.inertia.as_mut() else {
            return CoastStep::Inactive;
        };

        if inertia.velocity.abs() < self.config.stop_threshold {
            self.inertia = None;
            let value = scroll.value();
            debug!(value, "coast settled");
            return CoastStep::Settled { value };
        }

        let interval = self.config.tick_interval_ms;
        let projected = scroll.value() + inertia.velocity * interval;
        if projected < scroll.minimum() || projected > scroll.maximum() {
            let value = scroll.set_value(projected);
            self.inertia = None;
            debug!(value, "coast halted at scroll bound");
            return CoastStep::HaltedAtBound { value };
        }

        let value = scroll.set_value(projected);
        let step = inertia.decel_rate * interval;
        inertia.velocity = if inertia.velocity > 0.0 {
            (inertia.velocity - step).max(0.0)
        } else {
            (inertia.velocity + step).min(0.0)
        };
        trace!(value, velocity = inertia.velocity, "coast tick");
        CoastStep::Moved { value }
    }
}

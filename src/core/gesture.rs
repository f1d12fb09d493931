use serde::{Deserialize, Serialize};

use crate::core::interpolate::interpolate;

/// Movement (in either axis) a touch must exceed before it counts as a drag
pub const DEFAULT_DEADZONE: f64 = 5.0;
/// Fraction of the viewport width a card must travel to be decided
pub const DEFAULT_THRESHOLD_RATIO: f64 = 0.25;
/// Minimum offset for a fast flick to be decided below the threshold
pub const DEFAULT_FLICK_MIN_OFFSET: f64 = 50.0;
/// Minimum release velocity for a fast flick
pub const DEFAULT_FLICK_MIN_VELOCITY: f64 = 0.5;
/// How far past the viewport edge an exiting card is sent
pub const DEFAULT_EXIT_OVERSHOOT: f64 = 100.0;
/// Card tilt at half the viewport width, in degrees
pub const DEFAULT_MAX_ROTATION_DEG: f64 = 12.0;

/// Vertical drag range and the damped range it is compressed into
const VERTICAL_DRAG_RANGE: f64 = 300.0;
const VERTICAL_DAMPED_RANGE: f64 = 60.0;
/// Share of the release vertical offset kept by an exiting card
const EXIT_VERTICAL_DRIFT: f64 = 0.5;
/// Indicator intensity when the offset sits exactly on the threshold
const INDICATOR_AT_THRESHOLD: f64 = 0.8;
const INDICATOR_MIN_SCALE: f64 = 0.5;

pub const EXIT_SPRING: Spring = Spring { tension: 65.0, friction: 8.0 };
pub const RETURN_SPRING: Spring = Spring { tension: 50.0, friction: 7.0 };
pub const EXIT_FADE_MS: u64 = 200;

/// Thresholds for interpreting a swipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    pub viewport_width: f64,
    pub deadzone: f64,
    pub threshold_ratio: f64,
    pub flick_min_offset: f64,
    pub flick_min_velocity: f64,
    pub exit_overshoot: f64,
    pub max_rotation_deg: f64,
}

impl GestureConfig {
    pub fn with_viewport_width(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            ..Self::default()
        }
    }

    /// Horizontal offset at which a card is decided regardless of velocity
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.viewport_width * self.threshold_ratio
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.viewport_width / 2.0
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            viewport_width: 400.0,
            deadzone: DEFAULT_DEADZONE,
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
            flick_min_offset: DEFAULT_FLICK_MIN_OFFSET,
            flick_min_velocity: DEFAULT_FLICK_MIN_VELOCITY,
            exit_overshoot: DEFAULT_EXIT_OVERSHOOT,
            max_rotation_deg: DEFAULT_MAX_ROTATION_DEG,
        }
    }
}

/// Terminal decision of a completed gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accept,
    Reject,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Idle,
    Dragging,
    Returning,
    AcceptExit,
    RejectExit,
}

impl GesturePhase {
    pub fn is_exiting(self) -> bool {
        matches!(self, GesturePhase::AcceptExit | GesturePhase::RejectExit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x: sanitize(x), y: sanitize(y) }
    }
}

/// Spring parameters handed to the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub tension: f64,
    pub friction: f64,
}

/// Animation the renderer should run after a release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    /// Fly off-screen while fading out
    Exit {
        target: Vector,
        velocity: Vector,
        spring: Spring,
        #[serde(rename = "fadeTo")]
        fade_to: f64,
        #[serde(rename = "fadeMs")]
        fade_ms: u64,
    },
    /// Spring back to the origin
    Return {
        target: Vector,
        velocity: Vector,
        spring: Spring,
    },
}

/// Render parameters derived from the current offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualSignals {
    #[serde(rename = "translateX")]
    pub translate_x: f64,
    #[serde(rename = "translateY")]
    pub translate_y: f64,
    #[serde(rename = "rotationDeg")]
    pub rotation_deg: f64,
    #[serde(rename = "likeOpacity")]
    pub like_opacity: f64,
    #[serde(rename = "likeScale")]
    pub like_scale: f64,
    #[serde(rename = "passOpacity")]
    pub pass_opacity: f64,
    #[serde(rename = "passScale")]
    pub pass_scale: f64,
    #[serde(rename = "cardOpacity")]
    pub card_opacity: f64,
}

/// Result of releasing a drag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub decision: Decision,
    /// `None` when the release was ignored because the card is already leaving
    pub motion: Option<Motion>,
}

/// Ephemeral per-card gesture state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureState {
    pub phase: GesturePhase,
    pub offset: Vector,
    pub velocity: Vector,
    pub card_opacity: f64,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            phase: GesturePhase::Idle,
            offset: Vector::ZERO,
            velocity: Vector::ZERO,
            card_opacity: 1.0,
        }
    }
}

#[inline]
fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-f64::MAX, f64::MAX)
    }
}

/// Decide a release from its horizontal offset and velocity
///
/// Accept when the offset reaches the threshold, or when a fast flick
/// (offset past `flick_min_offset` and velocity past `flick_min_velocity`)
/// points right. Reject mirrors this to the left. Anything else cancels.
#[inline]
pub fn decide(config: &GestureConfig, dx: f64, vx: f64) -> Decision {
    let dx = sanitize(dx);
    let vx = sanitize(vx);
    let threshold = config.threshold();

    if dx == 0.0 {
        return Decision::Cancel;
    }

    if dx >= threshold || (dx > config.flick_min_offset && vx > config.flick_min_velocity) {
        Decision::Accept
    } else if dx <= -threshold || (dx < -config.flick_min_offset && vx < -config.flick_min_velocity) {
        Decision::Reject
    } else {
        Decision::Cancel
    }
}

/// Compute render parameters for a card at `offset`
pub fn visual_signals(config: &GestureConfig, offset: Vector, card_opacity: f64) -> VisualSignals {
    let half = config.half_width();
    let threshold = config.threshold();
    let dx = offset.x;

    VisualSignals {
        translate_x: dx,
        translate_y: interpolate(
            offset.y,
            &[-VERTICAL_DRAG_RANGE, 0.0, VERTICAL_DRAG_RANGE],
            &[-VERTICAL_DAMPED_RANGE, 0.0, VERTICAL_DAMPED_RANGE],
        ),
        rotation_deg: interpolate(
            dx,
            &[-half, 0.0, half],
            &[-config.max_rotation_deg, 0.0, config.max_rotation_deg],
        ),
        like_opacity: interpolate(dx, &[0.0, threshold, half], &[0.0, INDICATOR_AT_THRESHOLD, 1.0]),
        like_scale: interpolate(
            dx,
            &[0.0, threshold, half],
            &[INDICATOR_MIN_SCALE, INDICATOR_AT_THRESHOLD, 1.0],
        ),
        pass_opacity: interpolate(dx, &[-half, -threshold, 0.0], &[1.0, INDICATOR_AT_THRESHOLD, 0.0]),
        pass_scale: interpolate(
            dx,
            &[-half, -threshold, 0.0],
            &[1.0, INDICATOR_AT_THRESHOLD, INDICATOR_MIN_SCALE],
        ),
        card_opacity,
    }
}

/// Turns the drag stream of the topmost card into a decision and a motion
///
/// One interpreter serves the whole deck: once an exit or return animation
/// completes the state resets and the next card reuses it. Not reentrant;
/// feed it one gesture at a time.
#[derive(Debug, Clone)]
pub struct SwipeInterpreter {
    config: GestureConfig,
    state: GestureState,
}

impl SwipeInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::default(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn phase(&self) -> GesturePhase {
        self.state.phase
    }

    /// Current render parameters
    pub fn signals(&self) -> VisualSignals {
        visual_signals(&self.config, self.state.offset, self.state.card_opacity)
    }

    /// Feed a cumulative drag offset
    ///
    /// Movement inside the deadzone keeps the card idle so taps are not
    /// read as drags. Updates are ignored while the card is exiting.
    pub fn on_drag_update(&mut self, dx: f64, dy: f64) -> VisualSignals {
        let offset = Vector::new(dx, dy);

        match self.state.phase {
            GesturePhase::Idle | GesturePhase::Returning => {
                if offset.x.abs() > self.config.deadzone || offset.y.abs() > self.config.deadzone {
                    self.state.phase = GesturePhase::Dragging;
                    self.state.offset = offset;
                }
            }
            GesturePhase::Dragging => {
                self.state.offset = offset;
            }
            GesturePhase::AcceptExit | GesturePhase::RejectExit => {}
        }

        self.signals()
    }

    /// Release the drag and decide the card
    pub fn on_drag_release(&mut self, dx: f64, dy: f64, vx: f64, vy: f64) -> Release {
        self.release_with(dx, dy, vx, vy, |_| {})
    }

    /// Release the drag, invoking `on_decision` for Accept/Reject
    ///
    /// The callback runs exactly once, synchronously, before the exit motion
    /// is returned, so deck advancement happens before the animation starts.
    pub fn release_with<F>(&mut self, dx: f64, dy: f64, vx: f64, vy: f64, on_decision: F) -> Release
    where
        F: FnOnce(Decision),
    {
        if self.state.phase.is_exiting() {
            return Release {
                decision: Decision::Cancel,
                motion: None,
            };
        }

        self.on_drag_update(dx, dy);
        let velocity = Vector::new(vx, vy);
        self.state.velocity = velocity;

        let decision = if self.state.phase == GesturePhase::Dragging {
            decide(&self.config, self.state.offset.x, velocity.x)
        } else {
            Decision::Cancel
        };

        let motion = match decision {
            Decision::Accept | Decision::Reject => {
                let direction = if decision == Decision::Accept { 1.0 } else { -1.0 };
                self.state.phase = if decision == Decision::Accept {
                    GesturePhase::AcceptExit
                } else {
                    GesturePhase::RejectExit
                };

                on_decision(decision);

                self.state.card_opacity = 0.0;
                Motion::Exit {
                    target: Vector::new(
                        direction * (self.config.viewport_width + self.config.exit_overshoot),
                        self.state.offset.y * EXIT_VERTICAL_DRIFT,
                    ),
                    velocity,
                    spring: EXIT_SPRING,
                    fade_to: 0.0,
                    fade_ms: EXIT_FADE_MS,
                }
            }
            Decision::Cancel => {
                self.state.phase = GesturePhase::Returning;
                Motion::Return {
                    target: Vector::ZERO,
                    velocity,
                    spring: RETURN_SPRING,
                }
            }
        };

        tracing::trace!("Swipe released at dx={:.1}: {:?}", self.state.offset.x, decision);

        Release {
            decision,
            motion: Some(motion),
        }
    }

    /// The renderer finished the release animation
    pub fn complete_animation(&mut self) {
        match self.state.phase {
            GesturePhase::Returning | GesturePhase::AcceptExit | GesturePhase::RejectExit => self.reset(),
            GesturePhase::Idle | GesturePhase::Dragging => {}
        }
    }

    /// Drop any in-flight gesture, e.g. when the card is replaced
    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }
}

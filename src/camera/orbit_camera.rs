use crate::math::{Matrix4, Point, Point2, Real, Vector};
use std::f32::consts::PI;

/// Parameters controlling how fast the camera reacts to the pointer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrbitCameraSettings {
    /// Radians of rotation per pixel of pointer motion while orbiting.
    ///
    /// Default: 0.01
    pub rotation_rate: Real,
    /// World units of translation per pixel of pointer motion while panning.
    ///
    /// Default: 0.001
    pub translation_rate: Real,
    /// Fraction of the eye-to-target distance travelled per scroll unit.
    ///
    /// Default: 0.005
    pub scroll_rate: Real,
    /// The absolute value of the pitch never exceeds this angle.
    ///
    /// Default: 0.49π
    pub pitch_limit: Real,
}

impl Default for OrbitCameraSettings {
    fn default() -> Self {
        Self {
            rotation_rate: 0.01,
            translation_rate: 0.001,
            scroll_rate: 0.005,
            pitch_limit: 0.49 * PI,
        }
    }
}

/// A pointer button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Usually the left button. Pans the camera.
    Primary,
    /// Usually the wheel button. Does nothing.
    Middle,
    /// Usually the right button. Orbits around the target.
    Secondary,
}

/// A pointer event, with positions in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CameraEvent {
    /// A button was pressed with the cursor at `(x, y)`.
    ButtonPressed {
        /// The pressed button.
        button: MouseButton,
        /// The cursor abscissa.
        x: Real,
        /// The cursor ordinate, growing downward.
        y: Real,
    },
    /// Any pressed button was released.
    ButtonReleased,
    /// The cursor moved to `(x, y)`.
    CursorMoved {
        /// The cursor abscissa.
        x: Real,
        /// The cursor ordinate, growing downward.
        y: Real,
    },
    /// The wheel was scrolled. Positive values move toward the target.
    Scrolled {
        /// The scroll amount, in wheel units.
        delta: Real,
    },
}

/// The camera configuration at the moment a drag started.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragAnchor {
    /// The cursor position when the button was pressed.
    pub cursor: Point2<Real>,
    /// The eye position when the button was pressed.
    pub eye: Point<Real>,
    /// The target position when the button was pressed.
    pub lookat: Point<Real>,
    /// The yaw when the button was pressed.
    pub yaw: Real,
    /// The pitch when the button was pressed.
    pub pitch: Real,
}

/// What the pointer is currently doing to the camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CameraMode {
    /// No drag in progress.
    Idle,
    /// Panning the eye and the target together.
    Translating(DragAnchor),
    /// Rotating the eye around the target.
    Orbiting(DragAnchor),
}

/// The full state of an orbit camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraState {
    /// The position of the camera.
    pub eye: Point<Real>,
    /// The point the camera looks at.
    pub lookat: Point<Real>,
    /// The up direction.
    pub up: Vector<Real>,
    /// Rotation around the vertical axis, in radians.
    pub yaw: Real,
    /// Elevation angle, in radians.
    pub pitch: Real,
    /// The drag in progress.
    pub mode: CameraMode,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            eye: Point::new(0.0, 0.0, -1.0),
            lookat: Point::origin(),
            up: Vector::y(),
            yaw: PI,
            pitch: 0.0,
            mode: CameraMode::Idle,
        }
    }
}

impl CameraState {
    /// The right-handed view matrix of this camera.
    pub fn view_matrix(&self) -> Matrix4<Real> {
        Matrix4::look_at_rh(&self.eye, &self.lookat, &self.up)
    }

    fn anchor(&self, x: Real, y: Real) -> DragAnchor {
        DragAnchor {
            cursor: Point2::new(x, y),
            eye: self.eye,
            lookat: self.lookat,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }
}

/// Computes the camera state resulting from `event`.
pub fn update(
    state: &CameraState,
    event: &CameraEvent,
    settings: &OrbitCameraSettings,
) -> CameraState {
    let mut result = *state;

    match *event {
        CameraEvent::ButtonPressed { button, x, y } => {
            let anchor = state.anchor(x, y);
            result.mode = match button {
                MouseButton::Primary => CameraMode::Translating(anchor),
                MouseButton::Secondary => CameraMode::Orbiting(anchor),
                MouseButton::Middle => CameraMode::Idle,
            };
        }
        CameraEvent::ButtonReleased => result.mode = CameraMode::Idle,
        CameraEvent::CursorMoved { x, y } => match state.mode {
            CameraMode::Idle => {}
            CameraMode::Translating(anchor) => {
                let dx = x - anchor.cursor.x;
                let dy = y - anchor.cursor.y;
                let t = settings.translation_rate;

                let front = (anchor.lookat - anchor.eye).normalize();
                let right = front.cross(&state.up).normalize();
                let up = right.cross(&front).normalize();
                let offset = right * (dx * t) - up * (dy * t);

                result.eye = anchor.eye - offset;
                result.lookat = anchor.lookat - offset;
            }
            CameraMode::Orbiting(anchor) => {
                let dx = x - anchor.cursor.x;
                let dy = y - anchor.cursor.y;
                let rot = settings.rotation_rate;

                result.pitch = (anchor.pitch - dy * rot)
                    .clamp(-settings.pitch_limit, settings.pitch_limit);
                result.yaw = anchor.yaw - dx * rot;

                let distance = (anchor.lookat - anchor.eye).norm();
                let (sin_yaw, cos_yaw) = result.yaw.sin_cos();
                let (sin_pitch, cos_pitch) = result.pitch.sin_cos();
                let dir = Vector::new(sin_yaw * cos_pitch, -sin_pitch, cos_yaw * cos_pitch);

                result.eye = anchor.lookat + dir * distance;
                result.lookat = anchor.lookat;
            }
        },
        CameraEvent::Scrolled { delta } => {
            result.eye += (state.lookat - state.eye) * (delta * 10.0 * settings.scroll_rate);
        }
    }

    result
}

/// An orbit camera owning its state and settings, to be driven by an event loop.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OrbitCamera {
    /// The current state.
    pub state: CameraState,
    /// The pointer sensitivity.
    pub settings: OrbitCameraSettings,
}

impl OrbitCamera {
    /// A camera at `eye` looking at `lookat`, with the default settings.
    pub fn new(eye: Point<Real>, lookat: Point<Real>) -> Self {
        Self {
            state: CameraState {
                eye,
                lookat,
                ..Default::default()
            },
            settings: OrbitCameraSettings::default(),
        }
    }

    /// Updates the camera with a pointer event.
    pub fn handle(&mut self, event: CameraEvent) {
        self.state = update(&self.state, &event, &self.settings);
    }

    /// The current view matrix.
    pub fn view_matrix(&self) -> Matrix4<Real> {
        self.state.view_matrix()
    }
}

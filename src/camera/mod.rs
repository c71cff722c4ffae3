//! A mouse-driven orbit camera for inspecting voxel sets.
//!
//! The camera is a pure state machine: window events are translated into
//! [`CameraEvent`]s and folded into a [`CameraState`] with [`update`]. No window or
//! rendering backend is involved.

pub use self::orbit_camera::{
    update, CameraEvent, CameraMode, CameraState, DragAnchor, MouseButton, OrbitCamera,
    OrbitCameraSettings,
};

mod orbit_camera;

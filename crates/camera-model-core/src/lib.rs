//! Core abstractions for camera-model.
//!
//! This crate provides the CPU side of the viewer:
//! - [`PinholeCamera`] with a 6-DOF pose and adjustable focal length
//! - [`Canvas`] software rasterizer (antialiased lines, points, HUD text)
//! - [`SceneObject`] trait and the [`Scene`] that owns objects
//! - [`FrameBuffers`] double buffer shared between the render and UI threads
//! - Configuration options and camera controls

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Pixel math converts between f32 and integer coordinates all over the rasterizer
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod camera;
pub mod canvas;
pub mod color;
pub mod controls;
pub mod error;
pub mod frame;
pub mod hud;
pub mod object;
pub mod options;
pub mod scene;

pub use camera::PinholeCamera;
pub use canvas::Canvas;
pub use color::Color;
pub use controls::{Axis, CameraCommand};
pub use error::{CameraModelError, Result};
pub use frame::{FrameBuffers, FrameClock};
pub use hud::CameraInfo;
pub use object::{Line, Point, SceneObject, WireBox};
pub use options::Options;
pub use scene::{ObjectId, Scene, SceneDescription};

// Re-export glam types for convenience
pub use glam::{Mat3, Vec2, Vec3};

//! Condtrack Core - Foundation types for the condensation tracker
//!
//! This crate provides the types shared by the tracker and its collaborators:
//! - Frames and derived luminance / summed-area images
//! - Geometric primitives in pixel coordinates
//! - The tracker error type

pub mod error;
pub mod geometry;
pub mod image;

pub use error::{Result, TrackerError};
pub use geometry::{Offset, Rect};
pub use image::{GrayImage, Image, IntegralImage, PixelFormat};

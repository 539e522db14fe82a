//! Hilbert curve generation and progressive drawing.
//!
//! [`curve`] maps indices to grid cells and generates whole curves. A
//! [`Renderer`] draws a curve onto a [`Surface`], either at once or animated
//! one chunk per frame through a host-supplied [`FrameScheduler`].
//!
//! ```
//! use std::rc::Rc;
//!
//! use hilbertcurve::{ManualScheduler, RenderRequest, Renderer};
//! use image::RgbaImage;
//!
//! let frames = Rc::new(ManualScheduler::new());
//! let mut renderer = Renderer::new(RgbaImage::new(1, 1), frames.clone());
//! let stats = renderer.render(
//!     &RenderRequest {
//!         order: 3,
//!         width: 128,
//!         height: 128,
//!         ..RenderRequest::default()
//!     },
//!     None,
//! )?;
//! assert_eq!(stats.point_count, 64);
//! frames.run_until_idle(1000);
//! assert!(!renderer.is_animating());
//! # Ok::<(), hilbertcurve::Error>(())
//! ```

/// Index ↔ coordinate mapping and curve generation.
pub mod curve;
/// Error types used across the crate.
pub mod error;
/// Grid cells.
pub mod point;
/// Coverage-mask rasterization for image surfaces.
mod raster;
/// Instant and animated drawing.
pub mod render;
/// Render requests, animation policy and curve statistics.
pub mod request;
/// Host frame scheduling.
pub mod schedule;
/// Drawing targets.
pub mod surface;

pub use crate::{
    curve::{Curve, Order, generate_curve, index_to_point, point_to_index},
    error::{Error, Result},
    point::Point,
    render::{Renderer, Style, map_to_surface, path_length},
    request::{ANIMATION_POINT_LIMIT, CurveStats, RenderRequest},
    schedule::{FrameId, FrameScheduler, ManualScheduler},
    surface::{Pen, PixelPoint, Surface},
};

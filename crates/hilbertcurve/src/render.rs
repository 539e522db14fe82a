//! Instant and animated drawing of a point sequence onto a [`Surface`].
//!
//! A [`Renderer`] owns its surface and at most one animation session. Animated
//! drawing advances by a chunk of points per frame through the host's
//! [`FrameScheduler`]; each frame redraws the whole prefix from the first
//! point so the stroke looks the same at every stage.

use std::{
    cell::{Cell, Ref, RefCell},
    rc::Rc,
};

use image::Rgba;
use log::{debug, trace};

use crate::{
    curve::{Order, generate_curve},
    error::{Error, Result},
    point::Point,
    request::{CurveStats, RenderRequest, should_animate},
    schedule::{FrameId, FrameScheduler},
    surface::{Pen, PixelPoint, Surface},
};

/// Background the surface is cleared to before every draw.
pub const BACKGROUND: Rgba<u8> = Rgba([10, 10, 26, 255]);
/// Shadow blur of the glow pass over a finished stroke.
pub const LINE_GLOW_BLUR: f64 = 10.0;
/// Shadow blur around the drawing head.
pub const HEAD_GLOW_BLUR: f64 = 20.0;
/// Drawing head radius as a multiple of the line width.
pub const HEAD_RADIUS_FACTOR: f64 = 3.0;
/// Animations aim to finish in roughly this many frames.
pub const TARGET_FRAMES: usize = 500;

/// Stroke styling for one draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Stroke color.
    pub color: Rgba<u8>,
    /// Stroke width in pixels.
    pub line_width: f64,
    /// Margin between the curve and the surface edge, in pixels.
    pub padding: f64,
}

impl Style {
    /// Check the line width is positive and the padding non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(Error::InvalidLineWidth(self.line_width));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(Error::InvalidPadding(self.padding));
        }
        Ok(())
    }

    /// The pen used for the curve stroke.
    fn pen(&self) -> Pen {
        Pen {
            color: self.color,
            width: self.line_width,
        }
    }
}

/// Map grid points to surface pixels.
///
/// The scale fits the largest coordinate into the smaller of the two padded
/// surface extents, so the curve stays square on non-square surfaces. Returns
/// the mapped points and the scale. A curve with no extent (empty, or every
/// point at the origin) cannot be scaled and is an error.
pub fn map_to_surface(
    points: &[Point],
    width: u32,
    height: u32,
    padding: f64,
) -> Result<(Vec<PixelPoint>, f64)> {
    let max_coord = points.iter().map(Point::max_coord).max().unwrap_or(0);
    if max_coord == 0 {
        return Err(Error::DegenerateCurve(points.len()));
    }
    let inner_width = f64::from(width) - 2.0 * padding;
    let inner_height = f64::from(height) - 2.0 * padding;
    let scale = inner_width.min(inner_height).max(0.0) / f64::from(max_coord);
    let pixels = points
        .iter()
        .map(|p| {
            PixelPoint::new(
                padding + f64::from(p.x) * scale,
                padding + f64::from(p.y) * scale,
            )
        })
        .collect();
    Ok((pixels, scale))
}

/// Total Euclidean length of the path through `points`.
///
/// Zero for fewer than two points.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

/// Points advanced per animation frame for a curve of `total` points.
pub fn points_per_frame(total: usize) -> usize {
    total.div_ceil(TARGET_FRAMES).max(1)
}

/// Draw the finished curve: plain stroke, then the same stroke with glow.
fn paint_static<S: Surface>(surface: &mut S, pixels: &[PixelPoint], style: &Style) {
    let pen = style.pen();
    surface.clear(BACKGROUND);
    surface.stroke_polyline(pixels, &pen, 0.0);
    surface.stroke_polyline(pixels, &pen, LINE_GLOW_BLUR);
}

/// Bookkeeping shared between a renderer and the ticks of one session.
#[derive(Debug)]
struct Session {
    /// Sequence number, for logging.
    id: u64,
    /// Set by [`Renderer::stop`]; checked before every tick.
    cancelled: Cell<bool>,
    /// Set once the final frame has been drawn.
    finished: Cell<bool>,
    /// The tick currently queued with the scheduler, if any.
    pending: Cell<Option<FrameId>>,
    /// Points emitted so far.
    cursor: Cell<usize>,
    /// Points in the curve being drawn.
    total: usize,
}

impl Session {
    /// Whether the session still has frames to draw.
    fn is_live(&self) -> bool {
        !self.cancelled.get() && !self.finished.get()
    }

    /// Mark the session cancelled and withdraw its queued tick.
    fn cancel(&self, scheduler: &dyn FrameScheduler) {
        self.cancelled.set(true);
        if let Some(id) = self.pending.take() {
            scheduler.cancel_frame(id);
        }
    }
}

/// One animated draw in flight. Each tick consumes it and, unless the curve
/// is complete, queues it again for the next frame.
struct Animation<S> {
    /// Surface shared with the owning renderer.
    surface: Rc<RefCell<S>>,
    /// Scheduler the next tick is queued on.
    scheduler: Rc<dyn FrameScheduler>,
    /// State visible to the renderer.
    session: Rc<Session>,
    /// Curve mapped to pixels once, at session start.
    pixels: Vec<PixelPoint>,
    /// Stroke styling.
    style: Style,
    /// Points advanced per tick.
    chunk: usize,
    /// Called once after the final frame.
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl<S: Surface + 'static> Animation<S> {
    /// Queue the next tick.
    fn schedule(self) {
        let scheduler = Rc::clone(&self.scheduler);
        let session = Rc::clone(&self.session);
        let id = scheduler.request_frame(Box::new(move || self.tick()));
        session.pending.set(Some(id));
    }

    /// Draw one frame and advance the cursor.
    fn tick(mut self) {
        self.session.pending.set(None);
        if self.session.cancelled.get() {
            trace!("session {}: tick after cancel ignored", self.session.id);
            return;
        }

        let total = self.pixels.len();
        let end = (self.session.cursor.get() + self.chunk).min(total);
        {
            let mut surface = self.surface.borrow_mut();
            surface.clear(BACKGROUND);
            surface.stroke_polyline(&self.pixels[..end], &self.style.pen(), 0.0);
            if end > 1 {
                surface.fill_disc(
                    self.pixels[end - 1],
                    self.style.line_width * HEAD_RADIUS_FACTOR,
                    self.style.color,
                    HEAD_GLOW_BLUR,
                );
            }
        }
        self.session.cursor.set(end);
        trace!("session {}: drew {end}/{total}", self.session.id);

        if end < total {
            self.schedule();
            return;
        }

        // The surface cannot be resized while a session is live, so the
        // mapping computed at start equals a fresh one.
        paint_static(&mut *self.surface.borrow_mut(), &self.pixels, &self.style);
        self.session.finished.set(true);
        debug!("session {}: complete", self.session.id);
        if let Some(done) = self.on_complete.take() {
            done();
        }
    }
}

/// Draws curves onto a surface it owns, instantly or animated.
pub struct Renderer<S> {
    /// The output surface, shared only with this renderer's own ticks.
    surface: Rc<RefCell<S>>,
    /// Host frame scheduler.
    scheduler: Rc<dyn FrameScheduler>,
    /// Current or most recent animation session.
    session: Option<Rc<Session>>,
    /// Sequence number for the next session.
    next_session: u64,
}

impl<S: Surface + 'static> Renderer<S> {
    /// A renderer drawing into `surface`, animating through `scheduler`.
    pub fn new(surface: S, scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            surface: Rc::new(RefCell::new(surface)),
            scheduler,
            session: None,
            next_session: 0,
        }
    }

    /// Borrow the surface.
    ///
    /// Ticks draw through the same cell, so drop the returned borrow before
    /// the scheduler runs another frame; holding it across a tick panics.
    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    /// Whether an animation is in progress.
    pub fn is_animating(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_live())
    }

    /// Points drawn and total points of the live animation, if any.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.session
            .as_ref()
            .filter(|s| s.is_live())
            .map(|s| (s.cursor.get(), s.total))
    }

    /// Stop the current animation, leaving the surface as last drawn.
    pub fn stop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if session.is_live() {
            debug!(
                "session {}: stopped at {}/{}",
                session.id,
                session.cursor.get(),
                session.total
            );
        }
        session.cancel(self.scheduler.as_ref());
    }

    /// Draw the whole curve at once, with glow. Stops any animation first.
    pub fn draw_instant(&mut self, points: &[Point], style: &Style) -> Result<()> {
        style.validate()?;
        self.stop();
        let mut surface = self.surface.borrow_mut();
        let (pixels, scale) =
            map_to_surface(points, surface.width(), surface.height(), style.padding)?;
        trace!("instant draw of {} points at scale {scale:.3}", points.len());
        paint_static(&mut *surface, &pixels, style);
        Ok(())
    }

    /// Start drawing the curve progressively, one chunk per frame.
    ///
    /// Any previous session is stopped first. Returns once the first tick is
    /// queued; nothing is drawn until the scheduler runs it. `on_complete`
    /// runs after the final frame, which matches [`draw_instant`] exactly.
    ///
    /// [`draw_instant`]: Renderer::draw_instant
    pub fn draw_animated(
        &mut self,
        points: &[Point],
        style: &Style,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) -> Result<()> {
        style.validate()?;
        if self.is_animating() {
            debug!("superseding live session");
        }
        self.stop();

        let (pixels, scale) = {
            let surface = self.surface.borrow();
            map_to_surface(points, surface.width(), surface.height(), style.padding)?
        };
        let total = pixels.len();
        let chunk = points_per_frame(total);
        let session = Rc::new(Session {
            id: self.next_session,
            cancelled: Cell::new(false),
            finished: Cell::new(false),
            pending: Cell::new(None),
            cursor: Cell::new(0),
            total,
        });
        self.next_session += 1;
        debug!(
            "session {}: animating {total} points, {chunk} per frame, scale {scale:.3}",
            session.id
        );

        Animation {
            surface: Rc::clone(&self.surface),
            scheduler: Rc::clone(&self.scheduler),
            session: Rc::clone(&session),
            pixels,
            style: *style,
            chunk,
            on_complete,
        }
        .schedule();
        self.session = Some(session);
        Ok(())
    }

    /// Generate, measure and draw the curve described by `request`.
    ///
    /// Supersedes any animation in progress and resizes the surface to the
    /// request. Animates only when asked to and the curve has at most
    /// [`ANIMATION_POINT_LIMIT`](crate::request::ANIMATION_POINT_LIMIT)
    /// points; `on_complete` runs when an animation finishes and is dropped
    /// unused for an instant draw.
    pub fn render(
        &mut self,
        request: &RenderRequest,
        on_complete: Option<Box<dyn FnOnce()>>,
    ) -> Result<CurveStats> {
        request.validate()?;
        self.stop();

        self.surface
            .borrow_mut()
            .resize(request.width, request.height);

        let curve = generate_curve(Order::new(request.order)?);
        let stats = CurveStats::for_curve(&curve);
        let style = request.style();
        if should_animate(request.animate, curve.len()) {
            self.draw_animated(curve.points(), &style, on_complete)?;
        } else {
            self.draw_instant(curve.points(), &style)?;
        }
        debug!("rendered {stats}");
        Ok(stats)
    }
}

impl<S> Drop for Renderer<S> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancel(self.scheduler.as_ref());
        }
    }
}

//! Command handlers for the `hilbert` CLI.
//!
//! These functions implement the top‑level subcommands. Drawing goes through
//! the library [`Renderer`] on an in-memory image; animation frames are
//! advanced by hand with a [`ManualScheduler`] and captured into a GIF.

use std::{fmt, fs::File, io, path::Path, rc::Rc, str::FromStr};

use anyhow::{Result, bail};
use gif::{Encoder, Frame, Repeat};
use hilbertcurve::{
    CurveStats, ManualScheduler, Order, Point, RenderRequest, Renderer, generate_curve,
    render::points_per_frame,
};
use image::RgbaImage;
use log::{debug, info};

/// GIF delay for the final frame, so the finished curve lingers before looping.
const FINAL_FRAME_DELAY_CS: u16 = 200;

/// Something to look up on a curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// A position along the curve.
    Index(u32),
    /// A grid cell.
    Cell(Point),
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let number = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid target '{s}': expected INDEX or X,Y"))
        };
        match s.split_once(',') {
            Some((x, y)) => Ok(Self::Cell(Point::new(number(x)?, number(y)?))),
            None => Ok(Self::Index(number(s)?)),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Cell(p) => write!(f, "{p}"),
        }
    }
}

/// A renderer over an in-memory image, plus the scheduler that drives it.
fn image_renderer() -> (Rc<ManualScheduler>, Renderer<RgbaImage>) {
    let frames = Rc::new(ManualScheduler::new());
    let renderer = Renderer::new(RgbaImage::new(1, 1), frames.clone());
    (frames, renderer)
}

/// Draw `request` instantly and save the image to `output`.
///
/// The output format is chosen from the file extension.
pub fn render(request: &RenderRequest, output: &Path) -> Result<CurveStats> {
    let (_, mut renderer) = image_renderer();
    let stats = renderer.render(
        &RenderRequest {
            animate: false,
            ..*request
        },
        None,
    )?;
    renderer.surface().save(output)?;
    info!(
        "wrote {}x{} image to {}",
        request.width,
        request.height,
        output.display()
    );
    Ok(stats)
}

/// Parameters controlling GIF recording of an animation.
pub struct AnimateOptions<'a> {
    /// What to draw.
    pub request: RenderRequest,
    /// Frames per second for the GIF.
    pub fps: u16,
    /// Keep every n-th tick; the final tick is always kept.
    pub stride: u32,
    /// Output GIF path.
    pub output: &'a Path,
}

/// Result of recording an animation.
pub struct Recording {
    /// Statistics for the drawn curve.
    pub stats: CurveStats,
    /// Number of GIF frames written.
    pub frames: usize,
    /// Whether the curve was animated, rather than drawn as a single frame.
    pub animated: bool,
}

/// Append one image as a GIF frame.
fn write_frame<W: io::Write>(
    encoder: &mut Encoder<W>,
    image: &RgbaImage,
    delay: u16,
) -> Result<()> {
    let (width, height) = image.dimensions();
    let mut raw = image.as_raw().clone();
    let mut frame = Frame::from_rgba_speed(width as u16, height as u16, &mut raw, 10);
    frame.delay = delay;
    encoder.write_frame(&frame)?;
    Ok(())
}

/// Run the animated drawing of `request` frame by frame and record it as a GIF.
pub fn animate(options: AnimateOptions<'_>) -> Result<Recording> {
    let AnimateOptions {
        request,
        fps,
        stride,
        output,
    } = options;

    let max = u32::from(u16::MAX);
    if request.width > max || request.height > max {
        bail!(
            "size {}x{} exceeds GIF limits ({}).",
            request.width,
            request.height,
            u16::MAX
        );
    }

    let (frames, mut renderer) = image_renderer();
    let stats = renderer.render(
        &RenderRequest {
            animate: true,
            ..request
        },
        None,
    )?;

    let mut file = File::create(output)?;
    let mut encoder = Encoder::new(&mut file, request.width as u16, request.height as u16, &[])?;
    encoder.set_repeat(Repeat::Infinite)?;

    if !renderer.is_animating() {
        write_frame(&mut encoder, &renderer.surface(), FINAL_FRAME_DELAY_CS)?;
        return Ok(Recording {
            stats,
            frames: 1,
            animated: false,
        });
    }

    let frame_delay = frame_delay_from_fps(fps);
    let ticks = stats.point_count.div_ceil(points_per_frame(stats.point_count));
    debug!("recording {ticks} ticks, keeping every {stride}");

    let mut pb = pbr::ProgressBar::on(io::stderr(), ticks as u64);
    pb.format("╢▌▌░╟");

    let mut tick: u32 = 0;
    let mut written = 0;
    while renderer.is_animating() {
        frames.step();
        tick += 1;
        pb.inc();

        let last = !renderer.is_animating();
        if last {
            write_frame(&mut encoder, &renderer.surface(), FINAL_FRAME_DELAY_CS)?;
            written += 1;
        } else if tick % stride == 0 {
            write_frame(&mut encoder, &renderer.surface(), frame_delay)?;
            written += 1;
        }
    }

    pb.finish();
    info!("wrote {written} frames to {}", output.display());
    Ok(Recording {
        stats,
        frames: written,
        animated: true,
    })
}

/// Convert frames-per-second into a GIF frame delay (hundredths of a second).
fn frame_delay_from_fps(fps: u16) -> u16 {
    // GIF delays are centiseconds; clamp to at least 1cs to avoid zero-delay frames.
    let fps = fps.max(1);
    ((100 + (fps / 2)) / fps).max(1)
}

/// Summarize the curve of the given order.
pub fn stats(order: u32) -> Result<CurveStats> {
    let curve = generate_curve(Order::new(order)?);
    Ok(CurveStats::for_curve(&curve))
}

/// Map an index to its cell, or a cell to its index.
pub fn locate(order: u32, target: Target) -> Result<String> {
    let curve = generate_curve(Order::new(order)?);
    let out = match target {
        Target::Index(index) => format!("{target} -> {}", curve.point(index)?),
        Target::Cell(point) => format!("{target} -> {}", curve.index(point)?),
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_targets() {
        assert_eq!("42".parse::<Target>(), Ok(Target::Index(42)));
        assert_eq!(
            " 3, 4 ".parse::<Target>(),
            Ok(Target::Cell(Point::new(3, 4)))
        );
        assert!("3,".parse::<Target>().is_err());
        assert!("-1".parse::<Target>().is_err());
        assert!("a,b".parse::<Target>().is_err());
    }

    #[test]
    fn frame_delays() {
        assert_eq!(frame_delay_from_fps(50), 2);
        assert_eq!(frame_delay_from_fps(10), 10);
        assert_eq!(frame_delay_from_fps(100), 1);
        assert_eq!(frame_delay_from_fps(0), 100);
    }

    #[test]
    fn locate_both_ways() -> Result<()> {
        assert_eq!(locate(2, Target::Index(15))?, "15 -> (3, 0)");
        assert_eq!(locate(2, Target::Cell(Point::new(3, 0)))?, "(3, 0) -> 15");
        assert!(locate(2, Target::Index(16)).is_err());
        assert!(locate(2, Target::Cell(Point::new(4, 0))).is_err());
        Ok(())
    }

    #[test]
    fn stats_match_curve() -> Result<()> {
        assert_eq!(stats(3)?.to_string(), "order 3, 64 points, length 63.00");
        assert!(stats(0).is_err());
        Ok(())
    }

    #[test]
    fn render_writes_png() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("curve.png");
        let request = RenderRequest {
            order: 2,
            width: 64,
            height: 48,
            ..RenderRequest::default()
        };
        let stats = render(&request, &out)?;
        assert_eq!(stats.point_count, 16);
        assert_eq!(image::open(&out)?.to_rgba8().dimensions(), (64, 48));
        Ok(())
    }
}

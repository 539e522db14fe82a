//! Command‑line entry point for the `hilbert` tool.
//!
//! Provides subcommands to draw a Hilbert curve to a PNG, record its animated
//! drawing as a GIF, and inspect curve statistics and coordinates.

use std::{
    fmt::Display,
    ops::RangeInclusive,
    path::{Path, PathBuf},
    process,
};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colornames::Color;
use hilbertcurve::{Order, RenderRequest, request};
use image::Rgba;
use log::LevelFilter;

/// CLI command implementations.
mod cmd;

use crate::cmd::{AnimateOptions, Target};

/// Parse a named or hex color into an opaque `Rgba` value.
///
/// Supports CSS color names via `colornames` and short/long hex (RGB/RRGGBB)
/// with or without a leading `#`.
fn parse_rgba_color(input: &str) -> Result<Rgba<u8>, String> {
    fn parse_hex_rgb(hex: &str) -> Option<Rgba<u8>> {
        let raw = hex.trim_start_matches('#');
        if !raw.as_bytes().iter().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let from_pair =
            |idx: usize| -> Option<u8> { u8::from_str_radix(&raw[idx..idx + 2], 16).ok() };
        let from_nibble = |idx: usize| -> Option<u8> {
            u8::from_str_radix(&raw[idx..idx + 1], 16)
                .ok()
                .map(|v| v * 17)
        };

        match raw.len() {
            3 => Some(Rgba([from_nibble(0)?, from_nibble(1)?, from_nibble(2)?, 0xff])),
            6 => Some(Rgba([from_pair(0)?, from_pair(2)?, from_pair(4)?, 0xff])),
            _ => None,
        }
    }

    let trimmed = input.trim();
    if let Some(rgba) = parse_hex_rgb(trimmed) {
        return Ok(rgba);
    }

    let color: Color = trimmed.try_into().map_err(|_| {
        format!(
            "invalid color '{input}': use a named color or hex (RGB/RRGGBB, leading '#' optional)"
        )
    })?;
    let (red, green, blue) = color.rgb();
    Ok(Rgba([red, green, blue, 0xff]))
}

/// Parse a non-negative, finite pixel measure.
fn parse_padding(input: &str) -> Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(format!(
            "invalid padding '{input}': expected a non-negative number"
        )),
    }
}

/// Parse a positive, finite stroke width.
fn parse_line_width(input: &str) -> Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(format!(
            "invalid line width '{input}': expected a positive number"
        )),
    }
}

#[derive(Parser)]
#[command(name = "hilbert")]
#[command(version = env!("CARGO_PKG_VERSION"))]
/// Top‑level CLI options and subcommands.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(
        short,
        action = clap::ArgAction::Count,
        global = true,
        help = "Sets the level of verbosity"
    )]
    v: u8,

    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Accepted `--order` values.
const ORDER_RANGE: RangeInclusive<i64> = Order::MIN as i64..=Order::MAX as i64;

/// Curve order argument shared by every subcommand.
#[derive(Args, Clone, Copy, Debug)]
struct OrderArg {
    #[arg(
        short = 'o',
        long = "order",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(ORDER_RANGE),
        help = "Curve order (grid side 2^ORDER)"
    )]
    /// Curve order.
    order: u32,
}

/// Drawing options shared by `render` and `animate`.
#[derive(Args, Clone, Copy, Debug)]
struct DrawArgs {
    #[command(flatten)]
    /// Curve order.
    order: OrderArg,

    #[arg(
        short = 's',
        long = "size",
        default_value_t = 512,
        help = "Image width in pixels"
    )]
    /// Image width in pixels.
    size: u32,

    #[arg(long = "height", help = "Image height in pixels (defaults to the width)")]
    /// Optional image height; square when omitted.
    height: Option<u32>,

    #[arg(
        short = 'w',
        long = "line-width",
        value_name = "PIXELS",
        default_value = "2",
        value_parser = parse_line_width,
        help = "Line width in pixels for the curve stroke"
    )]
    /// Stroke width for the rendered curve.
    line_width: f64,

    #[arg(
        long = "color",
        visible_alias = "fg",
        value_parser = parse_rgba_color,
        default_value = "#00d4ff",
        value_name = "COLOR",
        help = "Stroke color (name or hex; RGB/RRGGBB, '#' optional)"
    )]
    /// Stroke color for the curve.
    color: Rgba<u8>,

    #[arg(
        long = "padding",
        value_name = "PIXELS",
        default_value_t = request::DEFAULT_PADDING,
        value_parser = parse_padding,
        help = "Margin between the curve and the image edge"
    )]
    /// Margin around the curve.
    padding: f64,
}

impl DrawArgs {
    /// Build the library request for these options.
    fn request(&self, animate: bool) -> RenderRequest {
        RenderRequest {
            order: self.order.order,
            color: self.color,
            line_width: self.line_width,
            animate,
            width: self.size,
            height: self.height.unwrap_or(self.size),
            padding: self.padding,
        }
    }
}

#[derive(Subcommand)]
/// Subcommands supported by the `hilbert` tool.
enum Commands {
    #[command(about = "Draw a curve to a PNG image")]
    /// Draw a curve to a PNG image.
    Render {
        #[command(flatten)]
        /// Drawing options.
        draw: DrawArgs,

        #[arg(help = "Output image path")]
        /// Output image path.
        output: PathBuf,
    },

    #[command(about = "Record the animated drawing of a curve as a GIF")]
    /// Record the animated drawing of a curve as a GIF.
    Animate {
        #[command(flatten)]
        /// Drawing options.
        draw: DrawArgs,

        #[arg(
            long = "fps",
            default_value_t = 50,
            value_parser = clap::value_parser!(u16).range(1..=100),
            help = "Frames per second for the animated GIF"
        )]
        /// Frames per second for the animation (1-100).
        fps: u16,

        #[arg(
            long = "stride",
            value_name = "TICKS",
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Keep every TICKS-th animation frame (the final frame is always kept)"
        )]
        /// Keep every n-th tick as a GIF frame.
        stride: u32,

        #[arg(help = "Output GIF file path")]
        /// Output GIF path.
        output: PathBuf,
    },

    #[command(about = "Print point count and path length for a curve")]
    /// Print statistics for a curve.
    Stats {
        #[command(flatten)]
        /// Curve order.
        order: OrderArg,
    },

    #[command(about = "Convert between curve indices and grid cells")]
    /// Convert an index to a cell, or a cell to an index.
    Locate {
        #[command(flatten)]
        /// Curve order.
        order: OrderArg,

        #[arg(value_name = "INDEX|X,Y", help = "A curve index, or a grid cell as X,Y")]
        /// What to look up.
        target: Target,
    },
}

/// Print a success message or exit with an error.
fn report_ok<E: Display>(result: Result<(), E>, ok_msg: &str) {
    match result {
        Ok(()) => println!("{ok_msg}"),
        Err(e) => fail(e),
    }
}

/// Print a command's output or exit with an error.
fn report<T: Display, E: Display>(result: Result<T, E>) {
    match result {
        Ok(out) => println!("{out}"),
        Err(e) => fail(e),
    }
}

/// Print an error and exit with status 1.
fn fail<E: Display>(e: E) -> ! {
    eprintln!("{e}");
    process::exit(1);
}

/// Handle the `render` subcommand.
fn handle_render(draw: &DrawArgs, output: &Path) -> Result<()> {
    let stats = cmd::render(&draw.request(false), output)?;
    println!("{stats}");
    Ok(())
}

/// Handle the `animate` subcommand.
fn handle_animate(draw: &DrawArgs, fps: u16, stride: u32, output: &Path) -> Result<()> {
    let recording = cmd::animate(AnimateOptions {
        request: draw.request(true),
        fps,
        stride,
        output,
    })?;
    if !recording.animated {
        eprintln!(
            "{} points exceed the animation limit of {}; wrote a single frame.",
            recording.stats.point_count,
            request::ANIMATION_POINT_LIMIT
        );
    }
    println!("{} ({} frames)", recording.stats, recording.frames);
    Ok(())
}

/// Map `-v` repeats onto a log level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.v);

    match cli.command {
        Commands::Render { draw, output } => report_ok(handle_render(&draw, &output), "OK!"),
        Commands::Animate {
            draw,
            fps,
            stride,
            output,
        } => report_ok(
            handle_animate(&draw, fps, stride, &output),
            "Saved animation GIF!",
        ),
        Commands::Stats { order } => report(cmd::stats(order.order)),
        Commands::Locate { order, target } => report(cmd::locate(order.order, target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            parse_rgba_color("#0f8"),
            Ok(Rgba([0x00, 0xff, 0x88, 0xff]))
        );
        assert_eq!(
            parse_rgba_color("102030"),
            Ok(Rgba([0x10, 0x20, 0x30, 0xff]))
        );
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(
            parse_rgba_color("white"),
            Ok(Rgba([0xff, 0xff, 0xff, 0xff]))
        );
    }

    #[test]
    fn rejects_invalid_colors() {
        assert!(parse_rgba_color("#12345").is_err());
        assert!(parse_rgba_color("#12345678").is_err());
        assert!(parse_rgba_color("not-a-color").is_err());
    }

    #[test]
    fn rejects_bad_measures() {
        assert!(parse_padding("-1").is_err());
        assert!(parse_padding("inf").is_err());
        assert_eq!(parse_padding("0"), Ok(0.0));
        assert!(parse_line_width("0").is_err());
        assert_eq!(parse_line_width("1.5"), Ok(1.5));
    }

    #[test]
    fn height_defaults_to_width() {
        let cli = Cli::parse_from(["hilbert", "render", "-s", "300", "out.png"]);
        let Commands::Render { draw, .. } = cli.command else {
            panic!("expected render");
        };
        let req = draw.request(false);
        assert_eq!((req.width, req.height), (300, 300));
        assert_eq!(req.order, 5);
        assert!(!req.animate);
    }
}

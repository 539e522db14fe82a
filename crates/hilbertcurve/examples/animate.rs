//! Minimal animation example: step an order-3 curve frame by frame.

use std::{error::Error, rc::Rc};

use hilbertcurve::{ManualScheduler, RenderRequest, Renderer};
use image::RgbaImage;

fn main() -> Result<(), Box<dyn Error>> {
    let frames = Rc::new(ManualScheduler::new());
    let mut renderer = Renderer::new(RgbaImage::new(1, 1), frames.clone());

    let stats = renderer.render(
        &RenderRequest {
            order: 3,
            width: 256,
            height: 256,
            ..RenderRequest::default()
        },
        Some(Box::new(|| println!("animation complete"))),
    )?;
    println!("{stats}");

    while renderer.is_animating() {
        frames.step();
        if let Some((drawn, total)) = renderer.progress() {
            println!("frame {}: {drawn}/{total} points", frames.frames());
        }
    }

    renderer.surface().save("hilbert-order-3.png")?;
    Ok(())
}

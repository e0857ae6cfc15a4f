// Air canvas: draw on the live camera feed with your index finger.
// • Raise the middle finger to put the pen down, lower it to lift the pen.
// • Hover the index fingertip over a palette slot (top of the screen) to pick a tool.
// • Ink stays on screen until it is erased. ESC quits.

mod camera;
mod canvas;
mod config;
mod detector;
mod draw;
mod engine;
mod error;
mod landmarks;
mod palette;
mod pointer;
mod selector;
mod session;
mod tool;
mod types;

use std::env;
use std::time::{Duration, Instant};

use camera::CameraCapture;
use config::Config;
use detector::{HandDetector, SubprocessDetector};
use draw::Drawer;
use error::Error;
use landmarks::KeypointSet;
use session::Session;

fn main() -> Result<(), Error> {
    env_logger::builder()
        .filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let config = match &*env::args_os().skip(1).collect::<Vec<_>>() {
        [] => Config::default(),
        [path] => Config::load(path)?,
        _ => {
            return Err(Error::Config(format!("usage: {} [config.toml]", env!("CARGO_PKG_NAME"))));
        }
    };

    // Everything fallible happens up front; any failure here ends the program.
    let geometry = session::geometry(&config);
    let palette = match &config.palette.path {
        Some(path) => palette::load(path, &geometry)?,
        None => palette::builtin(&geometry),
    };
    let mut cam = CameraCapture::new(
        config.camera.index,
        config.camera.width,
        config.camera.height,
        config.camera.mirror,
    )?;
    let (w, h) = cam.resolution();
    let (w, h) = (w as usize, h as usize);
    let mut detector = SubprocessDetector::spawn(&config.detector)?;
    let mut drawer = Drawer::new("Air Canvas", w, h)?;

    let mut session = Session::new(&config, palette, w, h);

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    while drawer.is_open() && !drawer.esc_pressed() {
        let mut frame = cam.next_frame()?;
        let now = Instant::now();
        if (frame.width, frame.height) != (w, h) {
            return Err(Error::CameraFrame(format!(
                "frame is {}x{}, expected {w}x{h}",
                frame.width, frame.height
            )));
        }

        let hand = detector
            .detect(&frame)?
            .and_then(|pts| KeypointSet::from_normalized(&pts, frame.width, frame.height));

        session.process_frame(&mut frame, hand.as_ref(), now);
        drawer.present(&frame)?;

        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    log::info!("exiting");
    Ok(())
}

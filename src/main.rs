use thermoview_rs::logger;
use thermoview_rs::thermal_pipeline::{
    Command, FrameSink, OutputFrame, RecoveringSource, Result, SnapshotConfig, ThermalError,
    V4l2ThermalSource, ViewerConfig, ViewerPipeline,
};

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::{error, info};

/// USB identity of the supported thermal camera.
const VENDOR_ID: u16 = 0x2bdf;
const PRODUCT_ID: u16 = 0x0102;

const WINDOW_TITLE: &str = "Thermal";

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("searching for thermal camera {VENDOR_ID:04x}:{PRODUCT_ID:04x}...");

    let source = match V4l2ThermalSource::open(VENDOR_ID, PRODUCT_ID) {
        Ok(source) => source,
        Err(err) => {
            error!("{err}");
            return Err(err.into());
        }
    };
    let source = RecoveringSource::new(source);

    let config = ViewerConfig::builder()
        .snapshot(
            SnapshotConfig::builder()
                .output_dir(std::env::current_dir()?)
                .build(),
        )
        .build();

    let mut window = WindowSink::new(config.display_width, config.display_height)?;
    let mut pipeline = ViewerPipeline::new(source, config);

    info!("controls: Q=quit, S=snapshot, C=colormap, +/-=contrast");

    match pipeline.run(&mut window) {
        Ok(()) => {
            info!("session ended cleanly");
            Ok(())
        }
        Err(err) => {
            error!("session aborted: {err}");
            Err(err.into())
        }
    }
}

/// minifb-backed window implementing the display/input boundary.
struct WindowSink {
    window: Window,
    buffer: Vec<u32>,
}

impl WindowSink {
    fn new(width: usize, height: usize) -> anyhow::Result<Self> {
        let window = Window::new(WINDOW_TITLE, width, height, WindowOptions::default())?;
        Ok(Self {
            window,
            buffer: vec![0; width * height],
        })
    }
}

impl FrameSink for WindowSink {
    fn present(&mut self, frame: &OutputFrame) -> Result<()> {
        for (dst, rgb) in self.buffer.iter_mut().zip(frame.data.chunks_exact(3)) {
            *dst = u32::from(rgb[0]) << 16 | u32::from(rgb[1]) << 8 | u32::from(rgb[2]);
        }
        self.window
            .update_with_buffer(&self.buffer, frame.width, frame.height)
            .map_err(|e| ThermalError::DisplayError(e.to_string()))
    }

    fn poll_command(&mut self) -> Option<Command> {
        if !self.window.is_open() {
            return Some(Command::Quit);
        }
        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            let command = match key {
                Key::Q | Key::Escape => Command::Quit,
                Key::S => Command::Snapshot,
                Key::C => Command::CycleColormap,
                Key::Equal | Key::NumPadPlus => Command::IncreaseContrast,
                Key::Minus | Key::NumPadMinus => Command::DecreaseContrast,
                _ => continue,
            };
            return Some(command);
        }
        None
    }
}

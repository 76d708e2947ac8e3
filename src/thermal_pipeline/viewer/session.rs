use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::thermal_pipeline::capture::{FrameSource, RawFrame};
use crate::thermal_pipeline::common::error::{Result, ThermalError};
use crate::thermal_pipeline::enhance::{EnhancementState, enhance};
use crate::thermal_pipeline::normalize::normalize;
use crate::thermal_pipeline::render::{Colormap, OutputFrame, render};
use crate::thermal_pipeline::snapshot::types::timestamped_path;
use crate::thermal_pipeline::snapshot::{SnapshotWriter, TiffSnapshotWriter};
use crate::thermal_pipeline::track::track;
use crate::thermal_pipeline::viewer::sink::FrameSink;
use crate::thermal_pipeline::viewer::types::{Command, ViewerConfig};

/// Drives the per-frame cycle and owns all mutable session state: the
/// enhancement accumulator, the active colormap, and the last rendered
/// frame (kept for snapshot capture).
pub struct ViewerPipeline<S: FrameSource, W: SnapshotWriter> {
    source: S,
    snapshot_writer: W,
    config: ViewerConfig,
    enhancement: EnhancementState,
    colormap: Colormap,
    last_output: Option<OutputFrame>,
    frames_presented: u64,
}

impl<S: FrameSource> ViewerPipeline<S, TiffSnapshotWriter> {
    pub fn new(source: S, config: ViewerConfig) -> Self {
        Self::with_custom(source, TiffSnapshotWriter, config)
    }
}

impl<S: FrameSource, W: SnapshotWriter> ViewerPipeline<S, W> {
    pub fn with_custom(source: S, snapshot_writer: W, config: ViewerConfig) -> Self {
        let enhancement = EnhancementState::new(config.clip_limit, config.tile_size);
        Self {
            source,
            snapshot_writer,
            config,
            enhancement,
            colormap: Colormap::default(),
            last_output: None,
            frames_presented: 0,
        }
    }

    /// Runs the session until a quit command or an unrecoverable device
    /// fault. Device recovery latency shows up as a gap in frames, never as
    /// an error here; wrap the source in `RecoveringSource` for that.
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> Result<()> {
        info!("starting view session: {}", self.source.describe());

        loop {
            let raw = self.source.read_frame()?;
            let output = self.process_frame(&raw);
            sink.present(&output)?;
            self.last_output = Some(output);
            self.frames_presented += 1;

            match sink.poll_command() {
                Some(Command::Quit) => {
                    info!(frames = self.frames_presented, "quit requested");
                    return Ok(());
                }
                Some(command) => self.dispatch(command),
                None => {}
            }
        }
    }

    /// One pass through the processing pipeline.
    #[instrument(skip(self, raw), fields(frame = self.frames_presented))]
    pub fn process_frame(&mut self, raw: &RawFrame) -> OutputFrame {
        let field = {
            let _span = tracing::debug_span!("normalize").entered();
            normalize(raw)
        };

        let enhanced = {
            let _span = tracing::debug_span!("enhance").entered();
            enhance(&field, &mut self.enhancement)
        };

        let (hot, cold) = {
            let _span = tracing::debug_span!("track").entered();
            track(&enhanced, self.config.display_width, self.config.display_height)
        };

        let _span = tracing::debug_span!("render").entered();
        render(
            &enhanced,
            (&hot, &cold),
            self.colormap,
            self.config.display_width,
            self.config.display_height,
        )
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::Quit => unreachable!("quit is handled by the loop"),
            Command::Snapshot => match self.save_snapshot() {
                Ok(Some(path)) => info!("saved snapshot to {}", path.display()),
                Ok(None) => warn!("snapshot requested before any frame was rendered"),
                // Recoverable: report and keep streaming.
                Err(err) => warn!("snapshot failed: {err}"),
            },
            Command::CycleColormap => {
                self.colormap = self.colormap.cycle();
                info!("colormap: {}", self.colormap.name());
            }
            Command::IncreaseContrast => {
                let clip = self.enhancement.increase_contrast();
                info!("contrast clip limit: {clip}");
            }
            Command::DecreaseContrast => {
                let clip = self.enhancement.decrease_contrast();
                info!("contrast clip limit: {clip}");
            }
        }
    }

    /// Encodes the most recently rendered frame to a timestamped file.
    fn save_snapshot(&self) -> Result<Option<PathBuf>> {
        let Some(output) = self.last_output.as_ref() else {
            return Ok(None);
        };

        let path = timestamped_path(&self.config.snapshot.output_dir);
        let file = File::create(&path).map_err(|e| {
            ThermalError::SnapshotWrite(format!("{}: {e}", path.display()))
        })?;

        let mut writer = BufWriter::new(file);
        self.snapshot_writer
            .write_snapshot(output, &mut writer, &self.config.snapshot)?;
        Ok(Some(path))
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn colormap(&self) -> Colormap {
        self.colormap
    }

    pub fn clip_limit(&self) -> u32 {
        self.enhancement.clip_limit()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_output(&self) -> Option<&OutputFrame> {
        self.last_output.as_ref()
    }

    /// Dispatches a non-quit command outside the run loop.
    pub fn handle_command(&mut self, command: Command) {
        if command != Command::Quit {
            self.dispatch(command);
        }
    }
}

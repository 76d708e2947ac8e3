use std::sync::{Arc, Mutex};

use crate::thermal_pipeline::capture::{
    FrameSource, MAX_RESET_ATTEMPTS, RawFrame, RecoveringSource, SENSOR_HEIGHT, SENSOR_WIDTH,
};
use crate::thermal_pipeline::common::error::{Result, ThermalError};
use crate::thermal_pipeline::enhance::types::{CLIP_LIMIT_DEFAULT, CLIP_LIMIT_MAX};
use crate::thermal_pipeline::render::{Colormap, OutputFrame};
use crate::thermal_pipeline::snapshot::SnapshotWriter;
use crate::thermal_pipeline::snapshot::types::SnapshotConfig;
use crate::thermal_pipeline::viewer::session::ViewerPipeline;
use crate::thermal_pipeline::viewer::sink::FrameSink;
use crate::thermal_pipeline::viewer::types::{Command, ViewerConfig};

/// Source that serves a fixed synthetic scene, with optional scripted
/// failures before the next successful read.
struct MockSource {
    pending_failures: u32,
    resets: u32,
}

impl MockSource {
    fn new() -> Self {
        Self {
            pending_failures: 0,
            resets: 0,
        }
    }
}

impl FrameSource for MockSource {
    fn read_frame(&mut self) -> Result<RawFrame> {
        if self.pending_failures > 0 {
            self.pending_failures -= 1;
            return Err(ThermalError::ReadFailed("mock read error".into()));
        }
        let mut data = vec![100u16; SENSOR_WIDTH * SENSOR_HEIGHT];
        data[10 * SENSOR_WIDTH + 20] = 4095;
        data[50 * SENSOR_WIDTH + 100] = 0;
        Ok(RawFrame {
            width: SENSOR_WIDTH,
            height: SENSOR_HEIGHT,
            data,
        })
    }

    fn reset_and_reopen(&mut self) -> Result<()> {
        self.resets += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "mock thermal source".into()
    }
}

/// Writer that records every frame it is asked to encode.
struct MockSnapshotWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<OutputFrame>>>,
}

impl SnapshotWriter for MockSnapshotWriter {
    fn write_snapshot(
        &self,
        image: &OutputFrame,
        _output: &mut dyn std::io::Write,
        _config: &SnapshotConfig,
    ) -> Result<()> {
        if self.should_fail {
            return Err(ThermalError::EncodeError("mock encode error".into()));
        }
        self.written.lock().unwrap().push(image.clone());
        Ok(())
    }
}

/// Sink that feeds a scripted command sequence, then quits.
struct ScriptedSink {
    script: Vec<Option<Command>>,
    cursor: usize,
    presented: Vec<(usize, usize)>,
}

impl ScriptedSink {
    fn new(script: Vec<Option<Command>>) -> Self {
        Self {
            script,
            cursor: 0,
            presented: Vec::new(),
        }
    }
}

impl FrameSink for ScriptedSink {
    fn present(&mut self, frame: &OutputFrame) -> Result<()> {
        self.presented.push((frame.width, frame.height));
        Ok(())
    }

    fn poll_command(&mut self) -> Option<Command> {
        let command = self
            .script
            .get(self.cursor)
            .copied()
            .unwrap_or(Some(Command::Quit));
        self.cursor += 1;
        command
    }
}

fn test_config(dir: &std::path::Path) -> ViewerConfig {
    ViewerConfig::builder()
        .snapshot(SnapshotConfig::builder().output_dir(dir).build())
        .build()
}

fn mock_pipeline(
    source: MockSource,
) -> (ViewerPipeline<MockSource, MockSnapshotWriter>, Arc<Mutex<Vec<OutputFrame>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockSnapshotWriter {
        should_fail: false,
        written: written.clone(),
    };
    let pipeline = ViewerPipeline::with_custom(source, writer, ViewerConfig::default());
    (pipeline, written)
}

#[test]
fn session_presents_frames_until_quit() {
    let (mut pipeline, _) = mock_pipeline(MockSource::new());
    let mut sink = ScriptedSink::new(vec![None, None, None, Some(Command::Quit)]);

    pipeline.run(&mut sink).unwrap();

    assert_eq!(sink.presented.len(), 4);
    assert!(sink.presented.iter().all(|&dims| dims == (768, 576)));
    assert_eq!(pipeline.frames_presented(), 4);
}

#[test]
fn colormap_command_cycles_and_wraps() {
    let (mut pipeline, _) = mock_pipeline(MockSource::new());
    assert_eq!(pipeline.colormap(), Colormap::Inferno);

    for _ in 0..Colormap::COUNT {
        pipeline.handle_command(Command::CycleColormap);
    }
    assert_eq!(pipeline.colormap(), Colormap::Inferno);

    pipeline.handle_command(Command::CycleColormap);
    assert_eq!(pipeline.colormap(), Colormap::Jet);
}

#[test]
fn contrast_commands_saturate_at_the_bounds() {
    let (mut pipeline, _) = mock_pipeline(MockSource::new());
    assert_eq!(pipeline.clip_limit(), CLIP_LIMIT_DEFAULT);

    for _ in 0..100 {
        pipeline.handle_command(Command::IncreaseContrast);
    }
    assert_eq!(pipeline.clip_limit(), CLIP_LIMIT_MAX);

    pipeline.handle_command(Command::IncreaseContrast);
    assert_eq!(pipeline.clip_limit(), CLIP_LIMIT_MAX);
}

#[test]
fn snapshot_command_hands_the_last_frame_to_the_writer() {
    let tmp = tempfile::tempdir().unwrap();
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockSnapshotWriter {
        should_fail: false,
        written: written.clone(),
    };
    let mut pipeline =
        ViewerPipeline::with_custom(MockSource::new(), writer, test_config(tmp.path()));

    let mut sink = ScriptedSink::new(vec![None, Some(Command::Snapshot), Some(Command::Quit)]);
    pipeline.run(&mut sink).unwrap();

    let written = written.lock().unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!((written[0].width, written[0].height), (768, 576));
}

#[test]
fn snapshot_failure_does_not_end_the_session() {
    let tmp = tempfile::tempdir().unwrap();
    let writer = MockSnapshotWriter {
        should_fail: true,
        written: Arc::new(Mutex::new(Vec::new())),
    };
    let mut pipeline =
        ViewerPipeline::with_custom(MockSource::new(), writer, test_config(tmp.path()));

    let mut sink = ScriptedSink::new(vec![
        Some(Command::Snapshot),
        None,
        None,
        Some(Command::Quit),
    ]);
    pipeline.run(&mut sink).unwrap();
    assert_eq!(pipeline.frames_presented(), 4);
}

#[test]
fn snapshot_before_any_frame_is_a_no_op() {
    let tmp = tempfile::tempdir().unwrap();
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockSnapshotWriter {
        should_fail: false,
        written: written.clone(),
    };
    let mut pipeline =
        ViewerPipeline::with_custom(MockSource::new(), writer, test_config(tmp.path()));

    pipeline.handle_command(Command::Snapshot);
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn hot_spot_renders_the_palette_top_at_its_scaled_position() {
    // Uniform 100-count scene, one hot pixel at (20, 10), one cold at
    // (100, 50). After normalize + enhance the hot pixel must carry the
    // palette's highest-intensity color at display position (60, 30); the
    // hot marker's broken crosshair leaves that exact pixel untouched.
    let (mut pipeline, _) = mock_pipeline(MockSource::new());
    let raw = MockSource::new().read_frame().unwrap();
    let output = pipeline.process_frame(&raw);

    let lut = Colormap::Inferno.lut();
    assert_eq!(output.pixel(20 * 3, 10 * 3), lut[255]);
}

#[test]
fn snapshot_file_on_disk_has_display_dimensions() {
    let tmp = tempfile::tempdir().unwrap();
    let mut pipeline = ViewerPipeline::new(MockSource::new(), test_config(tmp.path()));

    let mut sink = ScriptedSink::new(vec![None, Some(Command::Snapshot), Some(Command::Quit)]);
    pipeline.run(&mut sink).unwrap();

    let entry = std::fs::read_dir(tmp.path())
        .unwrap()
        .next()
        .expect("snapshot file must exist")
        .unwrap();
    let file = std::fs::File::open(entry.path()).unwrap();
    let mut decoder = tiff::decoder::Decoder::new(file).unwrap();
    assert_eq!(decoder.dimensions().unwrap(), (768, 576));
}

#[test]
fn session_survives_a_device_recovery_episode() {
    let mut inner = MockSource::new();
    inner.pending_failures = 5;
    let source = RecoveringSource::new(inner);

    let (mut pipeline, _) = mock_pipeline_recovering(source);
    let mut sink = ScriptedSink::new(vec![None, None, Some(Command::Quit)]);

    pipeline.run(&mut sink).unwrap();

    assert_eq!(sink.presented.len(), 3);
    let resets = pipeline_resets(&pipeline);
    assert!(resets <= MAX_RESET_ATTEMPTS);
    assert!(resets > 0, "recovery should have reset the device");
}

#[test]
fn unrecoverable_device_surfaces_from_run() {
    let mut inner = MockSource::new();
    inner.pending_failures = u32::MAX;
    let source = RecoveringSource::new(inner);

    let (mut pipeline, _) = mock_pipeline_recovering(source);
    let mut sink = ScriptedSink::new(vec![None; 8]);

    let err = pipeline.run(&mut sink).unwrap_err();
    assert!(matches!(err, ThermalError::Unrecoverable(_)));
    assert!(sink.presented.is_empty());
}

type RecoveringPipeline = ViewerPipeline<RecoveringSource<MockSource>, MockSnapshotWriter>;

fn mock_pipeline_recovering(
    source: RecoveringSource<MockSource>,
) -> (RecoveringPipeline, Arc<Mutex<Vec<OutputFrame>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockSnapshotWriter {
        should_fail: false,
        written: written.clone(),
    };
    let pipeline = ViewerPipeline::with_custom(source, writer, ViewerConfig::default());
    (pipeline, written)
}

fn pipeline_resets(pipeline: &RecoveringPipeline) -> u32 {
    pipeline.source().inner().resets
}

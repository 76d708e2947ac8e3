use std::io::Write;

use crate::thermal_pipeline::common::error::Result;
use crate::thermal_pipeline::render::types::OutputFrame;
use crate::thermal_pipeline::snapshot::types::SnapshotConfig;

pub trait SnapshotWriter {
    fn write_snapshot(
        &self,
        image: &OutputFrame,
        output: &mut dyn Write,
        config: &SnapshotConfig,
    ) -> Result<()>;
}

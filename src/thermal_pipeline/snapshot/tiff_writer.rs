use std::io::Write;
use tracing::debug;

use crate::thermal_pipeline::common::error::{Result, ThermalError};
use crate::thermal_pipeline::render::types::OutputFrame;
use crate::thermal_pipeline::snapshot::types::{SnapshotCompression, SnapshotConfig};
use crate::thermal_pipeline::snapshot::writer::SnapshotWriter;

pub struct TiffSnapshotWriter;

impl SnapshotWriter for TiffSnapshotWriter {
    fn write_snapshot(
        &self,
        image: &OutputFrame,
        output: &mut dyn Write,
        config: &SnapshotConfig,
    ) -> Result<()> {
        debug!("encoding snapshot: {}x{}", image.width, image.height);

        let mut buffer = Vec::new();

        let compression = match config.compression {
            SnapshotCompression::None => tiff::encoder::Compression::Uncompressed,
            SnapshotCompression::Lzw => tiff::encoder::Compression::Lzw,
            SnapshotCompression::DeflateFast => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Fast,
            ),
            SnapshotCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Balanced,
            ),
            SnapshotCompression::DeflateBest => tiff::encoder::Compression::Deflate(
                tiff::encoder::compression::DeflateLevel::Best,
            ),
        };

        let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ThermalError::EncodeError(e.to_string()))?
            .with_compression(compression);

        encoder
            .write_image::<tiff::encoder::colortype::RGB8>(
                image.width as u32,
                image.height as u32,
                &image.data,
            )
            .map_err(|e| ThermalError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("snapshot encoding complete");
        Ok(())
    }
}

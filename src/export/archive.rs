//! Image archive export
//!
//! Images are fetched one at a time and packed into a deflate-compressed
//! ZIP. Entries are named by the inscription's position in the sorted set,
//! so a failed fetch leaves a gap instead of shifting later names.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::error::ExportResult;
use crate::inscription::Inscription;
use crate::source::InscriptionSource;

/// File name offered for the archive download
pub const ARCHIVE_FILENAME: &str = "images.zip";

/// Entry name for the image at `index`
pub fn image_entry_name(index: usize) -> String {
    format!("image_{}.png", index)
}

/// An image that was fetched successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub index: usize,
    pub bytes: Vec<u8>,
}

/// An image that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImage {
    pub index: usize,
    pub url: String,
    pub reason: String,
}

/// A finished image archive
#[derive(Debug, Clone)]
pub struct ImageArchive {
    /// ZIP file contents
    pub bytes: Vec<u8>,
    /// Entry names written, in order
    pub included: Vec<String>,
    /// Images left out
    pub skipped: Vec<SkippedImage>,
}

/// Fetch every record's image, sequentially
///
/// Failures are collected rather than returned.
pub async fn collect_images(
    source: &dyn InscriptionSource,
    records: &[Inscription],
) -> (Vec<FetchedImage>, Vec<SkippedImage>) {
    let mut fetched = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match source.fetch_image(&record.image_url).await {
            Ok(bytes) => fetched.push(FetchedImage { index, bytes }),
            Err(e) => {
                tracing::warn!(
                    index,
                    url = %record.image_url,
                    error = %e,
                    "Skipping image in archive"
                );
                skipped.push(SkippedImage {
                    index,
                    url: record.image_url.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (fetched, skipped)
}

/// Pack fetched images into a ZIP, returning the archive bytes and entry names
pub fn pack_images(images: &[FetchedImage]) -> ExportResult<(Vec<u8>, Vec<String>)> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut names = Vec::with_capacity(images.len());
    for image in images {
        let name = image_entry_name(image.index);
        writer.start_file(name.as_str(), options)?;
        writer.write_all(&image.bytes)?;
        names.push(name);
    }

    let cursor = writer.finish()?;
    Ok((cursor.into_inner(), names))
}

/// Fetch all images for `records` and pack them into an archive
pub async fn build_image_archive(
    source: &dyn InscriptionSource,
    records: &[Inscription],
) -> ExportResult<ImageArchive> {
    let (fetched, skipped) = collect_images(source, records).await;
    let (bytes, included) = pack_images(&fetched)?;

    tracing::info!(
        included = included.len(),
        skipped = skipped.len(),
        size_bytes = bytes.len(),
        "Built image archive"
    );

    Ok(ImageArchive {
        bytes,
        included,
        skipped,
    })
}

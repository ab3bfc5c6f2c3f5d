//! Exports
//!
//! Turns the filtered, sorted inscriptions into downloadable files:
//!
//! - [`encode_csv`] / [`decode_csv`]: the table as `inscriptions.csv`
//! - [`collect_images`] / [`pack_images`]: referenced images as `images.zip`
//! - [`DownloadLink`]: base64 data-URI links for embedding in a page

mod archive;
mod error;
mod link;
mod table;

pub use archive::{
    build_image_archive, collect_images, image_entry_name, pack_images, FetchedImage,
    ImageArchive, SkippedImage, ARCHIVE_FILENAME,
};
pub use error::{ExportError, ExportResult};
pub use link::{data_uri, DownloadLink};
pub use table::{decode_csv, encode_csv, CSV_COLUMNS, CSV_FILENAME};

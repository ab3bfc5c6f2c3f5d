//! Data-URI download links

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::archive::ARCHIVE_FILENAME;
use super::table::CSV_FILENAME;

/// Encode bytes as a base64 `data:` URI
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// A self-contained download link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub filename: String,
    pub href: String,
}

impl DownloadLink {
    /// Link that downloads the CSV table
    pub fn csv(csv: &str) -> Self {
        Self {
            filename: CSV_FILENAME.to_string(),
            href: data_uri("file/csv", csv.as_bytes()),
        }
    }

    /// Link that downloads the image archive
    pub fn archive(zip: &[u8]) -> Self {
        Self {
            filename: ARCHIVE_FILENAME.to_string(),
            href: data_uri("application/zip", zip),
        }
    }

    /// Render as an HTML anchor
    ///
    /// `href` is base64 and `filename` is fixed, so only the label needs
    /// escaping by the caller.
    pub fn to_html(&self, label: &str) -> String {
        format!(
            r#"<a class="download" href="{}" download="{}">{}</a>"#,
            self.href, self.filename, label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri() {
        assert_eq!(data_uri("text/plain", b"hi"), "data:text/plain;base64,aGk=");
    }

    #[test]
    fn test_csv_link_decodes_back() {
        let csv = "title,views\nx,1\n";
        let link = DownloadLink::csv(csv);

        assert_eq!(link.filename, "inscriptions.csv");
        let encoded = link.href.strip_prefix("data:file/csv;base64,").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded, csv.as_bytes());
    }

    #[test]
    fn test_archive_link_html() {
        let html = DownloadLink::archive(b"PK").to_html("Download Images Zip");
        assert_eq!(
            html,
            r#"<a class="download" href="data:application/zip;base64,UEs=" download="images.zip">Download Images Zip</a>"#
        );
    }
}

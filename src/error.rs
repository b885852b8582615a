use thiserror::Error;

/// Every failure the gallery can report.
///
/// None of these are fatal to the server: each one is scoped to a single
/// interaction (or a single grid cell) and is surfaced inline on the page.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The uploaded workbook has no `link` header.
    #[error("The uploaded Excel file must contain a column named 'link'.")]
    MissingLinkColumn,

    /// The workbook could not be opened or its first sheet could not be read.
    #[error("Failed to read Excel file: {0}")]
    Workbook(#[from] calamine::XlsxError),

    #[error("No sheets found in Excel file")]
    EmptyWorkbook,

    /// Only `.xlsx` uploads are accepted.
    #[error("Unsupported file type: {0} (expected an .xlsx file)")]
    UnsupportedFile(String),

    /// The multipart upload was malformed or carried no file.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// A token in the row-number input is not an integer.
    #[error("Invalid row number '{0}': enter row numbers separated by commas")]
    InvalidRowNumber(String),

    #[cfg(feature = "web")]
    #[error("Error loading image from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error loading image from {url}: server responded with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Error loading image from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode thumbnail: {0}")]
    Encode(#[source] image::ImageError),
}

pub type Result<T> = std::result::Result<T, GalleryError>;

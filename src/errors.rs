// errors.rs
use thiserror::Error;

/// Errors from the static file server's request handling.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Forbidden")]
    Forbidden,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Internal Server Error")]
    InternalError,
}

/// Errors from reading and writing tabular output.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("column '{0}' not found in input")]
    MissingColumn(String),
}

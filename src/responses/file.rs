// responses/file.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use mime::Mime;
use std::path::Path;

/// Media type served for a file, chosen by extension.
pub fn content_type_for(path: &Path) -> Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "js" | "mjs" => mime::APPLICATION_JAVASCRIPT,
        "html" | "htm" => mime::TEXT_HTML_UTF_8,
        "css" => mime::TEXT_CSS,
        "csv" => mime::TEXT_CSV,
        "txt" | "md" => mime::TEXT_PLAIN_UTF_8,
        "json" | "geojson" => mime::APPLICATION_JSON,
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "svg" => mime::IMAGE_SVG,
        "pdf" => mime::APPLICATION_PDF,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Return file contents with a content type picked from `path`.
pub fn file_response(path: &Path, contents: Vec<u8>, head_only: bool) -> ResultResp {
    let len = contents.len();

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type_for(path).as_ref())
        .header("Content-Length", len)
        .body(if head_only {
            Body::empty()
        } else {
            Body::from(contents)
        })
        .map_err(|_| ServerError::InternalError)
}

pub fn redirect_response(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(301)
        .header("Location", location)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

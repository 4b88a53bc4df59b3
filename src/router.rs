use crate::errors::ServerError;
use crate::responses::{file_response, html_response, redirect_response, ResultResp};
use crate::templates::{directory_listing, ListingEntry};
use astra::Request;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serves files below `root`. Directories serve their `index.html` or a
/// generated listing.
pub fn handle(req: Request, root: &Path) -> ResultResp {
    let head_only = match req.method().as_str() {
        "GET" => false,
        "HEAD" => true,
        _ => return Err(ServerError::MethodNotAllowed),
    };
    let path = req.uri().path();
    debug!(method = %req.method(), path, "request");

    let target = resolve(root, path)?;

    if target.is_dir() {
        if !path.ends_with('/') {
            return redirect_response(&format!("{path}/"));
        }

        let index = target.join("index.html");
        if index.is_file() {
            return serve_file(&index, head_only);
        }

        let entries = list_dir(&target)?;
        return html_response(directory_listing(path, &entries), head_only);
    }

    if target.is_file() {
        return serve_file(&target, head_only);
    }

    Err(ServerError::NotFound)
}

/// Maps a request path onto the served tree, refusing anything that would
/// step outside it.
fn resolve(root: &Path, request_path: &str) -> Result<PathBuf, ServerError> {
    let mut resolved = root.to_path_buf();

    for segment in request_path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(ServerError::Forbidden),
            s if s.contains('\\') || s.contains(':') => return Err(ServerError::Forbidden),
            s => resolved.push(s),
        }
    }

    Ok(resolved)
}

fn serve_file(path: &Path, head_only: bool) -> ResultResp {
    let contents = fs::read(path).map_err(io_error)?;
    file_response(path, contents, head_only)
}

fn list_dir(dir: &Path) -> Result<Vec<ListingEntry>, ServerError> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().map_err(io_error)?.is_dir();
        let label = if is_dir { format!("{name}/") } else { name };

        entries.push(ListingEntry {
            href: label.clone(),
            label,
        });
    }

    entries.sort_by_key(|e| e.label.to_lowercase());
    Ok(entries)
}

fn io_error(e: std::io::Error) -> ServerError {
    match e.kind() {
        std::io::ErrorKind::NotFound => ServerError::NotFound,
        std::io::ErrorKind::PermissionDenied => ServerError::Forbidden,
        _ => ServerError::Io(e.to_string()),
    }
}

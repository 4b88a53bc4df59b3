use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use maud::{html, DOCTYPE};
use tracing::error;

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into an HTML error page. HEAD requests get the
/// status and headers with an empty body.
pub fn error_to_response(err: ServerError, head_only: bool) -> Response {
    let (status, message) = match err {
        ServerError::NotFound => (404, "File not found"),
        ServerError::Forbidden => (403, "Forbidden"),
        ServerError::MethodNotAllowed => (405, "Method Not Allowed"),
        ServerError::Io(detail) => {
            // filesystem detail stays in the log
            error!(error = %detail, "Failed to serve file");
            (500, "Internal Server Error")
        }
        ServerError::InternalError => (500, "Internal Server Error"),
    };
    html_error_response(status, message, head_only)
}

/// Build an HTML error page
pub fn html_error_response(status: u16, message: &str, head_only: bool) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
            }
            body {
                h1 { "Error " (status) }
                p { (message) }
            }
        }
    }
    .into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", page.len())
        .body(if head_only {
            Body::empty()
        } else {
            Body::from(page)
        })
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup, head_only: bool) -> ResultResp {
    let body = markup.into_string();
    let len = body.len();

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", len)
        .body(if head_only {
            Body::empty()
        } else {
            Body::from(body)
        })
        .map_err(|_| ServerError::InternalError)
}

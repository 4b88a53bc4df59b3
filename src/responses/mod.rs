pub mod errors;
pub mod file;
pub mod html;

pub use errors::{error_to_response, ResultResp};
pub use file::{file_response, redirect_response};
pub use html::html_response;

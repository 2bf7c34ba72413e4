//! # Haven Web Utilities
//!
//! Building blocks shared by the Haven HTTP endpoints:
//!
//! - **Validation**: [`QueryValidator`] turns raw query strings into typed,
//!   defaulted parameters or a field-level `VALIDATION_ERROR`
//! - **Responses**: [`ApiResponse`] renders the `{ data, error, metadata }` envelope
//! - **Errors**: [`WebError`] maps failures onto envelope errors and status codes
//! - **Middleware**: request ids, CORS, panic capture, request timeouts,
//!   development error details, and the session adapter that guards account pages

pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod utils;
pub mod validation;

pub use errors::{InternalErrorDetail, WebError, WebResult};
pub use extractors::{CurrentUser, ListingIdPath, MaybeUser, RawQuery};
pub use middleware::{
    clear_cookies, cookie_value, cors_layer, error_detail_middleware, handle_not_found, panic_response,
    request_id_middleware, session_cookies, session_middleware, timeout_middleware, ErrorExposure, RequestId,
    RequestTimeout, SessionState, REQUEST_ID_HEADER,
};
pub use utils::ApiResponse;
pub use validation::{FieldErrors, QueryValidator, MAX_TEXT_LEN};

pub mod cors;
pub mod error_handler;
pub mod request_id;
pub mod session;

pub use cors::cors_layer;
pub use error_handler::{
    error_detail_middleware, handle_not_found, panic_response, timeout_middleware, ErrorExposure, RequestTimeout,
};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use session::{clear_cookies, cookie_value, session_cookies, session_middleware, SessionState};

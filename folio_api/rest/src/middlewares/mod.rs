pub mod headers;
pub mod panic_handler;
pub mod request_id;
pub mod trace;

//! Turn panics inside request handlers into `500 Internal error` responses.

use std::{any::Any, panic::AssertUnwindSafe};

use anyhow::anyhow;
use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use futures::FutureExt;

use crate::routes::internal_server_error;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(from_fn(catch_panic))
}

async fn catch_panic(request: Request, next: Next) -> Response {
    AssertUnwindSafe(next.run(request))
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| {
            let reason = panic_message(&*payload).unwrap_or("unknown reason");
            internal_server_error(anyhow!("Request handler panicked: {reason}"))
        })
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_messages() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(&*payload), Some("boom"));

        let payload: Box<dyn Any + Send> = Box::new(format!("boom {}", 42));
        assert_eq!(panic_message(&*payload), Some("boom 42"));

        let payload: Box<dyn Any + Send> = Box::new(42);
        assert_eq!(panic_message(&*payload), None);
    }
}

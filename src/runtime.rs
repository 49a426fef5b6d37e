//! Continuation-style dispatch of bridge operations.
//!
//! Every operation of this crate is an `async fn`. Callers that prefer
//! callbacks (UI code, game loops) hand the operation to [`dispatch`] or
//! [`dispatch_with`]: control returns immediately and exactly one of the
//! continuations runs once the exchange completes.
//!
//! Both functions spawn onto the current tokio runtime and panic when called
//! outside of one.
//!
//! # Example
//!
//! ```ignore
//! let client = session.client()?;
//! runtime::dispatch(
//!     async move { client.list_lamps().await },
//!     |lamps| println!("{} lamps", lamps.len()),
//! );
//! ```

use std::future::Future;

use tokio::task::JoinHandle;

use crate::errors::Error;

/// Run `operation` in the background and pass its value to `on_success`.
///
/// Failures are logged with [`Error::log`] and otherwise dropped.
pub fn dispatch<T, F, S>(operation: F, on_success: S) -> JoinHandle<()>
where
    F: Future<Output = Result<T, Error>> + Send + 'static,
    T: Send + 'static,
    S: FnOnce(T) + Send + 'static,
{
    dispatch_with(operation, on_success, |err: Error| err.log())
}

/// Run `operation` in the background and hand its outcome to one of the
/// continuations.
pub fn dispatch_with<T, F, S, E>(operation: F, on_success: S, on_failure: E) -> JoinHandle<()>
where
    F: Future<Output = Result<T, Error>> + Send + 'static,
    T: Send + 'static,
    S: FnOnce(T) + Send + 'static,
    E: FnOnce(Error) + Send + 'static,
{
    tokio::spawn(async move {
        match operation.await {
            Ok(value) => on_success(value),
            Err(err) => on_failure(err),
        }
    })
}

//! Raw HTTP/1.1 client engine: target resolution, connections, response
//! parsing, and the closed-loop worker.
mod connection;
mod fault;
mod request;
mod response;
mod target;
mod tls;
mod worker;


pub use target::{ResolvedTarget, Scheme, TargetUrl, parse_target, resolve_target};

pub(crate) use request::render_get_request;
pub(crate) use tls::{TlsSettings, build_tls_connector};
pub(crate) use worker::{Worker, WorkerPlan};

#[cfg(any(test, feature = "fuzzing"))]
pub(crate) use fault::Fault;
#[cfg(any(test, feature = "fuzzing"))]
pub(crate) use response::read_response;
#[cfg(test)]
pub(crate) use response::ParsedResponse;

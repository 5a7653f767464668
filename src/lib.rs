//! Items gateway
//!
//! A small JSON API for a single mock "items" resource. The [`router`] maps
//! a method/path/body descriptor to one of five CRUD handlers and always
//! answers with a CORS-enabled JSON [`envelope::Response`]. The router is
//! reachable two ways:
//! - [`gateway`]: API-gateway proxy events (`httpMethod`, `path`, `body`)
//! - [`server`]/[`http`]: a hyper HTTP/1.1 server

pub mod clock;
pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod http;
pub mod items;
pub mod logger;
pub mod router;
pub mod server;

pub use envelope::{Request, Response};
pub use router::Router;

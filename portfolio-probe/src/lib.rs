//! # portfolio-probe
//!
//! Blocking HTTP checks against the backend services.
//!
//! [`verify::verify`] probes every configured service's status routes;
//! [`tiles::snapshot_tiles`] copies the portfolio tiles and status documents
//! to local snapshot files.

pub mod error;
pub mod http;
pub mod tiles;
pub mod verify;

pub use error::ProbeError;
pub use http::{HttpClient, HttpResponse};
pub use tiles::{snapshot_from_config, snapshot_tiles, TilesSnapshot};
pub use verify::{verify, verify_config, CheckOutcome, EndpointCheck, VerifyReport};

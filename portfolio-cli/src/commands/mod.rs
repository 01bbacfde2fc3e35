pub mod all;
pub mod build;
pub mod deploy;
pub mod invalidate;
pub mod placeholder;
pub mod tiles;
pub mod verify;

/// Exit code for `verify`/`all` when endpoints are unhealthy.
pub const EXIT_UNHEALTHY: u8 = 2;

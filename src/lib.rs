//=========================================================================
// Skeeball Cabinet Controller - Library Root
//
// This crate defines the public API surface of the cabinet controller.
//
// Responsibilities:
// - Expose the cabinet runtime (`CabinetBuilder`, `Cabinet`)
// - Expose configuration loading and the error types
// - Keep the dev window (`platform`) hidden from library users
//
// Typical usage:
// ```no_run
// use skeeball::{CabinetBuilder, CabinetConfig};
//
// fn main() -> skeeball::Result<()> {
//     let config = CabinetConfig::load("cabinet.toml".as_ref())?;
//     CabinetBuilder::new(config).build()?.run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the state machine and everything it drives. It is public
// so tests and alternative front ends can assemble a `Dispatcher` with
// their own collaborators.
//
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit dev window and is compiled only with the
// `dev-window` feature.
//
mod engine;
#[cfg(feature = "dev-window")]
mod platform;

//--- Public Exports ------------------------------------------------------

pub use config::CabinetConfig;
pub use engine::{Cabinet, CabinetBuilder};
pub use error::{CabinetError, DispatchError, Result};

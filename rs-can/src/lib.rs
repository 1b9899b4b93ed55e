//! **`rs-can`**, the CAN types shared by every bus backend in this workspace.
//!
//! A backend implements [`CanDevice`] for its handle and [`Frame`] for its message type,
//! callers only ever talk to those two traits.

mod constants;
pub use constants::*;
mod device;
pub use device::*;
mod error;
pub use error::*;
mod frame;
pub use frame::*;

pub mod utils;

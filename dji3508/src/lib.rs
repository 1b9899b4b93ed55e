//! **`dji3508`**, command encoding and transmission for a DJI 3508 motor controller.
//!
//! The controller sends one 8-byte frame with standard id `0x200`:
//! `[i16 torque_current LE][i16 speed LE][i16 angle-or-0 LE][0x00 0x00]`.
//! Any [`rs_can::CanDevice`] can carry it.

mod command;
pub use command::*;
mod config;
pub use config::*;
mod constants;
pub use constants::*;
mod controller;
pub use controller::*;
mod error;
pub use error::*;
mod policy;
pub use policy::*;

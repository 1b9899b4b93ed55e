use rs_can::CanError;
use crate::command::CommandField;

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum MotorError {
    #[error("DJI3508 - bus error: {0}")]
    Can(#[from] CanError),

    #[error("DJI3508 - {field}: {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: CommandField,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("DJI3508 - can't build a frame with id: {0:#05X}")]
    FrameBuild(u32),

    #[error("DJI3508 - controller is closed")]
    Closed,

    #[error("DJI3508 - config error: {0}")]
    ConfigError(String),
}

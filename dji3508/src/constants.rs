/// Arbitration id of the current-control frame, standard 11-bit.
pub const CONTROL_ID: u16 = 0x200;
/// Payload length of every command frame.
pub const FRAME_LENGTH: usize = 8;

pub const TORQUE_CURRENT_MIN: i32 = -16384;
pub const TORQUE_CURRENT_MAX: i32 = 16384;
pub const SPEED_MIN: i32 = i16::MIN as i32;
pub const SPEED_MAX: i32 = i16::MAX as i32;
/// One mechanical turn of the rotor encoder is 8192 counts.
pub const ANGLE_MIN: i32 = 0;
pub const ANGLE_MAX: i32 = 8191;

pub const DEFAULT_CHANNEL: &str = "can0";
pub const DEFAULT_REPEAT: u32 = 20_000;
pub const DEFAULT_INTERVAL_MS: u64 = 1;
pub const DEFAULT_SETTLE_MS: u64 = 3_000;
/// Longest sleep between two looks at a [`crate::CancelToken`].
pub const CANCEL_POLL_MS: u64 = 10;

/// Environment file loaded before the config lookup.
pub const DJI3508_ENV: &str = ".env";
/// Environment variable holding the path of a YAML [`crate::MotorConfig`].
pub const DJI3508_CONFIG_VAR: &str = "DJI3508_CONFIG";

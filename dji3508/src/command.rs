use std::fmt::{Display, Formatter};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use crate::constants::*;
use crate::error::MotorError;

bitflags! {
    /// Fields that were constrained to their hardware limits while encoding.
    #[repr(transparent)]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct Clamped: u8 {
        const TORQUE_CURRENT = 0x01;
        const SPEED = 0x02;
        const ANGLE = 0x04;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandField {
    TorqueCurrent,
    Speed,
    Angle,
}

impl CommandField {
    #[inline]
    pub const fn range(self) -> (i32, i32) {
        match self {
            Self::TorqueCurrent => (TORQUE_CURRENT_MIN, TORQUE_CURRENT_MAX),
            Self::Speed => (SPEED_MIN, SPEED_MAX),
            Self::Angle => (ANGLE_MIN, ANGLE_MAX),
        }
    }

    #[inline]
    const fn flag(self) -> Clamped {
        match self {
            Self::TorqueCurrent => Clamped::TORQUE_CURRENT,
            Self::Speed => Clamped::SPEED,
            Self::Angle => Clamped::ANGLE,
        }
    }
}

impl Display for CommandField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TorqueCurrent => f.write_str("torque_current"),
            Self::Speed => f.write_str("speed"),
            Self::Angle => f.write_str("angle"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// The angle field is sent as zero.
    #[default]
    Current,
    /// The angle field carries the target angle.
    Angle,
}

/// One motor command as requested by the caller.
///
/// Values are kept as requested; limits are applied by [`MotorCommand::encode`]
/// or enforced by [`MotorCommand::encode_strict`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MotorCommand {
    mode: ControlMode,
    torque_current: i32,
    speed: i32,
    angle: i32,
}

impl MotorCommand {
    #[inline]
    pub const fn new(torque_current: i32, speed: i32) -> Self {
        Self { mode: ControlMode::Current, torque_current, speed, angle: 0 }
    }

    #[inline]
    pub const fn with_angle(torque_current: i32, speed: i32, angle: i32) -> Self {
        Self { mode: ControlMode::Angle, torque_current, speed, angle }
    }

    /// Zero torque current and zero speed.
    #[inline]
    pub const fn stop() -> Self {
        Self::new(0, 0)
    }

    #[inline]
    pub const fn mode(&self) -> ControlMode {
        self.mode
    }

    #[inline]
    pub const fn torque_current(&self) -> i32 {
        self.torque_current
    }

    #[inline]
    pub const fn speed(&self) -> i32 {
        self.speed
    }

    #[inline]
    pub const fn angle(&self) -> i32 {
        self.angle
    }

    /// Encode with every field clamped to its limits.
    ///
    /// Each clamped field is flagged in [`EncodedCommand::clamped`] and logged.
    pub fn encode(&self) -> EncodedCommand {
        let mut clamped = Clamped::empty();
        let mut limit = |field: CommandField, value: i32| -> i16 {
            let (min, max) = field.range();
            let result = value.clamp(min, max);
            if result != value {
                log::warn!("DJI3508 - {}: {} clamped to {}", field, value, result);
                clamped |= field.flag();
            }
            result as i16
        };

        let torque_current = limit(CommandField::TorqueCurrent, self.torque_current);
        let speed = limit(CommandField::Speed, self.speed);
        let angle = match self.mode {
            ControlMode::Angle => limit(CommandField::Angle, self.angle),
            ControlMode::Current => 0,
        };

        let mut data = [0u8; FRAME_LENGTH];
        data[0..2].copy_from_slice(&torque_current.to_le_bytes());
        data[2..4].copy_from_slice(&speed.to_le_bytes());
        data[4..6].copy_from_slice(&angle.to_le_bytes());

        EncodedCommand { data, clamped }
    }

    /// Encode, rejecting the first field outside its limits.
    ///
    /// The angle is only checked in [`ControlMode::Angle`].
    pub fn encode_strict(&self) -> Result<EncodedCommand, MotorError> {
        let mut fields = vec![
            (CommandField::TorqueCurrent, self.torque_current),
            (CommandField::Speed, self.speed),
        ];
        if self.mode == ControlMode::Angle {
            fields.push((CommandField::Angle, self.angle));
        }

        for (field, value) in fields {
            let (min, max) = field.range();
            if !(min..=max).contains(&value) {
                return Err(MotorError::OutOfRange { field, value, min, max });
            }
        }

        Ok(self.encode())
    }
}

impl Display for MotorCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.mode {
            ControlMode::Current => write!(f, "torque_current: {}, speed: {}",
                                           self.torque_current, self.speed),
            ControlMode::Angle => write!(f, "torque_current: {}, speed: {}, angle: {}",
                                         self.torque_current, self.speed, self.angle),
        }
    }
}

/// The 8-byte payload of a command frame.
///
/// `[i16 torque_current LE][i16 speed LE][i16 angle-or-0 LE][0x00 0x00]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedCommand {
    data: [u8; FRAME_LENGTH],
    clamped: Clamped,
}

impl EncodedCommand {
    #[inline]
    pub fn data(&self) -> &[u8; FRAME_LENGTH] {
        &self.data
    }

    #[inline]
    pub fn clamped(&self) -> Clamped {
        self.clamped
    }

    #[inline]
    pub fn is_clamped(&self) -> bool {
        !self.clamped.is_empty()
    }

    #[inline]
    pub fn into_bytes(self) -> [u8; FRAME_LENGTH] {
        self.data
    }
}

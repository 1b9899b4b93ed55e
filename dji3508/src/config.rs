use std::{fs::read_to_string, path::Path, time::Duration};
use serde::{Deserialize, Serialize};
use crate::command::{ControlMode, EncodedCommand, MotorCommand};
use crate::constants::*;
use crate::error::MotorError;
use crate::policy::TransmitPolicy;

/// Everything one run of the tool needs.
///
/// Any field missing from a YAML file falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    pub channel: String,
    pub mode: ControlMode,
    pub torque_current: i32,
    pub speed: i32,
    pub angle: i32,
    pub repeat: u32,
    pub interval_ms: u64,
    /// Pause between the held command and the stop frame.
    pub settle_ms: u64,
    pub send_timeout_ms: Option<u32>,
    /// Reject out-of-range values instead of clamping them.
    pub strict: bool,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.into(),
            mode: Default::default(),
            torque_current: 20,
            speed: 10,
            angle: 0,
            repeat: DEFAULT_REPEAT,
            interval_ms: DEFAULT_INTERVAL_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            send_timeout_ms: None,
            strict: false,
        }
    }
}

impl MotorConfig {
    /// Load `path` if given, otherwise the file named by `DJI3508_CONFIG`
    /// (read from the process environment or `.env`), otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, MotorError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        if let Err(e) = dotenvy::from_filename(DJI3508_ENV) {
            log::trace!("DJI3508 - {} not loaded: {}", DJI3508_ENV, e);
        }
        match std::env::var(DJI3508_CONFIG_VAR) {
            Ok(v) => Self::from_file(Path::new(&v)),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, MotorError> {
        let data = read_to_string(path)
            .map_err(|e| MotorError::ConfigError(format!("Unable to read `{}`: {}", path.display(), e)))?;
        let config = Self::from_yaml(&data)?;
        log::debug!("DJI3508 - config loaded from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(data: &str) -> Result<Self, MotorError> {
        serde_yaml::from_str(data)
            .map_err(|e| MotorError::ConfigError(format!("Error parsing YAML: {}", e)))
    }

    pub fn command(&self) -> MotorCommand {
        match self.mode {
            ControlMode::Current => MotorCommand::new(self.torque_current, self.speed),
            ControlMode::Angle => MotorCommand::with_angle(self.torque_current, self.speed, self.angle),
        }
    }

    /// The command encoded the way `strict` asks for.
    pub fn encoded_command(&self) -> Result<EncodedCommand, MotorError> {
        let command = self.command();
        if self.strict {
            command.encode_strict()
        } else {
            Ok(command.encode())
        }
    }

    #[inline]
    pub fn policy(&self) -> TransmitPolicy {
        TransmitPolicy::new(self.repeat, Duration::from_millis(self.interval_ms))
    }

    #[inline]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

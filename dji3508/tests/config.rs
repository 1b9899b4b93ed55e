use std::time::Duration;
use dji3508::{CommandField, ControlMode, MotorCommand, MotorConfig, MotorError, TransmitPolicy};

#[test]
fn test_default() {
    let config = MotorConfig::default();
    assert_eq!(config.channel, "can0");
    assert_eq!(config.command(), MotorCommand::new(20, 10));
    assert_eq!(config.policy(), TransmitPolicy::default());
    assert_eq!(config.policy(), TransmitPolicy::new(20_000, Duration::from_millis(1)));
    assert_eq!(config.settle(), Duration::from_secs(3));
    assert!(!config.strict);
}

#[test]
fn test_from_yaml() -> anyhow::Result<()> {
    let config = MotorConfig::from_yaml(r#"
channel: vcan0
mode: angle
angle: 2048
repeat: 100
interval_ms: 5
"#)?;
    assert_eq!(config.channel, "vcan0");
    assert_eq!(config.mode, ControlMode::Angle);
    assert_eq!(config.command(), MotorCommand::with_angle(20, 10, 2048));
    assert_eq!(config.policy(), TransmitPolicy::new(100, Duration::from_millis(5)));
    assert_eq!(config.send_timeout_ms, None);
    Ok(())
}

#[test]
fn test_current_mode_drops_angle() -> anyhow::Result<()> {
    let config = MotorConfig::from_yaml("angle: 4096")?;
    assert_eq!(config.mode, ControlMode::Current);
    assert_eq!(&config.encoded_command()?.data()[4..6], &[0x00, 0x00]);
    Ok(())
}

#[test]
fn test_strict() -> anyhow::Result<()> {
    let mut config = MotorConfig::from_yaml("torque_current: -20000")?;
    assert!(config.encoded_command()?.is_clamped());

    config.strict = true;
    assert!(matches!(
        config.encoded_command(),
        Err(MotorError::OutOfRange { field: CommandField::TorqueCurrent, .. }),
    ));
    Ok(())
}

#[test]
fn test_invalid_yaml() {
    assert!(matches!(MotorConfig::from_yaml("repeat: many"), Err(MotorError::ConfigError(_))));
    assert!(matches!(
        MotorConfig::from_file("/nonexistent/dji3508.yaml".as_ref()),
        Err(MotorError::ConfigError(_)),
    ));
}

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use dji3508::{CancelToken, ControlMode, EncodedCommand, MotorConfig};

#[derive(Parser)]
#[command(
    name = "dji3508",
    about = "Hold a command on a DJI 3508 motor over SocketCAN, then stop it"
)]
struct Cli {
    /// CAN interface, e.g. can0 or vcan0 (default: can0)
    channel: Option<String>,

    /// YAML config file, overrides DJI3508_CONFIG
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Torque current, limited to [-16384, 16384]
    #[arg(long, allow_negative_numbers = true)]
    torque_current: Option<i32>,

    /// Speed, limited to [-32768, 32767]
    #[arg(long, allow_negative_numbers = true)]
    speed: Option<i32>,

    /// Target angle in [0, 8191], switches to angle control
    #[arg(long)]
    angle: Option<i32>,

    /// Number of times the command is sent
    #[arg(long, value_name = "N")]
    repeat: Option<u32>,

    /// Delay between two sends
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Pause after the command before the stop frame
    #[arg(long, value_name = "MS")]
    settle_ms: Option<u64>,

    /// Retry a full transmit queue for up to MS per frame
    #[arg(long, value_name = "MS")]
    send_timeout_ms: Option<u32>,

    /// Reject out-of-range values instead of clamping them
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn apply(self, config: &mut MotorConfig) {
        if let Some(channel) = self.channel {
            config.channel = channel;
        }
        if let Some(v) = self.torque_current {
            config.torque_current = v;
        }
        if let Some(v) = self.speed {
            config.speed = v;
        }
        if let Some(v) = self.angle {
            config.mode = ControlMode::Angle;
            config.angle = v;
        }
        if let Some(v) = self.repeat {
            config.repeat = v;
        }
        if let Some(v) = self.interval_ms {
            config.interval_ms = v;
        }
        if let Some(v) = self.settle_ms {
            config.settle_ms = v;
        }
        if self.send_timeout_ms.is_some() {
            config.send_timeout_ms = self.send_timeout_ms;
        }
        config.strict |= self.strict;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = MotorConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    log::debug!("DJI3508 - {:?}", config);

    let encoded = config.encoded_command()?;

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || {
            log::warn!("DJI3508 - interrupted by user");
            cancel.cancel();
        })
        .context("failed to install Ctrl-C handler")?;
    }

    run(&config, &encoded, &cancel)
}

#[cfg(target_os = "linux")]
fn run(config: &MotorConfig, encoded: &EncodedCommand, cancel: &CancelToken) -> anyhow::Result<()> {
    use dji3508::Dji3508;
    use socketcan_rs::SocketCan;

    let device = SocketCan::open(&config.channel)
        .with_context(|| format!("failed to open CAN channel `{}`", config.channel))?;
    let motor = Dji3508::open(device, config.channel.clone())?
        .with_send_timeout(config.send_timeout_ms);

    log::info!("DJI3508 - sending {} on {}", config.command(), config.channel);
    motor.hold_and_stop(encoded, &config.policy(), config.settle(), cancel)
        .context("motor run failed")?;
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(config: &MotorConfig, _: &EncodedCommand, _: &CancelToken) -> anyhow::Result<()> {
    anyhow::bail!("SocketCAN channel `{}` is only available on Linux", config.channel)
}

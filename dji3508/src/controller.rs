use std::time::Duration;
use rs_can::{CanDevice, CanError, Frame, Id};
use crate::command::{EncodedCommand, MotorCommand};
use crate::constants::CONTROL_ID;
use crate::error::MotorError;
use crate::policy::{CancelToken, HoldReport, TransmitPolicy};

/// A DJI 3508 motor controller reached through one channel of an opened CAN device.
///
/// The controller owns the device. It is shut down by [`Dji3508::close`] or,
/// failing that, when the controller is dropped.
pub struct Dji3508<D: CanDevice> {
    device: Option<D>,
    channel: D::Channel,
    id: Id,
    timeout: Option<u32>,
}

impl<D: CanDevice> Dji3508<D> {
    /// Take over `device`, which must already have `channel` open.
    pub fn open(mut device: D, channel: D::Channel) -> Result<Self, MotorError> {
        let name = channel.to_string();
        if !device.opened_channels()
            .iter()
            .any(|c| c.to_string() == name) {
            device.shutdown();
            return Err(CanError::channel_not_opened(name).into());
        }
        log::debug!("DJI3508 - controller opened on channel: {}", name);

        Ok(Self {
            device: Some(device),
            channel,
            id: Id::Standard(CONTROL_ID),
            timeout: None,
        })
    }

    /// Per-frame transmit timeout in milliseconds, `None` writes without retrying.
    #[inline]
    pub fn with_send_timeout(mut self, timeout: Option<u32>) -> Self {
        self.timeout = timeout;
        self
    }

    #[inline]
    pub fn channel(&self) -> &D::Channel {
        &self.channel
    }

    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    #[inline]
    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    /// Send `command` once, values out of range are clamped.
    pub fn send(&self, command: &MotorCommand) -> Result<EncodedCommand, MotorError> {
        let encoded = command.encode();
        self.send_encoded(&encoded)?;
        Ok(encoded)
    }

    pub fn send_encoded(&self, encoded: &EncodedCommand) -> Result<(), MotorError> {
        let device = self.device.as_ref()
            .ok_or(MotorError::Closed)?;

        let mut frame = D::Frame::new(self.id, encoded.data())
            .ok_or(MotorError::FrameBuild(self.id.into_bits()))?;
        frame.set_channel(self.channel.clone())
            .set_timestamp(None);

        if log::log_enabled!(log::Level::Trace) {
            let display: &dyn Frame<Channel = D::Channel> = &frame;
            log::trace!("DJI3508 - transmitting: {}", display);
        }

        device.transmit(frame, self.timeout)?;
        Ok(())
    }

    /// Send `command` repeatedly under `policy`.
    ///
    /// The wait between sends wakes early once `cancel` is set and no further
    /// frame is sent. The first bus error ends the hold and is returned.
    pub fn hold(
        &self,
        command: &MotorCommand,
        policy: &TransmitPolicy,
        cancel: &CancelToken,
    ) -> Result<HoldReport, MotorError> {
        let encoded = command.encode();
        self.hold_encoded(&encoded, policy, cancel)
    }

    pub fn hold_encoded(
        &self,
        encoded: &EncodedCommand,
        policy: &TransmitPolicy,
        cancel: &CancelToken,
    ) -> Result<HoldReport, MotorError> {
        let mut report = HoldReport::default();
        for i in 0..policy.repeat() {
            if i > 0 {
                cancel.wait(policy.interval());
            }
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }

            if let Err(e) = self.send_encoded(encoded) {
                log::warn!("DJI3508 - hold aborted after {} of {} frames: {}", report.sent, policy.repeat(), e);
                return Err(e);
            }
            report.sent += 1;
        }

        log::info!("DJI3508 - held {:02X?} for {} frames{}", encoded.data(), report.sent,
                   if report.cancelled { ", cancelled" } else { "" });
        Ok(report)
    }

    /// Send the zero torque, zero speed frame once.
    #[inline]
    pub fn stop_motor(&self) -> Result<(), MotorError> {
        self.send(&MotorCommand::stop())
            .map(|_| ())
    }

    pub fn stop_motor_with(&self, policy: &TransmitPolicy, cancel: &CancelToken) -> Result<HoldReport, MotorError> {
        self.hold(&MotorCommand::stop(), policy, cancel)
    }

    /// Hold `encoded`, wait `settle`, then send the stop frame and close the device.
    ///
    /// The stop frame and the close happen whatever the hold did: finished,
    /// cancelled or failed. A cancel also cuts the settle short. The hold error
    /// wins over a stop error when both fail.
    pub fn hold_and_stop(
        self,
        encoded: &EncodedCommand,
        policy: &TransmitPolicy,
        settle: Duration,
        cancel: &CancelToken,
    ) -> Result<HoldReport, MotorError> {
        let held = self.hold_encoded(encoded, policy, cancel);
        if matches!(held, Ok(HoldReport { cancelled: false, .. })) {
            cancel.wait(settle);
        }

        log::info!("DJI3508 - stopping motor");
        let stopped = self.stop_motor();
        if let Err(e) = &stopped {
            log::error!("DJI3508 - stop failed: {}", e);
        }
        self.close();

        let report = held?;
        stopped?;
        Ok(report)
    }

    /// Shut the device down.
    #[inline]
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.shutdown();
            log::debug!("DJI3508 - controller on channel: {} closed", self.channel);
        }
    }
}

impl<D: CanDevice> Drop for Dji3508<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

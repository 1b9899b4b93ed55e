//! SocketCAN backend for [`rs_can::CanDevice`], Linux only.
//!
//! Each opened channel is a raw CAN socket bound to the interface of the same name.

mod frame;
pub use frame::*;
mod socket;
pub use socket::*;

use std::{collections::HashMap, time::Duration};
use libc::can_frame;
use rs_can::{CanDevice, CanError};

#[derive(Debug, Default)]
pub struct SocketCan {
    sockets: HashMap<String, RawSocket>,
}

impl SocketCan {
    pub fn new() -> Self {
        Self { sockets: Default::default() }
    }

    /// Opens a device with a single channel bound.
    pub fn open(channel: &str) -> Result<Self, CanError> {
        let mut device = Self::new();
        device.init_channel(channel)?;
        Ok(device)
    }

    pub fn init_channel(&mut self, channel: &str) -> Result<(), CanError> {
        let index = iface_index(channel)
            .map_err(|e| {
                log::warn!("RUST-CAN - interface: {} lookup failed: {}", channel, e);
                CanError::ChannelInitializeError(channel.to_owned())
            })?;

        let socket = RawSocket::bind(index)
            .map_err(|e| {
                log::warn!("RUST-CAN - socket open on {} failed: {}", channel, e);
                CanError::DeviceOpenFailed
            })?;
        log::debug!("RUST-CAN - channel: {} opened on interface index {}", channel, index);

        self.sockets.insert(channel.to_owned(), socket);
        Ok(())
    }

    fn socket(&self, channel: &str) -> Result<&RawSocket, CanError> {
        self.sockets.get(channel)
            .ok_or_else(|| CanError::channel_not_opened(channel))
    }

    pub fn write(&self, msg: &CanMessage) -> Result<(), CanError> {
        let socket = self.socket(&msg.channel)?;
        socket.write_frame(&can_frame::from(msg))
            .map_err(CanError::operation_error)
    }

    /// Write a single frame, retrying a full transmit queue until `timeout` has passed.
    ///
    /// The frame is tried at least once, so a zero timeout still writes it.
    pub fn write_timeout(&self, msg: &CanMessage, timeout: Duration) -> Result<(), CanError> {
        let socket = self.socket(&msg.channel)?;
        let frame = can_frame::from(msg);
        write_retrying(timeout, || socket.write_frame(&frame))
            .map_err(|e| match e.should_retry() {
                true => CanError::channel_timeout(&msg.channel),
                false => CanError::operation_error(e),
            })
    }
}

impl CanDevice for SocketCan {
    type Channel = String;
    type Frame = CanMessage;

    #[inline(always)]
    fn opened_channels(&self) -> Vec<Self::Channel> {
        self.sockets.keys()
            .cloned()
            .collect()
    }

    #[inline(always)]
    fn transmit(&self, msg: Self::Frame, timeout: Option<u32>) -> Result<(), CanError> {
        match timeout {
            Some(timeout) => self.write_timeout(&msg, Duration::from_millis(timeout as u64)),
            None => self.write(&msg),
        }
    }

    #[inline(always)]
    fn shutdown(&mut self) {
        // dropping a RawSocket closes its fd
        self.sockets.drain()
            .for_each(|(c, _)| log::debug!("RUST-CAN - channel: {} closed", c));
    }
}

use std::fmt::Display;
use crate::error::CanError;
use crate::frame::Frame;

/// An opened CAN bus handle.
///
/// The handle is owned by exactly one writer, so transmit only borrows it
/// immutably and `shutdown` needs exclusive access.
pub trait CanDevice {
    type Channel: Display + Clone;
    type Frame: Frame<Channel = Self::Channel> + 'static;
    #[inline]
    fn is_closed(&self) -> bool {
        self.opened_channels().is_empty()
    }
    /// get all channels that has opened
    fn opened_channels(&self) -> Vec<Self::Channel>;
    /// Transmit a CAN Frame on the frame's channel.
    fn transmit(&self, msg: Self::Frame, timeout: Option<u32>) -> Result<(), CanError>;
    /// Close CAN device. Calling it on a closed device does nothing.
    fn shutdown(&mut self);
}

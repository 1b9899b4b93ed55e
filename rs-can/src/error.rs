#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum CanError {
    #[error("RUST-CAN - device open failed")]
    DeviceOpenFailed,

    #[error("RUST-CAN - channel: {0} initialize failed")]
    ChannelInitializeError(String),
    #[error("RUST-CAN - channel: {0} not opened")]
    ChannelNotOpened(String),

    #[error("RUST-CAN - operation error: {0}")]
    OperationError(String),
    #[error("RUST-CAN - channel: {0} timeout error")]
    TimeoutError(String),

    #[error("RUST-CAN - other error: {0}")]
    OtherError(String),
}

impl CanError {
    #[inline]
    pub fn channel_not_opened<T: std::fmt::Display>(channel: T) -> Self {
        Self::ChannelNotOpened(channel.to_string())
    }

    #[inline]
    pub fn channel_timeout<T: std::fmt::Display>(channel: T) -> Self {
        Self::TimeoutError(channel.to_string())
    }

    #[inline]
    pub fn operation_error<T: std::fmt::Display>(reason: T) -> Self {
        Self::OperationError(reason.to_string())
    }

    #[inline]
    pub fn other_error<T: std::fmt::Display>(reason: T) -> Self {
        Self::OtherError(reason.to_string())
    }
}

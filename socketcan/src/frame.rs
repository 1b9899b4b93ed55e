use std::fmt::{Display, Formatter};
use libc::can_frame;
use rs_can::{utils, Direct, Frame, Id};
use crate::socket;

#[derive(Debug, Clone)]
pub struct CanMessage {
    pub(crate) timestamp: u64,
    pub(crate) arbitration_id: u32,
    pub(crate) is_extended_id: bool,
    pub(crate) channel: String,
    pub(crate) data: Vec<u8>,
    pub(crate) direct: Direct,
}

impl From<&CanMessage> for can_frame {
    fn from(msg: &CanMessage) -> Self {
        let mut frame = socket::empty_frame();
        let length = msg.data.len();
        frame.data[..length].copy_from_slice(&msg.data);
        frame.can_dlc = length as u8;
        frame.can_id = msg.id().as_raw();
        frame
    }
}

impl Frame for CanMessage {
    type Channel = String;

    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        let length = data.len();

        match utils::can_dlc(length) {
            Some(_) => {
                let id: Id = id.into();
                Some(Self {
                    timestamp: 0,
                    arbitration_id: id.into_bits(),
                    is_extended_id: id.is_extended(),
                    channel: Default::default(),
                    data: data.to_vec(),
                    direct: Default::default(),
                })
            },
            None => {
                log::warn!("RUST-CAN - data length: {} is too large for a CAN frame", length);
                None
            },
        }
    }

    #[inline]
    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    #[inline]
    fn set_timestamp(&mut self, value: Option<u64>) -> &mut Self {
        self.timestamp = value.unwrap_or_else(utils::system_timestamp);
        self
    }

    #[inline]
    fn id(&self) -> Id {
        Id::from_bits(self.arbitration_id, self.is_extended_id)
    }

    #[inline]
    fn direct(&self) -> Direct {
        self.direct
    }

    #[inline]
    fn set_direct(&mut self, direct: Direct) -> &mut Self {
        self.direct = direct;
        self
    }

    #[inline]
    fn channel(&self) -> Self::Channel {
        self.channel.clone()
    }

    #[inline]
    fn set_channel(&mut self, value: Self::Channel) -> &mut Self {
        self.channel = value;
        self
    }

    #[inline]
    fn data(&self) -> &[u8] {
        self.data.as_slice()
    }
}

impl PartialEq for CanMessage {
    fn eq(&self, other: &Self) -> bool {
        (self.arbitration_id == other.arbitration_id) &&
            (self.is_extended_id == other.is_extended_id) &&
            (self.data == other.data)
    }
}

impl Display for CanMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <dyn Frame<Channel=String> as Display>::fmt(self, f)
    }
}

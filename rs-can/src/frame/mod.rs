mod identifier;
pub use identifier::*;

use std::fmt::{Display, Formatter, Write};

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direct {
    #[default]
    Transmit,
    Receive,
}

impl Display for Direct {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transmit => f.write_str("Tx"),
            Self::Receive => f.write_str("Rx"),
        }
    }
}

/// CAN 2.0 data frame.
pub trait Frame: Send + Sync {
    type Channel: Display;

    /// Returns `None` when `data` does not fit a classic CAN frame.
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self>
    where
        Self: Sized;

    fn timestamp(&self) -> u64;

    /// `None` stamps the frame with the current system time.
    fn set_timestamp(&mut self, value: Option<u64>) -> &mut Self
    where
        Self: Sized;

    fn id(&self) -> Id;

    fn is_extended(&self) -> bool {
        self.id().is_extended()
    }

    fn direct(&self) -> Direct;

    fn set_direct(&mut self, direct: Direct) -> &mut Self
    where
        Self: Sized;

    fn channel(&self) -> Self::Channel;

    fn set_channel(&mut self, value: Self::Channel) -> &mut Self
    where
        Self: Sized;

    /// ensure return the actual length of data.
    fn data(&self) -> &[u8];

    fn length(&self) -> usize {
        self.data().len()
    }
}

impl<T: Display> Display for dyn Frame<Channel = T> {
    /// Output Frame as `asc` String.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let data_str = self.data()
            .iter()
            .fold(String::new(), |mut out, &b| {
                let _ = write!(out, "{b:02x} ");
                out
            });

        write!(f, "{:.3} {} {: >8x}{: <4} {} d {: >2} {}",
               self.timestamp() as f64 / 1000.,
               self.channel(),
               self.id().into_bits(),
               if self.is_extended() { "x" } else { "" },
               self.direct(),
               self.length(),
               data_str.trim_end(),
        )
    }
}

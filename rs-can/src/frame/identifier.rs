use bitflags::bitflags;
use crate::constants::{EFF_MASK, SFF_MASK};

bitflags! {
    /// Identifier flags for indicating various frame types.
    ///
    /// Flag values correspond to the format used by the Linux [SocketCAN][socketcan] library,
    /// so an [`Id`] plus its flags produces the all-in-one 32-bit `can_id` value directly.
    ///
    /// [socketcan]: https://www.kernel.org/doc/Documentation/networking/can.txt
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IdentifierFlags: u32 {
        /// The frame is using the extended format i.e. 29-bit extended identifiers.
        const EXTENDED = 0x8000_0000;
    }
}

/// CAN-Id define
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Id {
    Standard(u16),
    Extended(u32),
}

impl From<Id> for u32 {
    #[inline]
    fn from(id: Id) -> Self {
        id.into_bits()
    }
}

impl From<u32> for Id {
    #[inline]
    fn from(bits: u32) -> Self {
        Self::from_bits(bits, false)
    }
}

impl Id {
    /// Returns `None` when `id` does not fit 11 bits.
    #[inline]
    pub fn new_standard(id: u16) -> Option<Self> {
        match id as u32 {
            0..=SFF_MASK => Some(Self::Standard(id)),
            _ => None,
        }
    }

    /// Returns `None` when `id` does not fit 29 bits.
    #[inline]
    pub fn new_extended(id: u32) -> Option<Self> {
        match id {
            0..=EFF_MASK => Some(Self::Extended(id)),
            _ => None,
        }
    }

    /// Bits above the standard mask promote the id to extended.
    #[inline]
    pub fn from_bits(bits: u32, extended: bool) -> Self {
        let bits = bits & EFF_MASK;
        if extended || bits > SFF_MASK {
            Self::Extended(bits)
        } else {
            Self::Standard(bits as u16)
        }
    }

    #[inline]
    pub fn into_bits(self) -> u32 {
        match self {
            Self::Standard(v) => v as u32,
            Self::Extended(v) => v,
        }
    }

    #[inline]
    pub fn into_hex(self) -> String {
        format!("{:08X}", self.into_bits())
    }

    /// The raw `can_id` as written to a SocketCAN socket, flags included.
    #[inline]
    pub fn as_raw(self) -> u32 {
        match self {
            Self::Standard(v) => v as u32,
            Self::Extended(v) => v | IdentifierFlags::EXTENDED.bits(),
        }
    }

    #[inline]
    pub fn is_extended(&self) -> bool {
        matches!(self, Self::Extended(_))
    }
}

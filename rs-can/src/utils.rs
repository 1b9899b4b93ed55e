use std::time::{SystemTime, UNIX_EPOCH};
use crate::constants::MAX_FRAME_SIZE;

/// get CAN dlc, `None` when the length does not fit a classic frame.
#[inline]
pub fn can_dlc(length: usize) -> Option<usize> {
    match length {
        ..=MAX_FRAME_SIZE => Some(length),
        _ => None,
    }
}

#[inline]
pub fn system_timestamp() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(v) => v.as_millis() as u64,
        Err(e) => {
            log::warn!("RUST-CAN - SystemTimeError: {0} when conversion failed!", e);
            0
        }
    }
}

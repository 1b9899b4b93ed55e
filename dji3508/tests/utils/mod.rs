#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use rs_can::{CanDevice, CanError, Direct, Frame, Id};

#[derive(Debug, Clone, PartialEq)]
pub struct MockFrame {
    pub id: Id,
    pub channel: String,
    pub data: Vec<u8>,
    pub timestamp: u64,
}

impl Frame for MockFrame {
    type Channel = String;

    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        if data.len() > 8 {
            return None;
        }
        Some(Self { id: id.into(), channel: Default::default(), data: data.to_vec(), timestamp: 0 })
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn set_timestamp(&mut self, value: Option<u64>) -> &mut Self {
        self.timestamp = value.unwrap_or(1);
        self
    }

    fn id(&self) -> Id {
        self.id
    }

    fn direct(&self) -> Direct {
        Direct::Transmit
    }

    fn set_direct(&mut self, _: Direct) -> &mut Self {
        self
    }

    fn channel(&self) -> Self::Channel {
        self.channel.clone()
    }

    fn set_channel(&mut self, value: Self::Channel) -> &mut Self {
        self.channel = value;
        self
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}

/// What the mock saw, shared so it outlives the device.
#[derive(Debug, Default)]
pub struct Record {
    pub frames: Vec<MockFrame>,
    pub attempts: usize,
    pub shutdowns: usize,
}

/// In-memory bus with one open channel.
///
/// `fail_after` makes every transmit after that many successful ones fail,
/// `fail_at` fails only the transmit attempt with that index.
#[derive(Debug)]
pub struct MockDevice {
    pub channels: Vec<String>,
    pub fail_after: Option<usize>,
    pub fail_at: Option<usize>,
    pub record: Arc<Mutex<Record>>,
}

impl MockDevice {
    pub fn new(channel: &str) -> (Self, Arc<Mutex<Record>>) {
        let record = Arc::new(Mutex::new(Record::default()));
        (Self { channels: vec![channel.into()], fail_after: None, fail_at: None, record: record.clone() }, record)
    }

    pub fn failing_after(channel: &str, count: usize) -> (Self, Arc<Mutex<Record>>) {
        let (mut device, record) = Self::new(channel);
        device.fail_after = Some(count);
        (device, record)
    }

    pub fn failing_at(channel: &str, attempt: usize) -> (Self, Arc<Mutex<Record>>) {
        let (mut device, record) = Self::new(channel);
        device.fail_at = Some(attempt);
        (device, record)
    }
}

impl CanDevice for MockDevice {
    type Channel = String;
    type Frame = MockFrame;

    fn opened_channels(&self) -> Vec<Self::Channel> {
        self.channels.clone()
    }

    fn transmit(&self, msg: Self::Frame, _: Option<u32>) -> Result<(), CanError> {
        if !self.channels.contains(&msg.channel) {
            return Err(CanError::channel_not_opened(&msg.channel));
        }
        let mut record = self.record.lock()
            .map_err(|e| CanError::other_error(e))?;
        let attempt = record.attempts;
        record.attempts += 1;
        if matches!(self.fail_after, Some(n) if record.frames.len() >= n)
            || self.fail_at == Some(attempt) {
            return Err(CanError::operation_error("No buffer space available (os error 105)"));
        }
        record.frames.push(msg);
        Ok(())
    }

    fn shutdown(&mut self) {
        self.channels.clear();
        if let Ok(mut record) = self.record.lock() {
            record.shutdowns += 1;
        }
    }
}

use std::{ffi::CString, io, mem, os::fd::{AsRawFd, FromRawFd, OwnedFd}, thread, time::{Duration, Instant}};
use libc::{can_frame, sockaddr, sockaddr_can, AF_CAN, CAN_RAW, EINPROGRESS, ENOBUFS, PF_CAN, SOCK_RAW};

/// Pause between two attempts on a full transmit queue.
const RETRY_INTERVAL: Duration = Duration::from_micros(200);

/// Kernel index of the interface named `iface`, e.g. "can0" or "vcan0".
pub fn iface_index(iface: &str) -> io::Result<u32> {
    let name = CString::new(iface)?;
    match unsafe { libc::if_nametoindex(name.as_ptr()) } {
        0 => Err(io::Error::last_os_error()),
        index => Ok(index),
    }
}

/// A zeroed classic frame.
#[inline]
pub fn empty_frame() -> can_frame {
    unsafe { mem::zeroed() }
}

/// Raw CAN socket bound to one interface, closed on drop.
#[derive(Debug)]
pub struct RawSocket(OwnedFd);

impl RawSocket {
    pub fn bind(ifindex: u32) -> io::Result<Self> {
        let fd = unsafe { libc::socket(PF_CAN, SOCK_RAW, CAN_RAW) };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        // owned from here on, so an early return closes it
        let socket = Self(unsafe { OwnedFd::from_raw_fd(fd) });

        let mut addr: sockaddr_can = unsafe { mem::zeroed() };
        addr.can_family = AF_CAN as libc::sa_family_t;
        addr.can_ifindex = ifindex as libc::c_int;

        let ret = unsafe {
            libc::bind(
                socket.0.as_raw_fd(),
                (&addr as *const sockaddr_can).cast::<sockaddr>(),
                mem::size_of::<sockaddr_can>() as libc::socklen_t,
            )
        };
        match ret {
            0 => Ok(socket),
            _ => Err(io::Error::last_os_error()),
        }
    }

    /// Write one frame, a partial write is an error.
    pub fn write_frame(&self, frame: &can_frame) -> io::Result<()> {
        let size = mem::size_of::<can_frame>();
        let ret = unsafe {
            libc::write(self.0.as_raw_fd(), (frame as *const can_frame).cast(), size)
        };

        match ret {
            n if n < 0 => Err(io::Error::last_os_error()),
            n if n as usize == size => Ok(()),
            n => Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {} of {} bytes", n, size),
            )),
        }
    }
}

/// Errors a writer should wait out instead of giving up on.
pub trait ShouldRetry {
    fn should_retry(&self) -> bool;
}

impl ShouldRetry for io::Error {
    fn should_retry(&self) -> bool {
        match self.kind() {
            io::ErrorKind::WouldBlock => true,
            // SocketCAN reports a full tx queue as ENOBUFS
            _ => matches!(self.raw_os_error(), Some(errno) if errno == EINPROGRESS || errno == ENOBUFS),
        }
    }
}

/// Run `write` until it succeeds, fails with an error that is not worth
/// retrying, or `timeout` has passed.
///
/// `write` is always attempted at least once, even with a zero timeout.
/// When the time runs out the last retryable error is returned.
pub fn write_retrying<F>(timeout: Duration, mut write: F) -> io::Result<()>
where
    F: FnMut() -> io::Result<()>,
{
    let deadline = Instant::now() + timeout;
    loop {
        match write() {
            Ok(()) => return Ok(()),
            Err(e) if e.should_retry() => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(e);
                }
                thread::sleep(remaining.min(RETRY_INTERVAL));
            },
            Err(e) => return Err(e),
        }
    }
}

#![allow(dead_code)]

use nix::errno::Errno;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::os::unix::io::RawFd;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use std::thread;
use std::time::Duration;
use windroidpro::{UsbFsBulkTransfer, UsbFsCtrlTransfer, UsbTransport, DIRECTION_IN};

static LOGGER: Once = Once::new();

pub fn init_logger() {
    LOGGER.call_once(|| {
        let _ = simple_logger::SimpleLogger::new()
            .with_level(log::LevelFilter::Debug)
            .init();
    });
}

pub const MOCK_DEVICE: &str = "/dev/bus/usb/001/004";

/// Control-transfer setup fields as the mock received them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenControl {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
    pub timeout: u32,
    pub has_data: bool,
    pub sent: Vec<u8>,
}

#[derive(Default)]
struct State {
    devices: HashSet<PathBuf>,
    next_fd: RawFd,
    open: HashSet<RawFd>,
    claims: HashSet<(RawFd, u32)>,
    loopback: VecDeque<u8>,
    control_reply: Vec<u8>,
    seen_control: Vec<SeenControl>,
    delay: Option<Duration>,
    fail_with: Option<Errno>,
    close_fails: bool,
    calls: HashMap<&'static str, usize>,
}

/// In-memory device: bulk and read/write share one loopback queue, control
/// IN requests answer with a canned reply.
pub struct MockTransport {
    state: Mutex<State>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        let mut state = State {
            next_fd: 3,
            ..State::default()
        };
        state.devices.insert(PathBuf::from(MOCK_DEVICE));
        MockTransport {
            state: Mutex::new(state),
        }
    }

    pub fn with_control_reply(self, reply: &[u8]) -> Self {
        self.state.lock().unwrap().control_reply = reply.to_vec();
        self
    }

    /// Every transfer takes this long unless its timeout expires first.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().delay = Some(delay);
        self
    }

    /// Every transfer and claim fails with `errno`.
    pub fn failing_with(self, errno: Errno) -> Self {
        self.state.lock().unwrap().fail_with = Some(errno);
        self
    }

    pub fn with_failing_close(self) -> Self {
        self.state.lock().unwrap().close_fails = true;
        self
    }

    pub fn calls(&self, op: &str) -> usize {
        self.state.lock().unwrap().calls.get(op).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.values().sum()
    }

    pub fn is_open(&self, fd: RawFd) -> bool {
        self.state.lock().unwrap().open.contains(&fd)
    }

    pub fn seen_control(&self) -> Vec<SeenControl> {
        self.state.lock().unwrap().seen_control.clone()
    }

    fn enter(&self, op: &'static str, fd: RawFd) -> nix::Result<()> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(op).or_insert(0) += 1;
        if !state.open.contains(&fd) {
            return Err(Errno::EBADF);
        }
        match state.fail_with {
            Some(errno) => Err(errno),
            None => Ok(()),
        }
    }

    fn wait(&self, timeout: u32) -> nix::Result<()> {
        let delay = self.state.lock().unwrap().delay;
        let Some(delay) = delay else {
            return Ok(());
        };
        let limit = Duration::from_millis(timeout as u64);
        if timeout != 0 && delay > limit {
            thread::sleep(limit);
            return Err(Errno::ETIMEDOUT);
        }
        thread::sleep(delay);
        Ok(())
    }
}

impl UsbTransport for MockTransport {
    fn open(&self, path: &Path) -> io::Result<RawFd> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry("open").or_insert(0) += 1;
        if !state.devices.contains(path) {
            return Err(io::Error::from_raw_os_error(libc::ENOENT));
        }
        let fd = state.next_fd;
        state.next_fd += 1;
        state.open.insert(fd);
        Ok(fd)
    }

    fn close(&self, fd: RawFd) -> nix::Result<()> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry("close").or_insert(0) += 1;
        if !state.open.remove(&fd) || state.close_fails {
            return Err(Errno::EBADF);
        }
        state.claims.retain(|(owner, _)| *owner != fd);
        Ok(())
    }

    fn control(&self, fd: RawFd, ctrl: &mut UsbFsCtrlTransfer) -> nix::Result<usize> {
        self.enter("control", fd)?;
        self.wait(ctrl.timeout)?;
        let data = unsafe { ctrl.data_mut() };
        let mut state = self.state.lock().unwrap();
        let mut seen = SeenControl {
            request_type: ctrl.request_type,
            request: ctrl.request,
            value: ctrl.value,
            index: ctrl.index,
            length: ctrl.length,
            timeout: ctrl.timeout,
            has_data: !ctrl.data.is_null(),
            sent: Vec::new(),
        };
        let len = if ctrl.request_type & DIRECTION_IN == DIRECTION_IN {
            let len = data.len().min(state.control_reply.len());
            data[..len].copy_from_slice(&state.control_reply[..len]);
            len
        } else {
            seen.sent = data.to_vec();
            data.len()
        };
        state.seen_control.push(seen);
        Ok(len)
    }

    fn bulk(&self, fd: RawFd, bulk: &mut UsbFsBulkTransfer) -> nix::Result<usize> {
        self.enter("bulk", fd)?;
        self.wait(bulk.timeout)?;
        let data = unsafe { bulk.data_mut() };
        let mut state = self.state.lock().unwrap();
        if bulk.ep as u8 & DIRECTION_IN == DIRECTION_IN {
            let len = data.len().min(state.loopback.len());
            for (dst, src) in data.iter_mut().zip(state.loopback.drain(..len)) {
                *dst = src;
            }
            Ok(len)
        } else {
            state.loopback.extend(data.iter().copied());
            Ok(data.len())
        }
    }

    fn claim_interface(&self, fd: RawFd, interface: u32) -> nix::Result<()> {
        self.enter("claim", fd)?;
        let mut state = self.state.lock().unwrap();
        if !state.claims.insert((fd, interface)) {
            return Err(Errno::EBUSY);
        }
        Ok(())
    }

    fn release_interface(&self, fd: RawFd, interface: u32) -> nix::Result<()> {
        self.enter("release", fd)?;
        let mut state = self.state.lock().unwrap();
        if !state.claims.remove(&(fd, interface)) {
            return Err(Errno::EINVAL);
        }
        Ok(())
    }

    fn read(&self, fd: RawFd, buf: &mut [u8]) -> nix::Result<usize> {
        self.enter("read", fd)?;
        let mut state = self.state.lock().unwrap();
        let len = buf.len().min(state.loopback.len());
        for (dst, src) in buf.iter_mut().zip(state.loopback.drain(..len)) {
            *dst = src;
        }
        Ok(len)
    }

    fn write(&self, fd: RawFd, buf: &[u8]) -> nix::Result<usize> {
        self.enter("write", fd)?;
        self.state.lock().unwrap().loopback.extend(buf.iter().copied());
        Ok(buf.len())
    }
}

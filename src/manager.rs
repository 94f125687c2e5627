//! Device handle lifecycle and synchronous transfers on usbdevfs.
//!
//! Every operation is a single blocking syscall on the calling thread. Handles
//! are owned by the caller and nothing here keeps a list of open devices.
//! Operations on one handle must not race with [`UsbManager::close_device`]
//! for the same handle: close only after every transfer on it has returned.

use crate::config::UsbConfig;
use crate::endpoint::Endpoint;
use crate::error::{errno_of, Result, UsbError, INVALID_HANDLE};
use crate::os::linux::constants::{DIRECTION_IN, TIMEOUT_INFINITE};
use crate::os::linux::usbfs::{UsbFs, UsbFsBulkTransfer, UsbFsCtrlTransfer};
use crate::transport::UsbTransport;
use crate::usb_transfer::{BulkTransferRequest, ControlTransferRequest};
use log::{debug, error, info, warn};
use nix::errno::Errno;
use std::os::unix::io::RawFd;
use std::path::Path;

const CLOSED: RawFd = INVALID_HANDLE;

/// An open (or closed) usbdevfs descriptor.
///
/// Dropping a handle does not close the descriptor; call
/// [`UsbManager::close_device`].
#[derive(Debug, PartialEq, Eq)]
pub struct DeviceHandle {
    fd: RawFd,
}

impl DeviceHandle {
    pub const fn invalid() -> Self {
        DeviceHandle { fd: CLOSED }
    }

    /// Wraps a descriptor the host already holds. Negative values are invalid.
    pub const fn from_raw(fd: RawFd) -> Self {
        DeviceHandle { fd }
    }

    pub fn as_raw(&self) -> RawFd {
        self.fd
    }

    pub fn into_raw(self) -> RawFd {
        self.fd
    }

    pub fn is_valid(&self) -> bool {
        self.fd >= 0
    }
}

pub struct UsbManager<T: UsbTransport = UsbFs> {
    transport: T,
    config: UsbConfig,
}

impl UsbManager<UsbFs> {
    pub fn usbfs(config: UsbConfig) -> Self {
        Self::new(UsbFs, config)
    }
}

impl<T: UsbTransport> UsbManager<T> {
    pub fn new(transport: T, config: UsbConfig) -> Self {
        UsbManager { transport, config }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &UsbConfig {
        &self.config
    }

    /// Open a device node for reading and writing.
    pub fn open_device(&self, path: &str) -> Result<DeviceHandle> {
        if path.is_empty() {
            return fail(UsbError::DeviceOpen {
                path: String::new(),
                errno: Errno::ENOENT,
            });
        }
        info!("Opening USB device: {}", path);
        match self.transport.open(Path::new(path)) {
            Ok(fd) => {
                info!("USB device opened successfully, fd: {}", fd);
                Ok(DeviceHandle::from_raw(fd))
            }
            Err(e) => fail(UsbError::DeviceOpen {
                path: path.to_string(),
                errno: errno_of(&e),
            }),
        }
    }

    /// Close the descriptor and leave `handle` invalid. Closing an invalid
    /// handle does nothing; a failing `close(2)` is logged and ignored.
    pub fn close_device(&self, handle: &mut DeviceHandle) {
        if !handle.is_valid() {
            debug!("close on invalid handle {} ignored", handle.fd);
            return;
        }
        let fd = std::mem::replace(&mut handle.fd, CLOSED);
        match self.transport.close(fd) {
            Ok(()) => info!("USB device closed, fd: {}", fd),
            Err(errno) => error!("Failed to close USB device fd {}: {}", fd, errno),
        }
    }

    /// Issue a control transfer and return the length of the data stage.
    ///
    /// A device-to-host request fills the buffer, a host-to-device request
    /// sends its contents. A timeout of 0 waits forever unless
    /// [`UsbConfig::reject_unbounded_timeout`] is set.
    pub fn control_transfer(
        &self,
        handle: &DeviceHandle,
        mut ctrl: ControlTransferRequest<'_>,
    ) -> Result<usize> {
        let fd = self.checked_fd(handle)?;
        ctrl.validate().or_else(fail)?;
        self.check_timeout(ctrl.timeout)?;
        if ctrl.buffer.is_none() && ctrl.length > 0 {
            warn!(
                "Control transfer 0x{:02X}/0x{:02X} asks for {} bytes without a buffer, no data is exchanged locally",
                ctrl.request_type, ctrl.request, ctrl.length
            );
        }

        let mut block = UsbFsCtrlTransfer::from_request(&mut ctrl);
        debug!("fd {}: {:?}", fd, block);
        match self.transport.control(fd, &mut block) {
            Ok(len) => {
                info!(
                    "Control transfer 0x{:02X}/0x{:02X} transferred {} bytes",
                    ctrl.request_type, ctrl.request, len
                );
                Ok(len)
            }
            Err(errno) => fail(UsbError::Transfer {
                endpoint: Endpoint::new(ctrl.request_type & DIRECTION_IN),
                errno,
            }),
        }
    }

    /// Issue a synchronous bulk transfer and return the bytes moved, which may
    /// be fewer than requested. The endpoint's interface must be claimed.
    pub fn bulk_transfer(&self, handle: &DeviceHandle, mut bulk: BulkTransferRequest<'_>) -> Result<usize> {
        let fd = self.checked_fd(handle)?;
        bulk.validate().or_else(fail)?;
        self.check_timeout(bulk.timeout)?;

        let mut block = UsbFsBulkTransfer::from_request(&mut bulk);
        debug!("fd {}: {:?}", fd, block);
        match self.transport.bulk(fd, &mut block) {
            Ok(len) => {
                info!("Bulk transfer {} transferred {} bytes", bulk.endpoint, len);
                Ok(len)
            }
            Err(errno) => fail(UsbError::Transfer {
                endpoint: bulk.endpoint,
                errno,
            }),
        }
    }

    pub fn claim_interface(&self, handle: &DeviceHandle, interface: u32) -> Result<()> {
        let fd = self.checked_fd(handle)?;
        match self.transport.claim_interface(fd, interface) {
            Ok(()) => {
                info!("Interface {} claimed successfully", interface);
                Ok(())
            }
            Err(errno) => fail(UsbError::InterfaceClaim { interface, errno }),
        }
    }

    /// Release a claimed interface. The kernel rejects interfaces this
    /// descriptor never claimed.
    pub fn release_interface(&self, handle: &DeviceHandle, interface: u32) -> Result<()> {
        let fd = self.checked_fd(handle)?;
        match self.transport.release_interface(fd, interface) {
            Ok(()) => {
                info!("Interface {} released successfully", interface);
                Ok(())
            }
            Err(errno) => fail(UsbError::InterfaceClaim { interface, errno }),
        }
    }

    /// `read(2)` up to `length` bytes into `buf`.
    pub fn read_device(&self, handle: &DeviceHandle, buf: &mut [u8], length: usize) -> Result<usize> {
        let fd = self.checked_fd(handle)?;
        check_length(length, buf.len())?;
        match self.transport.read(fd, &mut buf[..length]) {
            Ok(len) => {
                info!("Read {} bytes from fd {}", len, fd);
                Ok(len)
            }
            Err(errno) => {
                error!("Failed to read from USB device: {}", errno);
                Err(UsbError::Io(errno))
            }
        }
    }

    /// `write(2)` the first `length` bytes of `buf`.
    pub fn write_device(&self, handle: &DeviceHandle, buf: &[u8], length: usize) -> Result<usize> {
        let fd = self.checked_fd(handle)?;
        check_length(length, buf.len())?;
        match self.transport.write(fd, &buf[..length]) {
            Ok(len) => {
                info!("Wrote {} bytes to fd {}", len, fd);
                Ok(len)
            }
            Err(errno) => {
                error!("Failed to write to USB device: {}", errno);
                Err(UsbError::Io(errno))
            }
        }
    }

    fn checked_fd(&self, handle: &DeviceHandle) -> Result<RawFd> {
        if handle.is_valid() {
            Ok(handle.fd)
        } else {
            fail(UsbError::InvalidHandle)
        }
    }

    fn check_timeout(&self, timeout: u32) -> Result<()> {
        if timeout == TIMEOUT_INFINITE && self.config.reject_unbounded_timeout {
            return fail(UsbError::InvalidArgument(
                "timeout 0 would block forever".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_length(length: usize, capacity: usize) -> Result<()> {
    if length > capacity {
        return fail(UsbError::InvalidArgument(format!(
            "length {} exceeds buffer of {} bytes",
            length, capacity
        )));
    }
    Ok(())
}

fn fail<T>(err: UsbError) -> Result<T> {
    error!("{}", err);
    Err(err)
}

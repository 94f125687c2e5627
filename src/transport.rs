use crate::os::linux::usbfs::{UsbFsBulkTransfer, UsbFsCtrlTransfer};
use std::io;
use std::os::unix::io::RawFd;
use std::path::Path;

/// Everything [`UsbManager`](crate::UsbManager) needs from the operating system.
///
/// [`UsbFs`](crate::UsbFs) issues the real usbdevfs ioctls. Each method is one
/// blocking syscall; no state is kept between calls.
pub trait UsbTransport {
    fn open(&self, path: &Path) -> io::Result<RawFd>;
    fn close(&self, fd: RawFd) -> nix::Result<()>;
    /// Returns the number of bytes moved in the data stage.
    fn control(&self, fd: RawFd, ctrl: &mut UsbFsCtrlTransfer) -> nix::Result<usize>;
    fn bulk(&self, fd: RawFd, bulk: &mut UsbFsBulkTransfer) -> nix::Result<usize>;
    fn claim_interface(&self, fd: RawFd, interface: u32) -> nix::Result<()>;
    fn release_interface(&self, fd: RawFd, interface: u32) -> nix::Result<()>;
    fn read(&self, fd: RawFd, buf: &mut [u8]) -> nix::Result<usize>;
    fn write(&self, fd: RawFd, buf: &[u8]) -> nix::Result<usize>;
}

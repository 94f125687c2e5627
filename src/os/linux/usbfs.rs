use super::constants::*;
use crate::transport::UsbTransport;
use crate::usb_transfer::{BulkTransferRequest, ControlTransferRequest};
use nix::*;
use std::fs::OpenOptions;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{IntoRawFd, RawFd};
use std::path::Path;
use std::ptr;

/// `struct usbdevfs_ctrltransfer` from `<linux/usbdevice_fs.h>`.
#[derive(Debug)]
#[repr(C)]
pub struct UsbFsCtrlTransfer {
    /// `bRequestType`
    pub request_type: u8,
    /// `bRequest`
    pub request: u8,
    /// `wValue`
    pub value: u16,
    /// `wIndex`
    pub index: u16,
    /// `wLength`, sent as requested even when `data` is NULL
    pub length: u16,
    /// `timeout` in milliseconds, 0 waits forever
    pub timeout: u32,
    /// `data`, NULL when the caller supplied no buffer
    pub data: *mut libc::c_void,
}

impl UsbFsCtrlTransfer {
    /// Points `data` at the request buffer, which must outlive the ioctl.
    /// Without a buffer `wLength` still goes out and the kernel decides.
    pub fn from_request(ctrl: &mut ControlTransferRequest<'_>) -> Self {
        let data = match ctrl.buffer.as_mut() {
            Some(buffer) => buffer.as_mut_ptr() as *mut libc::c_void,
            None => ptr::null_mut(),
        };
        UsbFsCtrlTransfer {
            request_type: ctrl.request_type,
            request: ctrl.request,
            value: ctrl.value,
            index: ctrl.index,
            length: ctrl.length,
            timeout: ctrl.timeout,
            data,
        }
    }

    /// # Safety
    /// `data` must still point at a live buffer of at least `length` bytes.
    pub unsafe fn data_mut<'a>(&self) -> &'a mut [u8] {
        if self.data.is_null() || self.length == 0 {
            return &mut [];
        }
        std::slice::from_raw_parts_mut(self.data as *mut u8, self.length as usize)
    }
}

/// `struct usbdevfs_bulktransfer` from `<linux/usbdevice_fs.h>`.
#[derive(Debug)]
#[repr(C)]
pub struct UsbFsBulkTransfer {
    /// `ep`, endpoint address including the direction bit
    pub ep: u32,
    /// `len`
    pub length: u32,
    /// `timeout` in milliseconds, 0 waits forever
    pub timeout: u32,
    /// `data`
    pub data: *mut libc::c_void,
}

impl UsbFsBulkTransfer {
    pub fn from_request(bulk: &mut BulkTransferRequest<'_>) -> Self {
        UsbFsBulkTransfer {
            ep: u8::from(bulk.endpoint) as u32,
            length: bulk.length,
            timeout: bulk.timeout,
            data: bulk.buffer.as_mut_ptr() as *mut libc::c_void,
        }
    }

    /// # Safety
    /// `data` must still point at a live buffer of at least `length` bytes.
    pub unsafe fn data_mut<'a>(&self) -> &'a mut [u8] {
        if self.data.is_null() || self.length == 0 {
            return &mut [];
        }
        std::slice::from_raw_parts_mut(self.data as *mut u8, self.length as usize)
    }
}

ioctl_readwrite!(usb_control_transfer, USBDEVFS_IOC_MAGIC, USBDEVFS_NR_CONTROL, UsbFsCtrlTransfer);
ioctl_readwrite!(usb_bulk_transfer, USBDEVFS_IOC_MAGIC, USBDEVFS_NR_BULK, UsbFsBulkTransfer);
ioctl_read!(usb_claim_interface, USBDEVFS_IOC_MAGIC, USBDEVFS_NR_CLAIMINTERFACE, libc::c_uint);
ioctl_read!(usb_release_interface, USBDEVFS_IOC_MAGIC, USBDEVFS_NR_RELEASEINTERFACE, libc::c_uint);

/// Kernel transport: usbdevfs ioctls on a `/dev/bus/usb/BBB/DDD` descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct UsbFs;

impl UsbTransport for UsbFs {
    fn open(&self, path: &Path) -> io::Result<RawFd> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_CLOEXEC)
            .open(path)?;
        Ok(file.into_raw_fd())
    }

    fn close(&self, fd: RawFd) -> nix::Result<()> {
        nix::unistd::close(fd)
    }

    fn control(&self, fd: RawFd, ctrl: &mut UsbFsCtrlTransfer) -> nix::Result<usize> {
        let len = unsafe { usb_control_transfer(fd, ctrl) }?;
        Ok(len as usize)
    }

    fn bulk(&self, fd: RawFd, bulk: &mut UsbFsBulkTransfer) -> nix::Result<usize> {
        let len = unsafe { usb_bulk_transfer(fd, bulk) }?;
        Ok(len as usize)
    }

    fn claim_interface(&self, fd: RawFd, interface: u32) -> nix::Result<()> {
        let mut interface: libc::c_uint = interface;
        unsafe { usb_claim_interface(fd, &mut interface) }?;
        Ok(())
    }

    fn release_interface(&self, fd: RawFd, interface: u32) -> nix::Result<()> {
        let mut interface: libc::c_uint = interface;
        unsafe { usb_release_interface(fd, &mut interface) }?;
        Ok(())
    }

    fn read(&self, fd: RawFd, buf: &mut [u8]) -> nix::Result<usize> {
        nix::unistd::read(fd, buf)
    }

    fn write(&self, fd: RawFd, buf: &[u8]) -> nix::Result<usize> {
        nix::unistd::write(fd, buf)
    }
}

//! Native side of WinDroid Pro.
//!
//! The real work is raw USB access over usbdevfs: [`UsbManager`] opens a
//! device node handed over by the host, runs control and bulk transfers and
//! claims or releases interfaces, each as one blocking ioctl. The JNI entry
//! points in [`ffi`] translate every failure into a sentinel value. The Wine
//! and Box64 collaborators in [`compat`] are placeholders.

#[cfg(not(any(target_os = "linux", target_os = "android")))]
compile_error!("usbdevfs is only available on Linux and Android");

pub mod compat;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod ffi;
pub mod manager;
pub mod os;
pub mod transport;
pub mod usb_transfer;

pub use config::UsbConfig;
pub use endpoint::Endpoint;
pub use error::{Result, UsbError, INVALID_HANDLE};
pub use manager::{DeviceHandle, UsbManager};
pub use os::linux::constants::*;
pub use os::linux::usbfs::{UsbFs, UsbFsBulkTransfer, UsbFsCtrlTransfer};
pub use transport::UsbTransport;
pub use usb_transfer::{BulkTransferRequest, ControlTransferRequest, Direction};

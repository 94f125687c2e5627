//! usbdevfs ioctl numbers and USB setup-packet bits.

/// ioctl group letter used by every usbdevfs request.
pub(crate) const USBDEVFS_IOC_MAGIC: u8 = b'U';

pub(crate) const USBDEVFS_NR_CONTROL: u8 = 0;
pub(crate) const USBDEVFS_NR_BULK: u8 = 2;
pub(crate) const USBDEVFS_NR_CLAIMINTERFACE: u8 = 15;
pub(crate) const USBDEVFS_NR_RELEASEINTERFACE: u8 = 16;

/// Bit 7 of `bmRequestType` and of an endpoint address: set means device to host.
pub const DIRECTION_IN: u8 = 0x80;
pub const DIRECTION_OUT: u8 = 0x00;

pub const RECIPIENT_DEVICE: u8 = 0x00;
pub const RECIPIENT_INTERFACE: u8 = 0x01;
pub const REQUEST_TYPE_STANDARD: u8 = 0x00 << 5;
pub const REQUEST_TYPE_CLASS: u8 = 0x01 << 5;
pub const REQUEST_TYPE_VENDOR: u8 = 0x02 << 5;

/// Standard request GET_DESCRIPTOR.
pub const REQUEST_GET_DESCRIPTOR: u8 = 0x06;

/// Timeout value meaning "wait forever" for usbdevfs control and bulk transfers.
pub const TIMEOUT_INFINITE: u32 = 0;

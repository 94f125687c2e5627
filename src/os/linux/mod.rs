pub mod constants;
pub mod usbfs;

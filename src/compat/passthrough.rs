use super::CompatError;
use log::info;
use std::os::unix::io::RawFd;

/// Identifier the passthrough layer assigns to an attached device.
pub type AttachedDeviceId = i32;

/// Hands host-opened USB descriptors to the compatibility layer.
pub trait UsbPassthrough {
    fn init(&self) -> Result<(), CompatError>;
    fn attach(&self, vendor_id: u16, product_id: u16, fd: RawFd) -> Result<AttachedDeviceId, CompatError>;
    fn detach(&self, device_id: AttachedDeviceId) -> Result<(), CompatError>;
    fn cleanup(&self);
}

/// Stand-in: every attach yields device id 1, detach always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughPlaceholder;

impl UsbPassthrough for PassthroughPlaceholder {
    fn init(&self) -> Result<(), CompatError> {
        info!("USB passthrough init placeholder called");
        Ok(())
    }

    fn attach(&self, vendor_id: u16, product_id: u16, fd: RawFd) -> Result<AttachedDeviceId, CompatError> {
        info!(
            "USB attach placeholder called: VID={:04x}, PID={:04x}, FD={}",
            vendor_id, product_id, fd
        );
        Ok(1)
    }

    fn detach(&self, device_id: AttachedDeviceId) -> Result<(), CompatError> {
        info!("USB detach placeholder called: {}", device_id);
        Ok(())
    }

    fn cleanup(&self) {
        info!("USB passthrough cleanup placeholder called");
    }
}

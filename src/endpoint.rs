use crate::os::linux::constants::DIRECTION_IN;
use crate::usb_transfer::Direction;
use std::fmt;

/// An endpoint address as it appears in `usbdevfs_bulktransfer.ep`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint(u8);

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "EP 0x{:02X} ({} {})",
            self.0,
            self.number(),
            if self.is_control() {
                "Control"
            } else if self.is_in() {
                "In"
            } else {
                "Out"
            }
        )
    }
}

impl From<Endpoint> for u8 {
    fn from(ep: Endpoint) -> u8 {
        ep.0
    }
}

impl From<u8> for Endpoint {
    fn from(address: u8) -> Self {
        Endpoint(address)
    }
}

impl Endpoint {
    pub fn new(address: u8) -> Self {
        Self(address)
    }

    pub fn bulk_out(ep: u8) -> Self {
        Self(ep & 0x0F)
    }

    pub fn bulk_in(ep: u8) -> Self {
        Self(DIRECTION_IN | (ep & 0x0F))
    }

    pub fn number(&self) -> u8 {
        self.0 & 0x0F
    }

    pub fn direction(&self) -> Direction {
        Direction::from_bits(self.0)
    }

    pub fn is_control(&self) -> bool {
        self.number() == 0
    }

    pub fn is_in(&self) -> bool {
        self.direction() == Direction::DeviceToHost
    }

    pub fn is_out(&self) -> bool {
        self.direction() == Direction::HostToDevice
    }
}

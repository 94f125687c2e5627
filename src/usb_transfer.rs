use crate::endpoint::Endpoint;
use crate::error::UsbError;
use crate::os::linux::constants::DIRECTION_IN;

/// Data-stage direction encoded in bit 7 of `bmRequestType` or an endpoint address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    HostToDevice,
    DeviceToHost,
}

impl Direction {
    pub fn from_bits(bits: u8) -> Self {
        if bits & DIRECTION_IN == DIRECTION_IN {
            Direction::DeviceToHost
        } else {
            Direction::HostToDevice
        }
    }
}

/// One control transfer. The buffer is borrowed for the duration of the call only.
///
/// When `buffer` is `None`, `length` is still sent as `wLength` but no local
/// data is exchanged.
#[derive(Debug)]
pub struct ControlTransferRequest<'a> {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub buffer: Option<&'a mut [u8]>,
    pub length: u16,
    /// Milliseconds, 0 waits forever.
    pub timeout: u32,
}

impl<'a> ControlTransferRequest<'a> {
    pub fn new_nodata(request_type: u8, request: u8, value: u16, index: u16, timeout: u32) -> Self {
        ControlTransferRequest {
            request_type,
            request,
            value,
            index,
            buffer: None,
            length: 0,
            timeout,
        }
    }

    /// Data stage covering the whole buffer, capped at `u16::MAX` bytes.
    pub fn new_with_data(
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        buffer: &'a mut [u8],
        timeout: u32,
    ) -> Self {
        let length = u16::try_from(buffer.len()).unwrap_or(u16::MAX);
        ControlTransferRequest {
            request_type,
            request,
            value,
            index,
            buffer: Some(buffer),
            length,
            timeout,
        }
    }

    pub fn with_length(mut self, length: u16) -> Self {
        self.length = length;
        self
    }

    pub fn direction(&self) -> Direction {
        Direction::from_bits(self.request_type)
    }

    pub(crate) fn validate(&self) -> Result<(), UsbError> {
        match &self.buffer {
            Some(buffer) if usize::from(self.length) > buffer.len() => {
                Err(UsbError::InvalidArgument(format!(
                    "control length {} exceeds buffer of {} bytes",
                    self.length,
                    buffer.len()
                )))
            }
            _ => Ok(()),
        }
    }
}

/// One synchronous bulk transfer against `endpoint`.
#[derive(Debug)]
pub struct BulkTransferRequest<'a> {
    pub endpoint: Endpoint,
    pub buffer: &'a mut [u8],
    pub length: u32,
    /// Milliseconds, 0 waits forever.
    pub timeout: u32,
}

impl<'a> BulkTransferRequest<'a> {
    pub fn new(endpoint: Endpoint, buffer: &'a mut [u8], timeout: u32) -> Self {
        let length = u32::try_from(buffer.len()).unwrap_or(u32::MAX);
        BulkTransferRequest {
            endpoint,
            buffer,
            length,
            timeout,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), UsbError> {
        if self.length as usize > self.buffer.len() {
            return Err(UsbError::InvalidArgument(format!(
                "bulk length {} exceeds buffer of {} bytes",
                self.length,
                self.buffer.len()
            )));
        }
        Ok(())
    }
}

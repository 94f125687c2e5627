use crate::endpoint::Endpoint;
use nix::errno::Errno;
use thiserror::Error;

/// Value handed back to the host when a device could not be opened.
pub const INVALID_HANDLE: i32 = -1;

#[derive(Debug, Error)]
pub enum UsbError {
    #[error("DeviceOpenError: {path}: {errno}")]
    DeviceOpen { path: String, errno: Errno },
    #[error("InvalidHandleError: operation on a closed or invalid device handle")]
    InvalidHandle,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("TransferError on {endpoint}: {errno}")]
    Transfer { endpoint: Endpoint, errno: Errno },
    #[error("InterfaceClaimError on interface {interface}: {errno}")]
    InterfaceClaim { interface: u32, errno: Errno },
    #[error("IoError: {0}")]
    Io(Errno),
}

pub type Result<T> = std::result::Result<T, UsbError>;

impl UsbError {
    /// The OS error code behind this failure.
    pub fn errno(&self) -> Errno {
        match self {
            UsbError::DeviceOpen { errno, .. }
            | UsbError::Transfer { errno, .. }
            | UsbError::InterfaceClaim { errno, .. }
            | UsbError::Io(errno) => *errno,
            UsbError::InvalidHandle => Errno::EBADF,
            UsbError::InvalidArgument(_) => Errno::EINVAL,
        }
    }

    /// `-errno`, the byte-count sentinel returned for failed transfers.
    pub fn sentinel(&self) -> i32 {
        -(self.errno() as i32)
    }
}

/// Maps an `io::Error` from `open(2)` to its errno, defaulting to `EIO`.
pub(crate) fn errno_of(err: &std::io::Error) -> Errno {
    err.raw_os_error().map(Errno::from_i32).unwrap_or(Errno::EIO)
}

/// Transfer and read/write result as returned to the host.
pub fn transfer_status(res: &Result<usize>) -> i32 {
    match res {
        Ok(len) => i32::try_from(*len).unwrap_or(i32::MAX),
        Err(e) => e.sentinel(),
    }
}

/// Claim and release result as returned to the host.
pub fn claim_status(res: &Result<()>) -> bool {
    res.is_ok()
}

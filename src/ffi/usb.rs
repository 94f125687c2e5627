//! `com.windroidpro.usb.UsbManager` native methods.
//!
//! The host keeps the raw descriptor as an `int`; a negative value is the
//! invalid-handle sentinel. Each call borrows the descriptor only for its own
//! duration. A timeout of 0 blocks until the device answers.

#![allow(non_snake_case)]

use super::marshal::{get_string, with_byte_array};
use super::{guard, manager, to_jboolean};
use crate::endpoint::Endpoint;
use crate::error::{claim_status, transfer_status, Result, UsbError, INVALID_HANDLE};
use crate::manager::DeviceHandle;
use crate::usb_transfer::{BulkTransferRequest, ControlTransferRequest, Direction};
use jni::objects::{JByteArray, JObject, JString};
use jni::sys::{jboolean, jint, JNI_FALSE};
use jni::JNIEnv;
use log::error;

fn rejected(err: UsbError) -> jint {
    error!("{}", err);
    err.sentinel()
}

fn invalid_argument(what: &str, value: jint) -> UsbError {
    UsbError::InvalidArgument(format!("{} out of range: {}", what, value))
}

fn handle_or_reject(fd: jint) -> std::result::Result<DeviceHandle, jint> {
    let handle = DeviceHandle::from_raw(fd);
    if handle.is_valid() {
        Ok(handle)
    } else {
        Err(rejected(UsbError::InvalidHandle))
    }
}

fn open_status(res: Result<DeviceHandle>) -> jint {
    res.unwrap_or(DeviceHandle::invalid()).into_raw()
}

/// Only device-to-host data is committed back to the Java array.
fn copies_back(direction: Direction) -> bool {
    direction == Direction::DeviceToHost
}

fn buffer_length(length: jint) -> Result<usize> {
    usize::try_from(length).map_err(|_| invalid_argument("length", length))
}

fn interface_number(interface: jint) -> Result<u32> {
    u32::try_from(interface).map_err(|_| {
        let err = invalid_argument("interface", interface);
        error!("{}", err);
        err
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ControlArgs {
    request_type: u8,
    request: u8,
    value: u16,
    index: u16,
    length: u16,
    timeout: u32,
}

impl ControlArgs {
    /// Setup fields are narrowed to their wire width; length and timeout must fit.
    fn from_jni(
        request_type: jint,
        request: jint,
        value: jint,
        index: jint,
        length: jint,
        timeout: jint,
    ) -> Result<Self> {
        Ok(ControlArgs {
            request_type: request_type as u8,
            request: request as u8,
            value: value as u16,
            index: index as u16,
            length: u16::try_from(length).map_err(|_| invalid_argument("length", length))?,
            timeout: u32::try_from(timeout).map_err(|_| invalid_argument("timeout", timeout))?,
        })
    }

    fn copy_back(&self) -> bool {
        copies_back(Direction::from_bits(self.request_type))
    }

    fn request<'a>(&self, buffer: Option<&'a mut [u8]>) -> ControlTransferRequest<'a> {
        let ctrl = match buffer {
            Some(buf) => ControlTransferRequest::new_with_data(
                self.request_type,
                self.request,
                self.value,
                self.index,
                buf,
                self.timeout,
            ),
            None => ControlTransferRequest::new_nodata(
                self.request_type,
                self.request,
                self.value,
                self.index,
                self.timeout,
            ),
        };
        ctrl.with_length(self.length)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BulkArgs {
    endpoint: Endpoint,
    length: u32,
    timeout: u32,
}

impl BulkArgs {
    fn from_jni(endpoint: jint, length: jint, timeout: jint) -> Result<Self> {
        Ok(BulkArgs {
            endpoint: Endpoint::new(endpoint as u8),
            length: u32::try_from(length).map_err(|_| invalid_argument("length", length))?,
            timeout: u32::try_from(timeout).map_err(|_| invalid_argument("timeout", timeout))?,
        })
    }

    fn copy_back(&self) -> bool {
        copies_back(self.endpoint.direction())
    }

    fn request<'a>(&self, buffer: &'a mut [u8]) -> BulkTransferRequest<'a> {
        BulkTransferRequest::new(self.endpoint, buffer, self.timeout).with_length(self.length)
    }
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_usb_UsbManager_nativeOpenDevice<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    device_path: JString<'local>,
) -> jint {
    guard("nativeOpenDevice", INVALID_HANDLE, || {
        open_status(get_string(&mut env, &device_path).and_then(|path| manager().open_device(&path)))
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_usb_UsbManager_nativeCloseDevice<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    fd: jint,
) {
    guard("nativeCloseDevice", (), || {
        let mut handle = DeviceHandle::from_raw(fd);
        manager().close_device(&mut handle);
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_usb_UsbManager_nativeReadDevice<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    fd: jint,
    buffer: JByteArray<'local>,
    length: jint,
) -> jint {
    guard("nativeReadDevice", UsbError::InvalidHandle.sentinel(), || {
        let handle = match handle_or_reject(fd) {
            Ok(handle) => handle,
            Err(status) => return status,
        };
        let length = match buffer_length(length) {
            Ok(length) => length,
            Err(e) => return rejected(e),
        };
        let res = with_byte_array(&mut env, &buffer, copies_back(Direction::DeviceToHost), |buf| {
            manager().read_device(&handle, buf, length)
        })
        .and_then(|res| res);
        transfer_status(&res)
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_usb_UsbManager_nativeWriteDevice<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    fd: jint,
    buffer: JByteArray<'local>,
    length: jint,
) -> jint {
    guard("nativeWriteDevice", UsbError::InvalidHandle.sentinel(), || {
        let handle = match handle_or_reject(fd) {
            Ok(handle) => handle,
            Err(status) => return status,
        };
        let length = match buffer_length(length) {
            Ok(length) => length,
            Err(e) => return rejected(e),
        };
        let res = with_byte_array(&mut env, &buffer, copies_back(Direction::HostToDevice), |buf| {
            manager().write_device(&handle, buf, length)
        })
        .and_then(|res| res);
        transfer_status(&res)
    })
}

#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "system" fn Java_com_windroidpro_usb_UsbManager_nativeControlTransfer<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    fd: jint,
    request_type: jint,
    request: jint,
    value: jint,
    index: jint,
    buffer: JByteArray<'local>,
    length: jint,
    timeout: jint,
) -> jint {
    guard("nativeControlTransfer", UsbError::InvalidHandle.sentinel(), || {
        let handle = match handle_or_reject(fd) {
            Ok(handle) => handle,
            Err(status) => return status,
        };
        let args = match ControlArgs::from_jni(request_type, request, value, index, length, timeout) {
            Ok(args) => args,
            Err(e) => return rejected(e),
        };

        let res = if buffer.is_null() {
            manager().control_transfer(&handle, args.request(None))
        } else {
            with_byte_array(&mut env, &buffer, args.copy_back(), |buf| {
                manager().control_transfer(&handle, args.request(Some(buf)))
            })
            .and_then(|res| res)
        };
        transfer_status(&res)
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_usb_UsbManager_nativeBulkTransfer<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    fd: jint,
    endpoint: jint,
    buffer: JByteArray<'local>,
    length: jint,
    timeout: jint,
) -> jint {
    guard("nativeBulkTransfer", UsbError::InvalidHandle.sentinel(), || {
        let handle = match handle_or_reject(fd) {
            Ok(handle) => handle,
            Err(status) => return status,
        };
        let args = match BulkArgs::from_jni(endpoint, length, timeout) {
            Ok(args) => args,
            Err(e) => return rejected(e),
        };

        let res = with_byte_array(&mut env, &buffer, args.copy_back(), |buf| {
            manager().bulk_transfer(&handle, args.request(buf))
        })
        .and_then(|res| res);
        transfer_status(&res)
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_usb_UsbManager_nativeClaimInterface<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    fd: jint,
    interface: jint,
) -> jboolean {
    guard("nativeClaimInterface", JNI_FALSE, || {
        let res = interface_number(interface)
            .and_then(|number| manager().claim_interface(&DeviceHandle::from_raw(fd), number));
        to_jboolean(claim_status(&res))
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_usb_UsbManager_nativeReleaseInterface<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    fd: jint,
    interface: jint,
) -> jboolean {
    guard("nativeReleaseInterface", JNI_FALSE, || {
        let res = interface_number(interface)
            .and_then(|number| manager().release_interface(&DeviceHandle::from_raw(fd), number));
        to_jboolean(claim_status(&res))
    })
}

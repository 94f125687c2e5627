use crate::error::UsbError;
use jni::objects::{JByteArray, JString, ReleaseMode};
use jni::JNIEnv;
use log::error;

fn logged(err: UsbError) -> UsbError {
    error!("{}", err);
    err
}

/// A null reference from the host is an invalid argument.
pub(crate) fn non_null(is_null: bool, what: &str) -> Result<(), UsbError> {
    if is_null {
        return Err(logged(UsbError::InvalidArgument(format!("null {}", what))));
    }
    Ok(())
}

pub(crate) fn get_string(env: &mut JNIEnv, s: &JString) -> Result<String, UsbError> {
    non_null(s.is_null(), "string")?;
    env.get_string(s)
        .map(String::from)
        .map_err(|e| logged(UsbError::InvalidArgument(format!("unreadable string: {}", e))))
}

/// Pin `array` for the duration of `f`.
///
/// The elements are released when this returns, on every path. With
/// `copy_back` the bytes `f` wrote are committed to the Java array, otherwise
/// they are discarded.
pub(crate) fn with_byte_array<R, F>(
    env: &mut JNIEnv,
    array: &JByteArray,
    copy_back: bool,
    f: F,
) -> Result<R, UsbError>
where
    F: FnOnce(&mut [u8]) -> R,
{
    non_null(array.is_null(), "buffer")?;
    let mode = if copy_back {
        ReleaseMode::CopyBack
    } else {
        ReleaseMode::NoCopyBack
    };
    let mut elements = unsafe { env.get_array_elements(array, mode) }
        .map_err(|e| logged(UsbError::InvalidArgument(format!("cannot access buffer: {}", e))))?;
    let bytes = unsafe { std::slice::from_raw_parts_mut(elements.as_mut_ptr() as *mut u8, elements.len()) };
    Ok(f(bytes))
}

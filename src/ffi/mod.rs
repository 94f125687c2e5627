//! JNI entry points.
//!
//! Nothing unwinds across this boundary: every exported function runs inside
//! [`guard`] and reports failures as sentinel values.

pub mod bridge;
mod marshal;
pub mod usb;

use crate::config::UsbConfig;
use crate::manager::UsbManager;
use jni::sys::{jboolean, jint, JNI_FALSE, JNI_TRUE, JNI_VERSION_1_6};
use log::{error, LevelFilter};
use std::ffi::c_void;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::OnceLock;

pub const LOG_TAG: &str = "WinDroidPro-Native";

static MANAGER: OnceLock<UsbManager> = OnceLock::new();

pub(crate) fn manager() -> &'static UsbManager {
    MANAGER.get_or_init(|| UsbManager::usbfs(UsbConfig::from_env()))
}

/// Run `f`, turning a panic into `fallback`.
pub(crate) fn guard<R, F>(name: &str, fallback: R, f: F) -> R
where
    F: FnOnce() -> R,
{
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        error!("{}: panic caught at JNI boundary", name);
        fallback
    })
}

pub(crate) fn to_jboolean(value: bool) -> jboolean {
    if value {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

#[cfg(target_os = "android")]
fn init_logging(level: LevelFilter) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(level)
            .with_tag(LOG_TAG),
    );
}

#[cfg(not(target_os = "android"))]
fn init_logging(level: LevelFilter) {
    log::set_max_level(level);
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "system" fn JNI_OnLoad(_vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
    guard("JNI_OnLoad", JNI_VERSION_1_6, || {
        init_logging(manager().config().log_level);
        JNI_VERSION_1_6
    })
}

//! `com.windroidpro.native_bridge.NativeBridge` native methods. Every call is
//! routed to a placeholder from [`crate::compat`].

#![allow(non_snake_case)]

use super::marshal::get_string;
use super::{guard, to_jboolean};
use crate::compat::box64::{Box64Placeholder, TranslationLoader};
use crate::compat::passthrough::{PassthroughPlaceholder, UsbPassthrough};
use crate::compat::wine::{WineLauncher, WinePlaceholder};
use jni::objects::{JObject, JString};
use jni::sys::{jboolean, jint, jstring, JNI_FALSE};
use jni::JNIEnv;
use log::{error, info};
use std::ptr;

pub const VERSION: &str = "WinDroid Pro v1.0.0 - Native Bridge";

const WINE: WinePlaceholder = WinePlaceholder;
const BOX64: Box64Placeholder = Box64Placeholder;
const USB: PassthroughPlaceholder = PassthroughPlaceholder;

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_native_1bridge_NativeBridge_getVersion<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
) -> jstring {
    guard("getVersion", ptr::null_mut(), || match env.new_string(VERSION) {
        Ok(version) => JObject::from(version).into_raw(),
        Err(e) => {
            error!("getVersion: {}", e);
            ptr::null_mut()
        }
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_native_1bridge_NativeBridge_initializeWine<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    wine_prefix: JString<'local>,
    wine_arch: JString<'local>,
) -> jboolean {
    guard("initializeWine", JNI_FALSE, || {
        let (Ok(prefix), Ok(arch)) = (get_string(&mut env, &wine_prefix), get_string(&mut env, &wine_arch))
        else {
            return JNI_FALSE;
        };
        info!("Initializing Wine with prefix: {}, arch: {}", prefix, arch);
        match WINE.init(&prefix, &arch) {
            Ok(()) => {
                info!("Wine initialized successfully");
                to_jboolean(true)
            }
            Err(e) => {
                error!("Wine initialization failed: {}", e);
                JNI_FALSE
            }
        }
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_native_1bridge_NativeBridge_executeWineApp<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    exe_path: JString<'local>,
    args: JString<'local>,
    working_dir: JString<'local>,
) -> jint {
    guard("executeWineApp", -1, || {
        let (Ok(exe), Ok(args), Ok(dir)) = (
            get_string(&mut env, &exe_path),
            get_string(&mut env, &args),
            get_string(&mut env, &working_dir),
        ) else {
            return -1;
        };
        info!("Executing Wine app: {} with args: {}", exe, args);
        WINE.execute(&exe, &args, &dir)
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_native_1bridge_NativeBridge_initializeBox64<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    lib_path: JString<'local>,
) -> jboolean {
    guard("initializeBox64", JNI_FALSE, || {
        let Ok(path) = get_string(&mut env, &lib_path) else {
            return JNI_FALSE;
        };
        info!("Initializing Box64 with library path: {}", path);
        match BOX64.init(&path) {
            Ok(()) => {
                info!("Box64 initialized successfully");
                to_jboolean(true)
            }
            Err(e) => {
                error!("Box64 initialization failed: {}", e);
                JNI_FALSE
            }
        }
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_native_1bridge_NativeBridge_initializeUSB<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
) -> jboolean {
    guard("initializeUSB", JNI_FALSE, || {
        info!("Initializing USB subsystem");
        match USB.init() {
            Ok(()) => {
                info!("USB subsystem initialized successfully");
                to_jboolean(true)
            }
            Err(e) => {
                error!("USB initialization failed: {}", e);
                JNI_FALSE
            }
        }
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_native_1bridge_NativeBridge_attachUSBDevice<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    vendor_id: jint,
    product_id: jint,
    fd: jint,
) -> jboolean {
    guard("attachUSBDevice", JNI_FALSE, || {
        match USB.attach(vendor_id as u16, product_id as u16, fd) {
            Ok(id) => {
                info!("USB device attached successfully with ID: {}", id);
                to_jboolean(true)
            }
            Err(e) => {
                error!("USB device attachment failed: {}", e);
                JNI_FALSE
            }
        }
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_native_1bridge_NativeBridge_detachUSBDevice<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
    device_id: jint,
) -> jboolean {
    guard("detachUSBDevice", JNI_FALSE, || match USB.detach(device_id) {
        Ok(()) => {
            info!("USB device detached successfully");
            to_jboolean(true)
        }
        Err(e) => {
            error!("USB device detachment failed: {}", e);
            JNI_FALSE
        }
    })
}

#[no_mangle]
pub extern "system" fn Java_com_windroidpro_native_1bridge_NativeBridge_cleanup<'local>(
    _env: JNIEnv<'local>,
    _this: JObject<'local>,
) {
    guard("cleanup", (), || {
        info!("Cleaning up native resources");
        WINE.cleanup();
        BOX64.cleanup();
        USB.cleanup();
        info!("Native cleanup completed");
    })
}

use super::CompatError;
use log::info;
use std::ffi::c_void;
use std::ptr::NonNull;

/// A library loaded by the translation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryHandle(pub NonNull<c_void>);

/// Address of a symbol resolved inside a [`LibraryHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolAddress(pub NonNull<c_void>);

/// Loads x86_64 libraries and resolves their symbols for the ARM host.
pub trait TranslationLoader {
    fn init(&self, lib_path: &str) -> Result<(), CompatError>;
    fn load_library(&self, lib_name: &str) -> Option<LibraryHandle>;
    fn get_symbol(&self, library: LibraryHandle, symbol_name: &str) -> Option<SymbolAddress>;
    fn cleanup(&self);
}

/// Stand-in: init succeeds, nothing is ever loaded or resolved.
#[derive(Debug, Default, Clone, Copy)]
pub struct Box64Placeholder;

impl TranslationLoader for Box64Placeholder {
    fn init(&self, lib_path: &str) -> Result<(), CompatError> {
        info!("Box64 init placeholder called: {}", lib_path);
        Ok(())
    }

    fn load_library(&self, lib_name: &str) -> Option<LibraryHandle> {
        info!("Box64 load library placeholder called: {}", lib_name);
        None
    }

    fn get_symbol(&self, library: LibraryHandle, symbol_name: &str) -> Option<SymbolAddress> {
        info!(
            "Box64 get symbol placeholder called: {} in {:?}",
            symbol_name, library.0
        );
        None
    }

    fn cleanup(&self) {
        info!("Box64 cleanup placeholder called");
    }
}

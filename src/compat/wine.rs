use super::CompatError;
use log::info;

/// Launches Windows executables inside a prefix.
pub trait WineLauncher {
    fn init(&self, prefix: &str, arch: &str) -> Result<(), CompatError>;
    /// Returns the process exit status.
    fn execute(&self, exe_path: &str, args: &str, working_dir: &str) -> i32;
    fn cleanup(&self);
}

/// Stand-in that records calls in the log and always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct WinePlaceholder;

impl WineLauncher for WinePlaceholder {
    fn init(&self, prefix: &str, arch: &str) -> Result<(), CompatError> {
        info!("Wine init placeholder called: prefix {}, arch {}", prefix, arch);
        Ok(())
    }

    fn execute(&self, exe_path: &str, args: &str, working_dir: &str) -> i32 {
        info!(
            "Wine execute placeholder called: {} {} (in {:?})",
            exe_path, args, working_dir
        );
        0
    }

    fn cleanup(&self) {
        info!("Wine cleanup placeholder called");
    }
}

/*
 * Windows side of the jump list: the `windows` crate COM implementations of the
 * shell boundary traits in `core::native`, the per-thread COM apartment guard, and
 * registration of the process's AppUserModelID.
 */
pub mod app_identity;
pub mod com;
pub mod error;
pub mod win32_shell;

pub use app_identity::register_process_identity;
pub use com::ComApartment;
pub use error::{PlatformError, Result as PlatformResult};
pub use win32_shell::{
    Win32DestinationList, Win32ObjectCollection, Win32ShellBackend, Win32ShellItem,
    Win32ShellLink,
};

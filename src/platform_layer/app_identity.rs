use super::error::{PlatformError, Result as PlatformResult};
use crate::core::AppUserModelId;
use windows::{Win32::UI::Shell::SetCurrentProcessExplicitAppUserModelID, core::HSTRING};

/// Makes the taskbar group this process's windows under `id`, the identity its jump list
/// is registered for.
pub fn register_process_identity(id: &AppUserModelId) -> PlatformResult<()> {
    unsafe { SetCurrentProcessExplicitAppUserModelID(&HSTRING::from(id.as_str())) }.map_err(
        |e| {
            log::error!("Failed to set the process AppUserModelID '{id}': {e:?}");
            PlatformError::Win32(e)
        },
    )
}

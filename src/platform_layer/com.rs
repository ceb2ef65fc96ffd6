use super::error::{PlatformError, Result as PlatformResult};
use windows::Win32::{
    Foundation::{RPC_E_CHANGED_MODE, S_FALSE},
    System::Com::{COINIT_APARTMENTTHREADED, CoInitializeEx, CoUninitialize},
};

/// Initializes COM for the current thread and uninitializes it again on drop.
pub struct ComApartment {
    initialized: bool,
}

impl ComApartment {
    pub fn initialize() -> PlatformResult<Self> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) };
        if hr == RPC_E_CHANGED_MODE {
            // COM is already up in another mode on this thread; use it as is and
            // leave uninitialization to whoever set it up.
            log::debug!("ComApartment: Thread already initialized with a different model.");
            return Ok(ComApartment { initialized: false });
        }
        if hr.is_err() {
            return Err(PlatformError::InitializationFailed(format!(
                "CoInitializeEx failed: {:?}",
                hr
            )));
        }
        if hr == S_FALSE {
            log::trace!("ComApartment: COM was already initialized on this thread.");
        }
        Ok(ComApartment { initialized: true })
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.initialized {
            unsafe { CoUninitialize() };
        }
    }
}

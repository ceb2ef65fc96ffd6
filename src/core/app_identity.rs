/*
 * The application identity (AppUserModelID) a jump list is keyed on. It is passed
 * explicitly to whoever needs it instead of living in process-wide state, so several
 * identities can be handled side by side.
 */
use std::fmt;

/// Used when no explicit identity is configured; `$1` is replaced by the application name.
pub const DEFAULT_APP_USER_MODEL_ID_FORMAT: &str = "jumplist.app.$1";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppUserModelId(String);

impl AppUserModelId {
    pub fn new(id: impl Into<String>) -> Self {
        AppUserModelId(id.into())
    }

    pub fn from_app_name(app_name: &str) -> Self {
        AppUserModelId(DEFAULT_APP_USER_MODEL_ID_FORMAT.replace("$1", app_name))
    }

    /// An explicitly configured, non-blank id wins over the one derived from the name.
    pub fn resolve(explicit: Option<&str>, app_name: &str) -> Self {
        match explicit.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => AppUserModelId::new(id),
            None => AppUserModelId::from_app_name(app_name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppUserModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

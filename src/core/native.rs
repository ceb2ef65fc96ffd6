/*
 * Describes the shell boundary the jump list logic talks to. The traits mirror the
 * native destination list, shell link, shell item, and object collection objects so
 * that the appenders, the removed-item reconciler, and the transaction manager can be
 * written once against them. The Windows implementation lives in `platform_layer`;
 * unit tests use an in-memory recording implementation.
 *
 * Native failures are carried as `NativeError`, which keeps the raw status code so
 * that the mapping table below can turn specific codes into specific results.
 */
use super::models::JumpListResult;
use std::fmt;
use std::path::{Path, PathBuf};

/// A native status code (`HRESULT` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HResult(pub i32);

impl HResult {
    pub const fn from_u32(code: u32) -> Self {
        HResult(code as i32)
    }
}

impl fmt::Display for HResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0 as u32)
    }
}

pub const E_FAIL: HResult = HResult::from_u32(0x8000_4005);
pub const E_ACCESSDENIED: HResult = HResult::from_u32(0x8007_0005);
/// The application is not registered as a handler for a file type used in a custom category.
pub const DESTS_E_NO_MATCHING_ASSOC_HANDLER: HResult = HResult::from_u32(0x8004_0F03);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeError {
    /// Name of the native call that failed.
    pub operation: &'static str,
    pub code: HResult,
}

impl NativeError {
    pub fn new(operation: &'static str, code: HResult) -> Self {
        NativeError { operation, code }
    }
}

impl fmt::Display for NativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed with {}", self.operation, self.code)
    }
}

impl std::error::Error for NativeError {}

pub type Result<T> = std::result::Result<T, NativeError>;

// Status codes `AppendCategory` is known to report, and what they mean to the caller.
const CUSTOM_CATEGORY_FAILURES: &[(HResult, JumpListResult)] = &[
    (
        DESTS_E_NO_MATCHING_ASSOC_HANDLER,
        JumpListResult::MissingFileTypeRegistrationError,
    ),
    (
        E_ACCESSDENIED,
        JumpListResult::CustomCategoryAccessDeniedError,
    ),
];

/// Maps a failed custom category append to a result. Unknown codes are `GenericError`.
pub fn classify_custom_category_failure(code: HResult) -> JumpListResult {
    CUSTOM_CATEGORY_FAILURES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, result)| *result)
        .unwrap_or(JumpListResult::GenericError)
}

/// Categories whose content the shell maintains itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownCategory {
    Frequent,
    Recent,
}

pub trait ShellLinkOperations {
    fn set_path(&mut self, path: &Path) -> Result<()>;
    fn set_arguments(&mut self, arguments: &str) -> Result<()>;
    fn set_description(&mut self, description: &str) -> Result<()>;
    fn set_icon_location(&mut self, icon_path: &Path, icon_index: i32) -> Result<()>;
    /// Stores the title in the link's property store, where the jump list reads it from.
    fn set_title(&mut self, title: &str) -> Result<()>;
    fn mark_as_separator(&mut self) -> Result<()>;

    fn path(&self) -> Result<PathBuf>;
    /// `None` when the property is absent or not a string.
    fn arguments(&self) -> Result<Option<String>>;
    /// `None` when the property is absent or not a string.
    fn title(&self) -> Result<Option<String>>;
    fn icon_location(&self) -> Result<(PathBuf, i32)>;
    fn description(&self) -> Result<String>;
}

pub trait ShellItemOperations {
    fn file_system_path(&self) -> Result<PathBuf>;
}

/// One object of the array the shell returns from `begin_list`.
#[derive(Debug, Clone)]
pub enum RemovedObject<L, I> {
    Link(L),
    File(I),
    Unrecognized,
}

pub trait ObjectCollectionOperations {
    type Link;
    type Item;

    fn add_link(&mut self, link: Self::Link) -> Result<()>;
    fn add_item(&mut self, item: Self::Item) -> Result<()>;
}

/*
 * Creates the native objects a jump list is built from. Every object is owned by
 * the caller and released when dropped, whichever path the caller takes.
 */
pub trait ShellObjectFactory {
    type Link: ShellLinkOperations;
    type Item: ShellItemOperations;
    type Collection: ObjectCollectionOperations<Link = Self::Link, Item = Self::Item>;

    fn create_shell_link(&self) -> Result<Self::Link>;
    fn create_shell_item(&self, path: &Path) -> Result<Self::Item>;
    fn create_object_collection(&self) -> Result<Self::Collection>;
}

pub struct BeginListOutcome<L, I> {
    pub minimum_slots: u32,
    pub removed: Vec<RemovedObject<L, I>>,
}

/// The native destination list of one application identity.
pub trait DestinationListOperations: ShellObjectFactory {
    fn set_app_id(&mut self, app_id: &str) -> Result<()>;
    fn begin_list(&mut self) -> Result<BeginListOutcome<Self::Link, Self::Item>>;
    fn append_known_category(&mut self, category: KnownCategory) -> Result<()>;
    fn add_user_tasks(&mut self, tasks: &Self::Collection) -> Result<()>;
    fn append_category(&mut self, name: &str, items: &Self::Collection) -> Result<()>;
    fn commit_list(&mut self) -> Result<()>;
    fn abort_list(&mut self) -> Result<()>;
    fn delete_list(&mut self, app_id: &str) -> Result<()>;
}

/// Hands out a fresh destination list object for every update.
pub trait DestinationListBackend {
    type List: DestinationListOperations;

    fn create_destination_list(&self) -> Result<Self::List>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_custom_category_failures() {
        assert_eq!(
            classify_custom_category_failure(DESTS_E_NO_MATCHING_ASSOC_HANDLER),
            JumpListResult::MissingFileTypeRegistrationError
        );
        assert_eq!(
            classify_custom_category_failure(E_ACCESSDENIED),
            JumpListResult::CustomCategoryAccessDeniedError
        );
    }

    #[test]
    fn test_classify_unknown_failure_defaults_to_generic() {
        assert_eq!(
            classify_custom_category_failure(E_FAIL),
            JumpListResult::GenericError
        );
        assert_eq!(
            classify_custom_category_failure(HResult::from_u32(0x8007_000E)),
            JumpListResult::GenericError
        );
    }

    #[test]
    fn test_native_error_display_shows_hex_code() {
        let err = NativeError::new("AppendCategory", E_ACCESSDENIED);
        assert_eq!(err.to_string(), "AppendCategory failed with 0x80070005");
    }
}

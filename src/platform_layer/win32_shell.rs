/*
 * Windows implementation of the shell boundary declared in `core::native`. Each type
 * wraps one COM interface; the interface is released when the wrapper is dropped.
 * Failed calls are reported as `NativeError`s carrying the HRESULT, which the core
 * classifies into jump list results.
 */
use super::error::native_error;
use crate::core::native::{
    BeginListOutcome, DestinationListBackend, DestinationListOperations, KnownCategory,
    ObjectCollectionOperations, RemovedObject, Result, ShellItemOperations, ShellLinkOperations,
    ShellObjectFactory,
};
use std::ffi::c_void;
use std::path::{Path, PathBuf};
use windows::{
    Win32::{
        Foundation::MAX_PATH,
        Storage::EnhancedStorage::{
            PKEY_AppUserModel_IsDestListSeparator, PKEY_Link_Arguments, PKEY_Title,
        },
        System::{
            Com::{
                CLSCTX_INPROC_SERVER, CoCreateInstance, CoTaskMemFree,
                StructuredStorage::{
                    PROPVARIANT, PVCHF_DEFAULT, PropVariantChangeType, PropVariantToStringAlloc,
                },
            },
            Variant::VT_LPWSTR,
        },
        UI::Shell::{
            Common::{IObjectArray, IObjectCollection},
            DestinationList, EnumerableObjectCollection, ICustomDestinationList, IShellItem,
            IShellLinkW, KDC_FREQUENT, KDC_RECENT,
            PropertiesSystem::IPropertyStore,
            SHCreateItemFromParsingName, SIGDN_FILESYSPATH, ShellLink,
        },
    },
    core::{HSTRING, Interface, PWSTR},
};

// Matches INFOTIPSIZE, the longest description a shell link keeps.
const DESCRIPTION_BUFFER_LEN: usize = 1024;

fn from_wide(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

fn take_co_task_string(text: PWSTR) -> Option<String> {
    if text.is_null() {
        return None;
    }
    let value = unsafe { text.to_string() }.ok();
    unsafe { CoTaskMemFree(Some(text.as_ptr() as *const c_void)) };
    value
}

fn string_property_value(text: &str) -> windows::core::Result<PROPVARIANT> {
    let source = PROPVARIANT::from(text);
    let mut value = PROPVARIANT::default();
    unsafe { PropVariantChangeType(&mut value, &source, PVCHF_DEFAULT, VT_LPWSTR)? };
    Ok(value)
}

// The list is open once BeginList succeeds; an unreadable removed array only
// means there is nothing to reconcile.
fn removed_count(count: windows::core::Result<u32>) -> u32 {
    count.unwrap_or_else(|e| {
        log::warn!("Win32DestinationList: Could not count removed objects, assuming none: {e}");
        0
    })
}

pub struct Win32ShellLink {
    link: IShellLinkW,
}

impl Win32ShellLink {
    fn property_store(&self, operation: &'static str) -> Result<IPropertyStore> {
        self.link
            .cast::<IPropertyStore>()
            .map_err(|e| native_error(operation, &e))
    }

    fn write_property<F>(&self, operation: &'static str, write: F) -> Result<()>
    where
        F: FnOnce(&IPropertyStore) -> windows::core::Result<()>,
    {
        let store = self.property_store(operation)?;
        write(&store)
            .and_then(|()| unsafe { store.Commit() })
            .map_err(|e| native_error(operation, &e))
    }

    fn read_string_property<F>(&self, operation: &'static str, read: F) -> Result<Option<String>>
    where
        F: FnOnce(&IPropertyStore) -> windows::core::Result<PROPVARIANT>,
    {
        let store = self.property_store(operation)?;
        let value = read(&store).map_err(|e| native_error(operation, &e))?;
        // Values that do not convert to a string are treated like absent ones.
        let text = match unsafe { PropVariantToStringAlloc(&value) } {
            Ok(text) => take_co_task_string(text),
            Err(_) => None,
        };
        Ok(text.filter(|text| !text.is_empty()))
    }
}

impl ShellLinkOperations for Win32ShellLink {
    fn set_path(&mut self, path: &Path) -> Result<()> {
        unsafe { self.link.SetPath(&HSTRING::from(path.as_os_str())) }
            .map_err(|e| native_error("IShellLinkW::SetPath", &e))
    }

    fn set_arguments(&mut self, arguments: &str) -> Result<()> {
        unsafe { self.link.SetArguments(&HSTRING::from(arguments)) }
            .map_err(|e| native_error("IShellLinkW::SetArguments", &e))
    }

    fn set_description(&mut self, description: &str) -> Result<()> {
        unsafe { self.link.SetDescription(&HSTRING::from(description)) }
            .map_err(|e| native_error("IShellLinkW::SetDescription", &e))
    }

    fn set_icon_location(&mut self, icon_path: &Path, icon_index: i32) -> Result<()> {
        unsafe {
            self.link
                .SetIconLocation(&HSTRING::from(icon_path.as_os_str()), icon_index)
        }
        .map_err(|e| native_error("IShellLinkW::SetIconLocation", &e))
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.write_property("IPropertyStore::SetValue(PKEY_Title)", |store| {
            let value = string_property_value(title)?;
            unsafe { store.SetValue(&PKEY_Title, &value) }
        })
    }

    fn mark_as_separator(&mut self) -> Result<()> {
        self.write_property(
            "IPropertyStore::SetValue(PKEY_AppUserModel_IsDestListSeparator)",
            |store| unsafe {
                store.SetValue(&PKEY_AppUserModel_IsDestListSeparator, &PROPVARIANT::from(true))
            },
        )
    }

    fn path(&self) -> Result<PathBuf> {
        let mut buffer = [0u16; MAX_PATH as usize];
        unsafe { self.link.GetPath(&mut buffer, std::ptr::null_mut(), 0) }
            .map_err(|e| native_error("IShellLinkW::GetPath", &e))?;
        Ok(PathBuf::from(from_wide(&buffer)))
    }

    fn arguments(&self) -> Result<Option<String>> {
        self.read_string_property("IPropertyStore::GetValue(PKEY_Link_Arguments)", |store| unsafe {
            store.GetValue(&PKEY_Link_Arguments)
        })
    }

    fn title(&self) -> Result<Option<String>> {
        self.read_string_property("IPropertyStore::GetValue(PKEY_Title)", |store| unsafe {
            store.GetValue(&PKEY_Title)
        })
    }

    fn icon_location(&self) -> Result<(PathBuf, i32)> {
        let mut buffer = [0u16; MAX_PATH as usize];
        let mut icon_index = 0i32;
        unsafe { self.link.GetIconLocation(&mut buffer, &mut icon_index) }
            .map_err(|e| native_error("IShellLinkW::GetIconLocation", &e))?;
        Ok((PathBuf::from(from_wide(&buffer)), icon_index))
    }

    fn description(&self) -> Result<String> {
        let mut buffer = [0u16; DESCRIPTION_BUFFER_LEN];
        unsafe { self.link.GetDescription(&mut buffer) }
            .map_err(|e| native_error("IShellLinkW::GetDescription", &e))?;
        Ok(from_wide(&buffer))
    }
}

pub struct Win32ShellItem {
    item: IShellItem,
}

impl ShellItemOperations for Win32ShellItem {
    fn file_system_path(&self) -> Result<PathBuf> {
        let name = unsafe { self.item.GetDisplayName(SIGDN_FILESYSPATH) }
            .map_err(|e| native_error("IShellItem::GetDisplayName", &e))?;
        Ok(take_co_task_string(name)
            .map(PathBuf::from)
            .unwrap_or_default())
    }
}

pub struct Win32ObjectCollection {
    collection: IObjectCollection,
}

impl Win32ObjectCollection {
    fn as_object_array(&self, operation: &'static str) -> Result<IObjectArray> {
        self.collection
            .cast::<IObjectArray>()
            .map_err(|e| native_error(operation, &e))
    }
}

impl ObjectCollectionOperations for Win32ObjectCollection {
    type Link = Win32ShellLink;
    type Item = Win32ShellItem;

    fn add_link(&mut self, link: Win32ShellLink) -> Result<()> {
        unsafe { self.collection.AddObject(&link.link) }
            .map_err(|e| native_error("IObjectCollection::AddObject", &e))
    }

    fn add_item(&mut self, item: Win32ShellItem) -> Result<()> {
        unsafe { self.collection.AddObject(&item.item) }
            .map_err(|e| native_error("IObjectCollection::AddObject", &e))
    }
}

pub struct Win32DestinationList {
    destinations: ICustomDestinationList,
}

impl Win32DestinationList {
    // Files come back as shell items, everything else the shell stored as a link.
    fn removed_object(
        array: &IObjectArray,
        index: u32,
    ) -> RemovedObject<Win32ShellLink, Win32ShellItem> {
        if let Ok(item) = unsafe { array.GetAt::<IShellItem>(index) } {
            return RemovedObject::File(Win32ShellItem { item });
        }
        if let Ok(link) = unsafe { array.GetAt::<IShellLinkW>(index) } {
            return RemovedObject::Link(Win32ShellLink { link });
        }
        log::warn!("Win32DestinationList: Removed object {index} is neither a file nor a link.");
        RemovedObject::Unrecognized
    }
}

impl ShellObjectFactory for Win32DestinationList {
    type Link = Win32ShellLink;
    type Item = Win32ShellItem;
    type Collection = Win32ObjectCollection;

    fn create_shell_link(&self) -> Result<Win32ShellLink> {
        let link: IShellLinkW = unsafe { CoCreateInstance(&ShellLink, None, CLSCTX_INPROC_SERVER) }
            .map_err(|e| native_error("CoCreateInstance(ShellLink)", &e))?;
        Ok(Win32ShellLink { link })
    }

    fn create_shell_item(&self, path: &Path) -> Result<Win32ShellItem> {
        let item: IShellItem =
            unsafe { SHCreateItemFromParsingName(&HSTRING::from(path.as_os_str()), None) }
                .map_err(|e| native_error("SHCreateItemFromParsingName", &e))?;
        Ok(Win32ShellItem { item })
    }

    fn create_object_collection(&self) -> Result<Win32ObjectCollection> {
        let collection: IObjectCollection =
            unsafe { CoCreateInstance(&EnumerableObjectCollection, None, CLSCTX_INPROC_SERVER) }
                .map_err(|e| native_error("CoCreateInstance(EnumerableObjectCollection)", &e))?;
        Ok(Win32ObjectCollection { collection })
    }
}

impl DestinationListOperations for Win32DestinationList {
    fn set_app_id(&mut self, app_id: &str) -> Result<()> {
        unsafe { self.destinations.SetAppID(&HSTRING::from(app_id)) }
            .map_err(|e| native_error("ICustomDestinationList::SetAppID", &e))
    }

    fn begin_list(&mut self) -> Result<BeginListOutcome<Win32ShellLink, Win32ShellItem>> {
        let mut minimum_slots = 0u32;
        let removed: IObjectArray = unsafe { self.destinations.BeginList(&mut minimum_slots) }
            .map_err(|e| native_error("ICustomDestinationList::BeginList", &e))?;
        let count = removed_count(unsafe { removed.GetCount() });
        let removed = (0..count)
            .map(|index| Self::removed_object(&removed, index))
            .collect();
        Ok(BeginListOutcome {
            minimum_slots,
            removed,
        })
    }

    fn append_known_category(&mut self, category: KnownCategory) -> Result<()> {
        let known = match category {
            KnownCategory::Frequent => KDC_FREQUENT,
            KnownCategory::Recent => KDC_RECENT,
        };
        unsafe { self.destinations.AppendKnownCategory(known) }
            .map_err(|e| native_error("ICustomDestinationList::AppendKnownCategory", &e))
    }

    fn add_user_tasks(&mut self, tasks: &Win32ObjectCollection) -> Result<()> {
        let tasks = tasks.as_object_array("ICustomDestinationList::AddUserTasks")?;
        unsafe { self.destinations.AddUserTasks(&tasks) }
            .map_err(|e| native_error("ICustomDestinationList::AddUserTasks", &e))
    }

    fn append_category(&mut self, name: &str, items: &Win32ObjectCollection) -> Result<()> {
        let items = items.as_object_array("ICustomDestinationList::AppendCategory")?;
        unsafe {
            self.destinations
                .AppendCategory(&HSTRING::from(name), &items)
        }
        .map_err(|e| native_error("ICustomDestinationList::AppendCategory", &e))
    }

    fn commit_list(&mut self) -> Result<()> {
        unsafe { self.destinations.CommitList() }
            .map_err(|e| native_error("ICustomDestinationList::CommitList", &e))
    }

    fn abort_list(&mut self) -> Result<()> {
        unsafe { self.destinations.AbortList() }
            .map_err(|e| native_error("ICustomDestinationList::AbortList", &e))
    }

    fn delete_list(&mut self, app_id: &str) -> Result<()> {
        unsafe { self.destinations.DeleteList(&HSTRING::from(app_id)) }
            .map_err(|e| native_error("ICustomDestinationList::DeleteList", &e))
    }
}

/// Creates `DestinationList` objects. COM must be initialized on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32ShellBackend;

impl DestinationListBackend for Win32ShellBackend {
    type List = Win32DestinationList;

    fn create_destination_list(&self) -> Result<Win32DestinationList> {
        let destinations: ICustomDestinationList =
            unsafe { CoCreateInstance(&DestinationList, None, CLSCTX_INPROC_SERVER) }
                .map_err(|e| native_error("CoCreateInstance(DestinationList)", &e))?;
        Ok(Win32DestinationList { destinations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::Foundation::E_FAIL;

    #[test]
    fn test_uncountable_removed_array_is_treated_as_empty() {
        assert_eq!(removed_count(Ok(3)), 3);
        assert_eq!(removed_count(Err(windows::core::Error::from(E_FAIL))), 0);
    }

    #[test]
    fn test_from_wide_stops_at_nul() {
        let mut buffer = [0u16; 16];
        for (slot, unit) in buffer.iter_mut().zip("notes.txt".encode_utf16()) {
            *slot = unit;
        }
        assert_eq!(from_wide(&buffer), "notes.txt");
    }
}

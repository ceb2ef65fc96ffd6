/*
 * In-memory stand-in for the shell objects, used by the unit tests of the appenders,
 * the reconciler, the transaction manager, and the jump list manager. Failures are
 * configured up front through `MockShellConfig`; every call against a destination
 * list is recorded in a log shared with the backend so tests can inspect it after
 * the list itself has been dropped.
 */
use super::native::{
    BeginListOutcome, DestinationListBackend, DestinationListOperations, E_FAIL, HResult,
    KnownCategory, NativeError, ObjectCollectionOperations, RemovedObject, Result,
    ShellItemOperations, ShellLinkOperations, ShellObjectFactory,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockShellLink {
    pub path: Option<PathBuf>,
    pub arguments: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<(PathBuf, i32)>,
    pub is_separator: bool,
    pub failing_paths: HashSet<PathBuf>,
    pub failing_titles: HashSet<String>,
    pub fail_separator: bool,
}

impl MockShellLink {
    /// A link as the shell would report it back from `begin_list`.
    pub fn stored(path: &str) -> Self {
        MockShellLink {
            path: Some(PathBuf::from(path)),
            ..Default::default()
        }
    }
}

fn mock_failure(operation: &'static str) -> NativeError {
    NativeError::new(operation, E_FAIL)
}

impl ShellLinkOperations for MockShellLink {
    fn set_path(&mut self, path: &Path) -> Result<()> {
        if self.failing_paths.contains(path) {
            return Err(mock_failure("SetPath"));
        }
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn set_arguments(&mut self, arguments: &str) -> Result<()> {
        self.arguments = Some(arguments.to_string());
        Ok(())
    }

    fn set_description(&mut self, description: &str) -> Result<()> {
        self.description = Some(description.to_string());
        Ok(())
    }

    fn set_icon_location(&mut self, icon_path: &Path, icon_index: i32) -> Result<()> {
        self.icon = Some((icon_path.to_path_buf(), icon_index));
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        if self.failing_titles.contains(title) {
            return Err(mock_failure("IPropertyStore::SetValue(Title)"));
        }
        self.title = Some(title.to_string());
        Ok(())
    }

    fn mark_as_separator(&mut self) -> Result<()> {
        if self.fail_separator {
            return Err(mock_failure("IPropertyStore::SetValue(IsDestListSeparator)"));
        }
        self.is_separator = true;
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        self.path.clone().ok_or_else(|| mock_failure("GetPath"))
    }

    fn arguments(&self) -> Result<Option<String>> {
        Ok(self.arguments.clone())
    }

    fn title(&self) -> Result<Option<String>> {
        Ok(self.title.clone())
    }

    fn icon_location(&self) -> Result<(PathBuf, i32)> {
        self.icon.clone().ok_or_else(|| mock_failure("GetIconLocation"))
    }

    fn description(&self) -> Result<String> {
        self.description
            .clone()
            .ok_or_else(|| mock_failure("GetDescription"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockShellItem {
    pub path: Option<PathBuf>,
}

impl ShellItemOperations for MockShellItem {
    fn file_system_path(&self) -> Result<PathBuf> {
        self.path.clone().ok_or_else(|| mock_failure("GetDisplayName"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockObject {
    Link(MockShellLink),
    File(PathBuf),
}

#[derive(Debug, Default)]
pub struct MockCollection {
    pub objects: Vec<MockObject>,
}

impl ObjectCollectionOperations for MockCollection {
    type Link = MockShellLink;
    type Item = MockShellItem;

    fn add_link(&mut self, link: MockShellLink) -> Result<()> {
        self.objects.push(MockObject::Link(link));
        Ok(())
    }

    fn add_item(&mut self, item: MockShellItem) -> Result<()> {
        let path = item.file_system_path()?;
        self.objects.push(MockObject::File(path));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    CreateCollection,
    SetAppId(String),
    BeginList,
    AppendKnownCategory(KnownCategory),
    AddUserTasks(Vec<MockObject>),
    AppendCategory(String, Vec<MockObject>),
    CommitList,
    AbortList,
    DeleteList(String),
}

pub type MockRemovedObject = RemovedObject<MockShellLink, MockShellItem>;

#[derive(Debug, Clone, Default)]
pub struct MockShellConfig {
    pub minimum_slots: u32,
    pub removed: Vec<MockRemovedObject>,
    pub fail_create_list: bool,
    pub fail_create_collection: bool,
    pub fail_create_link: bool,
    pub failing_link_paths: HashSet<PathBuf>,
    pub failing_link_titles: HashSet<String>,
    pub fail_separator: bool,
    pub unresolvable_files: HashSet<PathBuf>,
    pub set_app_id_error: Option<HResult>,
    pub begin_error: Option<HResult>,
    pub known_category_error: Option<HResult>,
    pub add_user_tasks_error: Option<HResult>,
    pub append_category_errors: HashMap<String, HResult>,
    pub commit_error: Option<HResult>,
    pub delete_error: Option<HResult>,
}

pub struct MockDestinationList {
    config: MockShellConfig,
    calls: Rc<RefCell<Vec<MockCall>>>,
}

impl MockDestinationList {
    pub fn new(config: MockShellConfig) -> Self {
        MockDestinationList {
            config,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    /// Keeps the call log readable after the list has been dropped.
    pub fn calls_handle(&self) -> Rc<RefCell<Vec<MockCall>>> {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: MockCall) {
        self.calls.borrow_mut().push(call);
    }

    fn outcome(operation: &'static str, error: Option<HResult>) -> Result<()> {
        match error {
            Some(code) => Err(NativeError::new(operation, code)),
            None => Ok(()),
        }
    }
}

impl ShellObjectFactory for MockDestinationList {
    type Link = MockShellLink;
    type Item = MockShellItem;
    type Collection = MockCollection;

    fn create_shell_link(&self) -> Result<MockShellLink> {
        if self.config.fail_create_link {
            return Err(mock_failure("CoCreateInstance(ShellLink)"));
        }
        Ok(MockShellLink {
            failing_paths: self.config.failing_link_paths.clone(),
            failing_titles: self.config.failing_link_titles.clone(),
            fail_separator: self.config.fail_separator,
            ..Default::default()
        })
    }

    fn create_shell_item(&self, path: &Path) -> Result<MockShellItem> {
        if self.config.unresolvable_files.contains(path) {
            return Err(mock_failure("SHCreateItemFromParsingName"));
        }
        Ok(MockShellItem {
            path: Some(path.to_path_buf()),
        })
    }

    fn create_object_collection(&self) -> Result<MockCollection> {
        self.record(MockCall::CreateCollection);
        if self.config.fail_create_collection {
            return Err(mock_failure("CoCreateInstance(EnumerableObjectCollection)"));
        }
        Ok(MockCollection::default())
    }
}

impl DestinationListOperations for MockDestinationList {
    fn set_app_id(&mut self, app_id: &str) -> Result<()> {
        self.record(MockCall::SetAppId(app_id.to_string()));
        Self::outcome("SetAppID", self.config.set_app_id_error)
    }

    fn begin_list(&mut self) -> Result<BeginListOutcome<MockShellLink, MockShellItem>> {
        self.record(MockCall::BeginList);
        Self::outcome("BeginList", self.config.begin_error)?;
        Ok(BeginListOutcome {
            minimum_slots: self.config.minimum_slots,
            removed: self.config.removed.clone(),
        })
    }

    fn append_known_category(&mut self, category: KnownCategory) -> Result<()> {
        self.record(MockCall::AppendKnownCategory(category));
        Self::outcome("AppendKnownCategory", self.config.known_category_error)
    }

    fn add_user_tasks(&mut self, tasks: &MockCollection) -> Result<()> {
        self.record(MockCall::AddUserTasks(tasks.objects.clone()));
        Self::outcome("AddUserTasks", self.config.add_user_tasks_error)
    }

    fn append_category(&mut self, name: &str, items: &MockCollection) -> Result<()> {
        self.record(MockCall::AppendCategory(
            name.to_string(),
            items.objects.clone(),
        ));
        Self::outcome(
            "AppendCategory",
            self.config.append_category_errors.get(name).copied(),
        )
    }

    fn commit_list(&mut self) -> Result<()> {
        self.record(MockCall::CommitList);
        Self::outcome("CommitList", self.config.commit_error)
    }

    fn abort_list(&mut self) -> Result<()> {
        self.record(MockCall::AbortList);
        Ok(())
    }

    fn delete_list(&mut self, app_id: &str) -> Result<()> {
        self.record(MockCall::DeleteList(app_id.to_string()));
        Self::outcome("DeleteList", self.config.delete_error)
    }
}

/// Creates destination lists that share one call log.
pub struct MockBackend {
    pub config: RefCell<MockShellConfig>,
    calls: Rc<RefCell<Vec<MockCall>>>,
}

impl MockBackend {
    pub fn new(config: MockShellConfig) -> Self {
        MockBackend {
            config: RefCell::new(config),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }
}

impl DestinationListBackend for MockBackend {
    type List = MockDestinationList;

    fn create_destination_list(&self) -> Result<MockDestinationList> {
        let config = self.config.borrow().clone();
        if config.fail_create_list {
            return Err(mock_failure("CoCreateInstance(DestinationList)"));
        }
        Ok(MockDestinationList {
            config,
            calls: Rc::clone(&self.calls),
        })
    }
}

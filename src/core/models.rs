use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

// The kind of a single jump list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpListItemKind {
    /// Launches a program (usually the one that owns the jump list) with arguments.
    Task,
    /// A visual divider. Only the standard Tasks category accepts these.
    Separator,
    /// Opens a file with the owning application. The application must be registered
    /// as a handler for the file type for the shell to accept it.
    File,
}

// Represents one entry of a jump list category.
// The text and icon fields are only meaningful for tasks; separators carry nothing
// and file entries only carry a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpListItem {
    pub kind: JumpListItemKind,
    /// Program to launch for a task, full file name for a file entry.
    pub path: PathBuf,
    pub arguments: String,
    pub title: String,
    pub description: String,
    pub icon_path: Option<PathBuf>,
    pub icon_index: i32,
}

impl JumpListItem {
    /// Creates a task launching `program` with the given display title.
    pub fn task(program: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        JumpListItem {
            kind: JumpListItemKind::Task,
            path: program.into(),
            arguments: String::new(),
            title: title.into(),
            description: String::new(),
            icon_path: None,
            icon_index: 0,
        }
    }

    pub fn separator() -> Self {
        JumpListItem {
            kind: JumpListItemKind::Separator,
            path: PathBuf::new(),
            arguments: String::new(),
            title: String::new(),
            description: String::new(),
            icon_path: None,
            icon_index: 0,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        JumpListItem {
            kind: JumpListItemKind::File,
            path: path.into(),
            ..JumpListItem::separator()
        }
    }

    pub fn with_arguments(mut self, arguments: impl Into<String>) -> Self {
        self.arguments = arguments.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon_path: impl Into<PathBuf>, icon_index: i32) -> Self {
        self.icon_path = Some(icon_path.into());
        self.icon_index = icon_index;
        self
    }

    /// A short label for log messages.
    pub fn display_label(&self) -> String {
        match self.kind {
            JumpListItemKind::Task => format!("task '{}'", self.title),
            JumpListItemKind::Separator => "separator".to_string(),
            JumpListItemKind::File => format!("file {:?}", self.path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpListCategoryKind {
    /// The standard Tasks category. Its name is fixed by the shell but its items,
    /// including separators, are set by the application.
    Tasks,
    /// Managed by the shell; only activated, never populated.
    Frequent,
    /// Managed by the shell; only activated, never populated.
    Recent,
    /// A named category holding tasks and files, but no separators.
    Custom,
}

// Represents one section of a jump list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpListCategory {
    pub kind: JumpListCategoryKind,
    pub name: Option<String>,
    pub items: Vec<JumpListItem>,
}

impl JumpListCategory {
    pub fn tasks(items: Vec<JumpListItem>) -> Self {
        JumpListCategory {
            kind: JumpListCategoryKind::Tasks,
            name: None,
            items,
        }
    }

    pub fn custom(name: impl Into<String>, items: Vec<JumpListItem>) -> Self {
        JumpListCategory {
            kind: JumpListCategoryKind::Custom,
            name: Some(name.into()),
            items,
        }
    }

    pub fn frequent() -> Self {
        JumpListCategory {
            kind: JumpListCategoryKind::Frequent,
            name: None,
            items: Vec::new(),
        }
    }

    pub fn recent() -> Self {
        JumpListCategory {
            kind: JumpListCategoryKind::Recent,
            name: None,
            items: Vec::new(),
        }
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/*
 * The single outcome reported for one jump list update. Several categories may
 * fail independently; the appenders fold their failures into one of these values,
 * preferring the specific variants over `GenericError`. Serialization uses the
 * fixed external result codes.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JumpListResult {
    #[serde(rename = "ok")]
    Success,
    #[serde(rename = "argumentError")]
    ArgumentError,
    #[serde(rename = "error")]
    GenericError,
    #[serde(rename = "invalidSeparatorError")]
    CustomCategorySeparatorError,
    #[serde(rename = "fileTypeRegistrationError")]
    MissingFileTypeRegistrationError,
    #[serde(rename = "customCategoryAccessDeniedError")]
    CustomCategoryAccessDeniedError,
}

impl JumpListResult {
    pub fn as_code(&self) -> &'static str {
        match self {
            JumpListResult::Success => "ok",
            JumpListResult::ArgumentError => "argumentError",
            JumpListResult::GenericError => "error",
            JumpListResult::CustomCategorySeparatorError => "invalidSeparatorError",
            JumpListResult::MissingFileTypeRegistrationError => "fileTypeRegistrationError",
            JumpListResult::CustomCategoryAccessDeniedError => {
                "customCategoryAccessDeniedError"
            }
        }
    }

    pub fn is_success(&self) -> bool {
        *self == JumpListResult::Success
    }
}

impl fmt::Display for JumpListResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder_sets_optional_fields() {
        // Arrange & Act
        let item = JumpListItem::task(r"C:\app\app.exe", "New Window")
            .with_arguments("--new-window")
            .with_description("Opens a new window")
            .with_icon(r"C:\app\app.exe", 2);

        // Assert
        assert_eq!(item.kind, JumpListItemKind::Task);
        assert_eq!(item.arguments, "--new-window");
        assert_eq!(item.description, "Opens a new window");
        assert_eq!(item.icon_path, Some(PathBuf::from(r"C:\app\app.exe")));
        assert_eq!(item.icon_index, 2);
    }

    #[test]
    fn test_separator_and_file_carry_no_task_fields() {
        let separator = JumpListItem::separator();
        let file = JumpListItem::file(r"C:\docs\report.txt");

        assert_eq!(separator.path, PathBuf::new());
        assert!(separator.title.is_empty());
        assert_eq!(file.kind, JumpListItemKind::File);
        assert!(file.title.is_empty());
        assert_eq!(file.icon_path, None);
    }

    #[test]
    fn test_result_codes_match_serialization() {
        let all = [
            JumpListResult::Success,
            JumpListResult::ArgumentError,
            JumpListResult::GenericError,
            JumpListResult::CustomCategorySeparatorError,
            JumpListResult::MissingFileTypeRegistrationError,
            JumpListResult::CustomCategoryAccessDeniedError,
        ];
        for result in all {
            let json = serde_json::to_string(&result).unwrap();
            assert_eq!(json, format!("\"{}\"", result.as_code()));
        }
        assert_eq!(JumpListResult::GenericError.to_string(), "error");
    }
}

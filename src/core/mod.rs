/*
 * This module consolidates the platform-agnostic jump list logic. It holds the item
 * and category model, the shell boundary traits (`DestinationListOperations` and
 * friends), the item builders and category appenders that apply a desired jump list
 * through those traits, the reconciler for items the user removed, the transaction
 * state machine, the parser for the external JSON description, and configuration.
 */
pub mod app_identity;
pub mod categories_appender;
pub mod category_appender;
pub mod category_parser;
pub mod config;
pub mod item_builders;
pub mod jump_list_manager;
pub mod models;
pub mod native;
pub mod path_utils;
pub mod removed_items;
pub mod transaction;

#[cfg(test)]
pub(crate) mod mock_shell;

// Re-export key structures and enums
pub use app_identity::AppUserModelId;
pub use models::{
    JumpListCategory, JumpListCategoryKind, JumpListItem, JumpListItemKind, JumpListResult,
};

pub use category_parser::{ParseError, parse_categories};

// Re-export the shell boundary
pub use native::{
    BeginListOutcome, DestinationListBackend, DestinationListOperations, HResult, KnownCategory,
    NativeError, ObjectCollectionOperations, RemovedObject, ShellItemOperations,
    ShellLinkOperations, ShellObjectFactory,
};

pub use jump_list_manager::{JumpListManager, JumpListRequest};
pub use transaction::{BeginSnapshot, JumpListTransaction, TransactionState};

// Re-export config related items
pub use config::{ConfigError, ConfigManagerOperations, CoreConfigManager, JumpListConfig};

/*
 * Owns one update transaction against the destination list of one application
 * identity. The state machine is
 *
 *   Idle --begin--> Began --commit--> Committed
 *                         --abort---> Aborted
 *   Idle --delete-> Deleted
 *
 * An instance handles exactly one transaction and needs exclusive access for its
 * whole lifetime. Calls made in the wrong state are reported as `GenericError`.
 * Dropping an instance that is still in `Began` aborts the native transaction.
 */
use super::app_identity::AppUserModelId;
use super::categories_appender::append_categories;
use super::category_appender::append_user_tasks;
use super::models::{JumpListCategory, JumpListItem, JumpListResult};
use super::native::DestinationListOperations;
use super::removed_items::convert_removed_items;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Idle,
    Began,
    Committed,
    Aborted,
    Deleted,
}

/// What the shell reported when the transaction was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeginSnapshot {
    pub minimum_slots: u32,
    pub removed_items: Vec<JumpListItem>,
}

pub struct JumpListTransaction<D: DestinationListOperations> {
    destinations: D,
    app_user_model_id: AppUserModelId,
    state: TransactionState,
}

impl<D: DestinationListOperations> JumpListTransaction<D> {
    pub fn new(destinations: D, app_user_model_id: AppUserModelId) -> Self {
        JumpListTransaction {
            destinations,
            app_user_model_id,
            state: TransactionState::Idle,
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn app_user_model_id(&self) -> &AppUserModelId {
        &self.app_user_model_id
    }

    fn expect_state(&self, expected: TransactionState, operation: &str) -> bool {
        if self.state == expected {
            return true;
        }
        log::error!(
            "JumpListTransaction: {operation} requires state {expected:?}, but the transaction for '{}' is {:?}.",
            self.app_user_model_id,
            self.state
        );
        false
    }

    pub fn begin(&mut self) -> Result<BeginSnapshot, JumpListResult> {
        if !self.expect_state(TransactionState::Idle, "begin") {
            return Err(JumpListResult::GenericError);
        }

        if let Err(e) = self
            .destinations
            .set_app_id(self.app_user_model_id.as_str())
        {
            log::error!(
                "JumpListTransaction: Failed to set app id '{}': {e}",
                self.app_user_model_id
            );
            return Err(JumpListResult::GenericError);
        }

        let outcome = self.destinations.begin_list().map_err(|e| {
            log::error!(
                "JumpListTransaction: Failed to begin Jump List for '{}': {e}",
                self.app_user_model_id
            );
            JumpListResult::GenericError
        })?;
        self.state = TransactionState::Began;

        let removed_items = convert_removed_items(outcome.removed);
        log::debug!(
            "JumpListTransaction: Began Jump List for '{}' (minimum slots {}, {} removed item(s)).",
            self.app_user_model_id,
            outcome.minimum_slots,
            removed_items.len()
        );
        Ok(BeginSnapshot {
            minimum_slots: outcome.minimum_slots,
            removed_items,
        })
    }

    pub fn append_categories(&mut self, categories: &[JumpListCategory]) -> JumpListResult {
        if !self.expect_state(TransactionState::Began, "append_categories") {
            return JumpListResult::GenericError;
        }
        append_categories(categories, &mut self.destinations)
    }

    /// Replaces the Tasks category with `tasks`; any task that cannot be built fails the call.
    pub fn append_user_tasks(&mut self, tasks: &[JumpListItem]) -> bool {
        if !self.expect_state(TransactionState::Began, "append_user_tasks") {
            return false;
        }
        append_user_tasks(tasks, &mut self.destinations)
    }

    pub fn commit(&mut self) -> JumpListResult {
        if !self.expect_state(TransactionState::Began, "commit") {
            return JumpListResult::GenericError;
        }
        match self.destinations.commit_list() {
            Ok(()) => {
                self.state = TransactionState::Committed;
                log::debug!(
                    "JumpListTransaction: Committed Jump List for '{}'.",
                    self.app_user_model_id
                );
                JumpListResult::Success
            }
            Err(e) => {
                log::error!(
                    "JumpListTransaction: Failed to commit changes to Jump List for '{}': {e}",
                    self.app_user_model_id
                );
                JumpListResult::GenericError
            }
        }
    }

    pub fn abort(&mut self) -> JumpListResult {
        if !self.expect_state(TransactionState::Began, "abort") {
            return JumpListResult::GenericError;
        }
        self.state = TransactionState::Aborted;
        match self.destinations.abort_list() {
            Ok(()) => JumpListResult::Success,
            Err(e) => {
                log::error!(
                    "JumpListTransaction: Failed to abort Jump List for '{}': {e}",
                    self.app_user_model_id
                );
                JumpListResult::GenericError
            }
        }
    }

    /// Removes the whole jump list of the identity. Only valid before `begin`.
    pub fn delete(&mut self) -> JumpListResult {
        if !self.expect_state(TransactionState::Idle, "delete") {
            return JumpListResult::GenericError;
        }
        self.state = TransactionState::Deleted;
        match self
            .destinations
            .delete_list(self.app_user_model_id.as_str())
        {
            Ok(()) => {
                log::debug!(
                    "JumpListTransaction: Deleted Jump List for '{}'.",
                    self.app_user_model_id
                );
                JumpListResult::Success
            }
            Err(e) => {
                log::error!(
                    "JumpListTransaction: Failed to delete Jump List for '{}': {e}",
                    self.app_user_model_id
                );
                JumpListResult::GenericError
            }
        }
    }
}

impl<D: DestinationListOperations> Drop for JumpListTransaction<D> {
    fn drop(&mut self) {
        if self.state == TransactionState::Began {
            log::warn!(
                "JumpListTransaction: Transaction for '{}' dropped while open; aborting.",
                self.app_user_model_id
            );
            if let Err(e) = self.destinations.abort_list() {
                log::error!("JumpListTransaction: AbortList on drop failed: {e}");
            }
        }
    }
}

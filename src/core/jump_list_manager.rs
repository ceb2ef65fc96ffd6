/*
 * Entry point for callers that want to update or remove an application's jump list.
 * `JumpListManager` creates a fresh destination list per request, drives one
 * `JumpListTransaction` through it, and reduces everything that happens to a single
 * `JumpListResult`.
 *
 * An update hands the caller's category provider the minimum slot count and the
 * items the user removed since the last update, parses what the provider returns,
 * appends the categories, and commits. A provider result that does not parse aborts
 * the transaction, leaving the existing jump list untouched.
 * Unit tests are in `jump_list_manager_tests.rs`.
 */
use super::app_identity::AppUserModelId;
use super::category_parser::parse_categories;
use super::models::{JumpListItem, JumpListResult};
use super::native::DestinationListBackend;
use super::transaction::JumpListTransaction;
use serde_json::Value;

/// What the caller wants done with the jump list.
pub enum JumpListRequest<P>
where
    P: FnOnce(u32, &[JumpListItem]) -> Value,
{
    /// Remove the jump list of the application entirely.
    Delete,
    /// Rebuild the jump list from the categories the provider returns.
    Update(P),
}

pub struct JumpListManager<B: DestinationListBackend> {
    backend: B,
    app_user_model_id: AppUserModelId,
}

impl<B: DestinationListBackend> JumpListManager<B> {
    pub fn new(backend: B, app_user_model_id: AppUserModelId) -> Self {
        JumpListManager {
            backend,
            app_user_model_id,
        }
    }

    pub fn app_user_model_id(&self) -> &AppUserModelId {
        &self.app_user_model_id
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn open_transaction(&self) -> Option<JumpListTransaction<B::List>> {
        match self.backend.create_destination_list() {
            Ok(destinations) => Some(JumpListTransaction::new(
                destinations,
                self.app_user_model_id.clone(),
            )),
            Err(e) => {
                log::error!("JumpListManager: Failed to create destination list: {e}");
                None
            }
        }
    }

    pub fn set_jump_list<P>(&self, request: JumpListRequest<P>) -> JumpListResult
    where
        P: FnOnce(u32, &[JumpListItem]) -> Value,
    {
        let Some(mut transaction) = self.open_transaction() else {
            return JumpListResult::GenericError;
        };

        let provider = match request {
            JumpListRequest::Delete => return transaction.delete(),
            JumpListRequest::Update(provider) => provider,
        };

        let snapshot = match transaction.begin() {
            Ok(snapshot) => snapshot,
            Err(result) => return result,
        };

        let categories_value = provider(snapshot.minimum_slots, &snapshot.removed_items);
        let categories = match parse_categories(&categories_value) {
            Ok(categories) => categories,
            Err(e) => {
                log::error!(
                    "JumpListManager: Provider failed to return a valid category array: {e}"
                );
                transaction.abort();
                return JumpListResult::ArgumentError;
            }
        };

        let mut result = transaction.append_categories(&categories);
        if !transaction.commit().is_success() {
            // The category error, if any, says more about why the commit failed.
            if result == JumpListResult::Success {
                result = JumpListResult::GenericError;
            }
        }
        log::debug!(
            "JumpListManager: Jump List update for '{}' finished with '{result}'.",
            self.app_user_model_id
        );
        result
    }

    pub fn delete_jump_list(&self) -> JumpListResult {
        self.set_jump_list(JumpListRequest::Delete::<fn(u32, &[JumpListItem]) -> Value>)
    }

    /*
     * Replaces the jump list with a Tasks category holding `tasks`. All tasks must
     * be realized for the list to be committed; returns whether the commit went
     * through.
     */
    pub fn set_user_tasks(&self, tasks: &[JumpListItem]) -> bool {
        let Some(mut transaction) = self.open_transaction() else {
            return false;
        };
        if transaction.begin().is_err() {
            return false;
        }
        if !transaction.append_user_tasks(tasks) {
            transaction.abort();
            return false;
        }
        transaction.commit().is_success()
    }
}

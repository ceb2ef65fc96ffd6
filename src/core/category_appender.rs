/*
 * Appends the items of one category to a destination list.
 *
 * The shell only reports a single failure per call, so this function keeps going
 * after individual items fail and returns one result for the whole category. The
 * most specific error wins: a separator in a custom category or a mapped
 * `AppendCategory` status code is reported over the generic "something was lost"
 * result. Details about each failed item go to the log.
 */
use super::item_builders::{append_file, append_separator, append_task};
use super::models::{JumpListCategory, JumpListCategoryKind, JumpListItem, JumpListItemKind, JumpListResult};
use super::native::{DestinationListOperations, classify_custom_category_failure};

pub fn append_category<D: DestinationListOperations>(
    category: &JumpListCategory,
    destinations: &mut D,
) -> JumpListResult {
    if category.items.is_empty() {
        return JumpListResult::Success;
    }

    if matches!(
        category.kind,
        JumpListCategoryKind::Frequent | JumpListCategoryKind::Recent
    ) {
        log::warn!(
            "CategoryAppender: Ignoring {} item(s) of a shell-managed {:?} category.",
            category.items.len(),
            category.kind
        );
        return JumpListResult::Success;
    }

    let mut collection = match destinations.create_object_collection() {
        Ok(collection) => collection,
        Err(e) => {
            log::error!("CategoryAppender: Failed to create object collection: {e}");
            return JumpListResult::GenericError;
        }
    };

    let mut result = JumpListResult::Success;
    let mut appended_count = 0usize;
    for item in &category.items {
        let outcome = match item.kind {
            JumpListItemKind::Task => append_task(&*destinations, item, &mut collection),
            JumpListItemKind::Separator => {
                if category.kind != JumpListCategoryKind::Tasks {
                    log::error!(
                        "CategoryAppender: Can't append separator to Jump List category '{}'. Separators are only allowed in the standard 'Tasks' category.",
                        category.name_or_empty()
                    );
                    result = JumpListResult::CustomCategorySeparatorError;
                    continue;
                }
                append_separator(&*destinations, &mut collection)
            }
            JumpListItemKind::File => append_file(&*destinations, item, &mut collection),
        };

        match outcome {
            Ok(()) => appended_count += 1,
            Err(e) => log::error!(
                "CategoryAppender: Failed to append {} to Jump List: {e}",
                item.display_label()
            ),
        }
    }

    if appended_count == 0 {
        return if result == JumpListResult::Success {
            JumpListResult::GenericError
        } else {
            result
        };
    }

    if appended_count < category.items.len() && result == JumpListResult::Success {
        result = JumpListResult::GenericError;
    }
    log::debug!(
        "CategoryAppender: Appended {appended_count} of {} item(s) to category '{}'.",
        category.items.len(),
        category.name_or_empty()
    );

    if category.kind == JumpListCategoryKind::Tasks {
        if let Err(e) = destinations.add_user_tasks(&collection) {
            log::error!(
                "CategoryAppender: Failed to append items to the standard Tasks category: {e}"
            );
            if result == JumpListResult::Success {
                result = JumpListResult::GenericError;
            }
        }
        return result;
    }

    let name = category.name_or_empty();
    if let Err(e) = destinations.append_category(name, &collection) {
        match classify_custom_category_failure(e.code) {
            JumpListResult::GenericError => {
                log::error!(
                    "CategoryAppender: Failed to append custom category '{name}' to Jump List: {e}"
                );
                if result == JumpListResult::Success {
                    result = JumpListResult::GenericError;
                }
            }
            specific => {
                log::error!(
                    "CategoryAppender: Failed to append custom category '{name}' to Jump List ({specific}): {e}"
                );
                result = specific;
            }
        }
    }
    result
}

/*
 * Replaces the standard Tasks category with `tasks`, all or nothing. Unlike
 * `append_category`, any item that cannot be realized fails the whole call, and a
 * failing `AddUserTasks` is tolerated because the shell rejects an empty task list.
 */
pub fn append_user_tasks<D: DestinationListOperations>(
    tasks: &[JumpListItem],
    destinations: &mut D,
) -> bool {
    let mut collection = match destinations.create_object_collection() {
        Ok(collection) => collection,
        Err(e) => {
            log::error!("CategoryAppender: Failed to create object collection for user tasks: {e}");
            return false;
        }
    };

    for task in tasks {
        if task.kind != JumpListItemKind::Task {
            log::error!(
                "CategoryAppender: User tasks may only contain tasks, got {}.",
                task.display_label()
            );
            return false;
        }
        if let Err(e) = append_task(&*destinations, task, &mut collection) {
            log::error!(
                "CategoryAppender: Failed to append user {}: {e}",
                task.display_label()
            );
            return false;
        }
    }

    if let Err(e) = destinations.add_user_tasks(&collection) {
        log::debug!("CategoryAppender: AddUserTasks failed for {} task(s): {e}", tasks.len());
    }
    true
}

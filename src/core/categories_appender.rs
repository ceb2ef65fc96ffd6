/*
 * Appends an ordered list of categories to a destination list and folds the
 * per-category outcomes into one result. Tasks and custom categories go through
 * `append_category`; the frequent and recent categories are shell-managed and only
 * need to be activated.
 */
use super::category_appender::append_category;
use super::models::{JumpListCategory, JumpListCategoryKind, JumpListResult};
use super::native::{DestinationListOperations, KnownCategory};

/// Keeps the first failure, except that any failure replaces a recorded `GenericError`.
pub fn fold_result(current: JumpListResult, latest: JumpListResult) -> JumpListResult {
    let replaceable = matches!(
        current,
        JumpListResult::Success | JumpListResult::GenericError
    );
    if replaceable && latest != JumpListResult::Success {
        latest
    } else {
        current
    }
}

pub fn append_categories<D: DestinationListOperations>(
    categories: &[JumpListCategory],
    destinations: &mut D,
) -> JumpListResult {
    let mut result = JumpListResult::Success;
    for category in categories {
        let latest = match category.kind {
            JumpListCategoryKind::Tasks | JumpListCategoryKind::Custom => {
                append_category(category, destinations)
            }
            JumpListCategoryKind::Recent => append_known(destinations, KnownCategory::Recent),
            JumpListCategoryKind::Frequent => {
                append_known(destinations, KnownCategory::Frequent)
            }
        };
        result = fold_result(result, latest);
    }
    log::debug!(
        "CategoriesAppender: Processed {} categories, result '{result}'.",
        categories.len()
    );
    result
}

fn append_known<D: DestinationListOperations>(
    destinations: &mut D,
    category: KnownCategory,
) -> JumpListResult {
    match destinations.append_known_category(category) {
        Ok(()) => JumpListResult::Success,
        Err(e) => {
            log::error!("CategoriesAppender: Failed to append {category:?} category to Jump List: {e}");
            JumpListResult::GenericError
        }
    }
}

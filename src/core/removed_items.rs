/*
 * Converts the objects the shell reports as removed by the user since the last
 * update back into jump list items, so the caller can avoid adding them again.
 * Shell items become file entries; shell links become tasks with as much metadata
 * as the link still carries.
 */
use super::models::JumpListItem;
use super::native::{RemovedObject, ShellItemOperations, ShellLinkOperations};

pub fn convert_removed_items<L, I>(removed: Vec<RemovedObject<L, I>>) -> Vec<JumpListItem>
where
    L: ShellLinkOperations,
    I: ShellItemOperations,
{
    let total = removed.len();
    let items: Vec<JumpListItem> = removed
        .into_iter()
        .filter_map(|object| match object {
            RemovedObject::File(shell_item) => match shell_item.file_system_path() {
                Ok(path) if !path.as_os_str().is_empty() => Some(JumpListItem::file(path)),
                Ok(_) => {
                    log::warn!("RemovedItems: Skipping removed file with an empty path.");
                    None
                }
                Err(e) => {
                    log::warn!("RemovedItems: Could not resolve path of removed file: {e}");
                    None
                }
            },
            RemovedObject::Link(link) => convert_shell_link(&link),
            RemovedObject::Unrecognized => {
                log::debug!("RemovedItems: Skipping removed object of unknown type.");
                None
            }
        })
        .collect();
    log::debug!(
        "RemovedItems: Converted {} of {total} removed object(s).",
        items.len()
    );
    items
}

fn convert_shell_link<L: ShellLinkOperations>(link: &L) -> Option<JumpListItem> {
    let path = match link.path() {
        Ok(path) => path,
        Err(e) => {
            log::warn!("RemovedItems: Could not read path of removed task: {e}");
            return None;
        }
    };

    let title = link.title().ok().flatten().unwrap_or_default();
    let mut item = JumpListItem::task(path, title)
        .with_arguments(link.arguments().ok().flatten().unwrap_or_default())
        .with_description(link.description().unwrap_or_default());

    if let Ok((icon_path, icon_index)) = link.icon_location() {
        if !icon_path.as_os_str().is_empty() {
            item = item.with_icon(icon_path, icon_index);
        }
    }
    Some(item)
}

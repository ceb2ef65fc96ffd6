/*
 * Realizes single jump list items as native objects inside an object collection.
 * Tasks and separators become shell links; files become shell items. A builder
 * either adds exactly one object to the collection or leaves it untouched and
 * returns the first native failure, which the category appender tallies and logs.
 */
use super::models::JumpListItem;
use super::native::{ObjectCollectionOperations, Result, ShellLinkOperations, ShellObjectFactory};

pub fn append_task<F: ShellObjectFactory>(
    factory: &F,
    item: &JumpListItem,
    collection: &mut F::Collection,
) -> Result<()> {
    let mut link = factory.create_shell_link()?;
    link.set_path(&item.path)?;
    link.set_arguments(&item.arguments)?;
    link.set_description(&item.description)?;

    if let Some(icon_path) = item
        .icon_path
        .as_deref()
        .filter(|path| !path.as_os_str().is_empty())
    {
        link.set_icon_location(icon_path, item.icon_index)?;
    }

    link.set_title(&item.title)?;
    collection.add_link(link)
}

pub fn append_separator<F: ShellObjectFactory>(
    factory: &F,
    collection: &mut F::Collection,
) -> Result<()> {
    let mut link = factory.create_shell_link()?;
    link.mark_as_separator()?;
    collection.add_link(link)
}

pub fn append_file<F: ShellObjectFactory>(
    factory: &F,
    item: &JumpListItem,
    collection: &mut F::Collection,
) -> Result<()> {
    let shell_item = factory.create_shell_item(&item.path)?;
    collection.add_item(shell_item)
}

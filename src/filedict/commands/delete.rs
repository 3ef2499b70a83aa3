use crate::collection::DictionaryCollection;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{FiledictError, Result};

/// Deletes `name` once `confirmed`. An unconfirmed delete is a no-op, not an error.
pub fn run<T>(
    collection: &mut DictionaryCollection<T>,
    name: &str,
    confirmed: bool,
) -> Result<CmdResult> {
    if collection.get_dictionary(name).is_none() {
        return Err(FiledictError::DictionaryNotFound(name.to_string()));
    }

    if !confirmed {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Operation cancelled.")));
    }

    let message = if collection.delete_dictionary(name)? {
        CmdMessage::success(format!("Dictionary '{}' deleted successfully.", name))
    } else {
        CmdMessage::error(format!("Failed to delete dictionary '{}'.", name))
    };
    Ok(CmdResult::default().with_message(message))
}

use crate::collection::{validate_name, DictionaryCollection};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn run<T>(collection: &mut DictionaryCollection<T>, name: &str) -> Result<CmdResult>
where
    T: Serialize + DeserializeOwned + Clone,
{
    let name = name.trim();
    validate_name(name)?;
    let dict = collection.create_dictionary(name)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Dictionary '{}' created at {}",
        name,
        dict.path().display()
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FiledictError;
    use serde_json::Value;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DictionaryCollection<Value>) {
        let dir = TempDir::new().unwrap();
        let mut collection = DictionaryCollection::new(dir.path());
        collection.init().unwrap();
        (dir, collection)
    }

    #[test]
    fn creates_trimmed_name() {
        let (_dir, mut collection) = setup();
        let result = run(&mut collection, "  users ").unwrap();

        assert!(collection.get_dictionary("users").is_some());
        assert!(result.messages[0].content.contains("'users' created"));
    }

    #[test]
    fn rejects_invalid_names_before_touching_disk() {
        let (dir, mut collection) = setup();

        assert!(matches!(
            run(&mut collection, "../escape"),
            Err(FiledictError::InvalidName(_))
        ));
        assert!(matches!(
            run(&mut collection, ""),
            Err(FiledictError::InvalidName(_))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn duplicate_name_is_an_error() {
        let (_dir, mut collection) = setup();
        run(&mut collection, "users").unwrap();

        assert!(matches!(
            run(&mut collection, "users"),
            Err(FiledictError::DuplicateName(_))
        ));
    }
}

use crate::collection::DictionaryCollection;
use crate::commands::{CmdResult, DictionarySummary};
use crate::error::Result;

/// Summaries of every dictionary, least recently modified first.
pub fn run<T>(collection: &DictionaryCollection<T>) -> Result<CmdResult> {
    let summaries = collection
        .names_by_recency()?
        .into_iter()
        .map(|(name, modified)| {
            let records = collection
                .get_dictionary(&name)
                .map(|d| d.len())
                .unwrap_or_default();
            DictionarySummary {
                name,
                records,
                modified,
            }
        })
        .collect();

    Ok(CmdResult::default().with_dictionaries(summaries))
}

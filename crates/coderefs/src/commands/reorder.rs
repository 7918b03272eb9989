use crate::commands::{CmdMessage, CmdResult};
use crate::store::backend::StorageBackend;
use crate::store::ReferenceStore;

/// Applies a display order coming from the UI (e.g. after a drag and drop).
/// The resulting order is returned as the listed records.
pub fn run<B: StorageBackend, I: AsRef<str>>(store: &mut ReferenceStore<B>, ids: &[I]) -> CmdResult {
    let unknown = ids
        .iter()
        .filter(|id| store.get(id.as_ref()).is_none())
        .count();
    let update = store.reorder(ids);
    let mut result = CmdResult::default().with_listed_records(store.list());
    result.note_durability(&update);
    if unknown > 0 {
        result.add_message(CmdMessage::info(format!(
            "Ignored {} unknown id(s) while reordering",
            unknown
        )));
    }
    result
}

use crate::commands::{CmdMessage, CmdResult};
use crate::store::backend::StorageBackend;
use crate::store::ReferenceStore;

pub fn run<B: StorageBackend>(store: &mut ReferenceStore<B>, id: &str) -> CmdResult {
    let removed = store.get(id).cloned();
    let update = store.delete(id);
    let mut result = CmdResult::default();
    result.note_durability(&update);

    match removed {
        Some(record) => {
            result.add_message(CmdMessage::success(format!(
                "Reference deleted: {}",
                record.title
            )));
            result.affected_records.push(record);
        }
        None => result.add_message(CmdMessage::info(format!("No reference with id {}", id))),
    }
    result
}

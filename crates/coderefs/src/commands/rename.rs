use crate::commands::{CmdMessage, CmdResult};
use crate::store::backend::StorageBackend;
use crate::store::ReferenceStore;

pub fn run<B: StorageBackend>(store: &mut ReferenceStore<B>, id: &str, title: String) -> CmdResult {
    let update = store.rename(id, title);
    let mut result = CmdResult::default();
    result.note_durability(&update);

    match update.into_value() {
        Some(record) => {
            result.add_message(CmdMessage::success(format!(
                "Reference renamed: {}",
                record.title
            )));
            result.affected_records.push(record);
        }
        None => result.add_message(CmdMessage::info(format!("No reference with id {}", id))),
    }
    result
}

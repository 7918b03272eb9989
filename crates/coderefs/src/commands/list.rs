use crate::commands::CmdResult;
use crate::store::backend::StorageBackend;
use crate::store::ReferenceStore;

pub fn run<B: StorageBackend>(store: &ReferenceStore<B>) -> CmdResult {
    CmdResult::default().with_listed_records(store.list())
}

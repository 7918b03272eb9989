use super::mem_backend::MemBackend;
use super::reference_store::ReferenceStore;

pub type InMemoryStore = ReferenceStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        ReferenceStore::open(MemBackend::new()).0
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::ReferenceKind;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_comments(mut self, count: usize) -> Self {
            for i in 0..count {
                self.store
                    .add(ReferenceKind::Comment, format!("Note {}", i + 1), None, None);
            }
            self
        }

        pub fn with_file(mut self, title: &str, path: &str) -> Self {
            self.store
                .add(ReferenceKind::File, title.to_string(), Some(path.to_string()), None);
            self
        }

        pub fn with_file_snippet(mut self, title: &str, path: &str, snippet: &str) -> Self {
            self.store.add(
                ReferenceKind::FileSnippet,
                title.to_string(),
                Some(path.to_string()),
                Some(snippet.to_string()),
            );
            self
        }

        pub fn with_global_snippet(mut self, title: &str, snippet: &str) -> Self {
            self.store.add(
                ReferenceKind::GlobalSnippet,
                title.to_string(),
                None,
                Some(snippet.to_string()),
            );
            self
        }
    }
}

use std::{cell::RefCell, collections::HashSet};

use log::debug;

use crate::core::item::{DuplicateLookup, LookupResult};

/// Codes seen so far in the current run.
///
/// Backs duplicate detection in dry-run mode, where nothing reaches the
/// durable store and a repeated code can only be caught in memory.
#[derive(Default)]
pub struct InMemoryCodeRegistry {
    codes: RefCell<HashSet<String>>,
}

impl InMemoryCodeRegistry {
    pub fn len(&self) -> usize {
        self.codes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.borrow().is_empty()
    }
}

impl DuplicateLookup for InMemoryCodeRegistry {
    fn exists(&self, code: &str) -> LookupResult<bool> {
        Ok(self.codes.borrow().contains(code))
    }

    fn register(&self, code: &str) -> LookupResult<()> {
        debug!("Registering code {} for this run", code);
        self.codes.borrow_mut().insert(code.to_owned());
        Ok(())
    }
}

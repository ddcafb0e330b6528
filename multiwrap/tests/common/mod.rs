#![allow(dead_code)]

use multiwrap::{Hierarchy, Keyword, Method, SharedHierarchy, TableEngine};
use std::{
    io,
    sync::{Arc, Mutex},
};

// ============================================================================
// Keys and Handlers
// ============================================================================

pub type Sound = Method<(), &'static str>;

pub fn kw(s: &str) -> Keyword {
    Keyword::new(s)
}

pub fn sound(value: &'static str) -> Sound {
    Method::new(move |_| value)
}

/// `:animal/dog` isa `:animal/mammal` isa `:animal/any`, and `:animal/dog`
/// isa `:role/pet`.
pub fn zoo_hierarchy() -> SharedHierarchy<Keyword> {
    let mut h = Hierarchy::new();
    h.derive(kw("animal/dog"), kw("animal/mammal")).unwrap();
    h.derive(kw("animal/mammal"), kw("animal/any")).unwrap();
    h.derive(kw("animal/dog"), kw("role/pet")).unwrap();
    h.shared()
}

pub fn zoo_engine(name: &str) -> TableEngine<Keyword, Sound> {
    TableEngine::builder()
        .name(name)
        .hierarchy(zoo_hierarchy())
        .build()
}

// ============================================================================
// Log Capture
// ============================================================================

/// An in-memory writer for `tracing-subscriber` output.
#[derive(Clone, Default)]
pub struct SharedBuf(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

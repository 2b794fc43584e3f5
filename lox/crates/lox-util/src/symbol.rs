//! String interning for identifier and keyword text.
//!
//! Identifiers appear repeatedly across a program (a loop variable is
//! referenced on every iteration, a function name at every call site).
//! Interning stores each distinct string once and hands out a cheap,
//! `Copy` handle in its place, so the resolver's scope maps and the
//! environment's binding maps can hash and compare names in O(1)
//! instead of re-hashing the underlying bytes every time.

use once_cell::sync::Lazy;
use std::fmt;
use std::sync::RwLock;

static INTERNER: Lazy<RwLock<Interner>> = Lazy::new(|| RwLock::new(Interner::new()));

struct Interner {
    strings: Vec<&'static str>,
    lookup: rustc_hash::FxHashMap<&'static str, u32>,
}

impl Interner {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            lookup: rustc_hash::FxHashMap::default(),
        }
    }

    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.lookup.get(s) {
            return id;
        }
        let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
        let id = self.strings.len() as u32;
        self.strings.push(leaked);
        self.lookup.insert(leaked, id);
        id
    }

    fn resolve(&self, id: u32) -> &'static str {
        self.strings[id as usize]
    }
}

/// An interned identifier. Cheap to copy, compare, and hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `text`, returning a handle to the single stored copy.
    pub fn intern(text: &str) -> Self {
        Symbol(INTERNER.write().unwrap().intern(text))
    }

    /// The original string this symbol was interned from.
    pub fn as_str(self) -> &'static str {
        INTERNER.read().unwrap().resolve(self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_the_same_symbol() {
        let a = Symbol::intern("clock");
        let b = Symbol::intern("clock");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "clock");
    }

    #[test]
    fn distinct_text_interns_to_distinct_symbols() {
        let a = Symbol::intern("a");
        let b = Symbol::intern("b");
        assert_ne!(a, b);
    }
}

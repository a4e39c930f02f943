//! Symbol: a key compared by identity rather than by value.

use core::fmt;
use std::rc::Rc;

/// An identity key. Every call to [`Symbol::new`] mints a distinct symbol;
/// clones share the identity of their source. Two symbols with the same
/// description hash to the same bucket but are different keys.
#[derive(Clone)]
pub struct Symbol(Rc<str>);

impl Symbol {
    pub fn new(description: &str) -> Self {
        Symbol(Rc::from(description))
    }

    pub fn description(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})@{:p}", &*self.0, Rc::as_ptr(&self.0))
    }
}

//! lox-util — shared plumbing for the Lox pipeline crates.
//!
//! Every stage (scanner, parser, resolver, evaluator, driver) shares two
//! things from here: interned identifier text ([`Symbol`]) and a common
//! diagnostic sink ([`Handler`]).

mod diagnostic;
mod numfmt;
mod symbol;

pub use diagnostic::{Diagnostic, Handler, Where};
pub use numfmt::format_number_verbose;
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};

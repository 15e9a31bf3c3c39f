//! Additional, more convenient, functionality, which leverages the Rust
//! standard library, layered on top of [`curtail_core`].
//!
//! This crate:
//!
//! * Re-exports all of [`curtail_core`].
//!
//! * Provides the [`FxMemoTable`], a [`MemoTable`] that uses a fast hashing
//! `HashMap`, which is usually faster than the core crate's `BTreeMap`-based
//! one for large inputs.
//!
//! * Provides a [`run_parser`] that uses the `FxMemoTable`, shadowing the core
//! crate's.
//!
//! * Provides the [`pattern`] terminal, which matches regular expressions at
//! the current position of `str` inputs.
//!
//! Unlike [`curtail_core`], this crate's purpose mostly is to provide premade
//! implementations intended for ready use.  So, instead of placing such items
//! in sub-modules named `premade`, they are placed at the top of their
//! respective modules, including for the premade items re-exported from
//! `curtail_core`.
//!
//! [`curtail_core`]: ../curtail_core/index.html
//! [`FxMemoTable`]: state/struct.FxMemoTable.html
//! [`MemoTable`]: ../curtail_core/trait.MemoTable.html
//! [`run_parser`]: fn.run_parser.html
//! [`pattern`]: terminal/fn.pattern.html

// Re-export everything from the core crate. (Except items shadowed by ours,
// which are re-exported elsewhere.)
#[doc(no_inline)]
pub use curtail_core::*;

// The below modules shadow those of `curtail_core` but re-export everything
// from those in addition to providing some of their own items.

/// Memo tables and parse state, including ones that use the `std` library.
/// Also re-exports the core crate's module and premades.
pub mod state {
    #[doc(no_inline)]
    pub use curtail_core::state::{*, premade::*};

    mod fx_memo;
    pub use fx_memo::FxMemoTable;
}

/// Primitive parsers, including ones that use the `std` library.  Also
/// re-exports the core crate's module.
pub mod terminal {
    #[doc(no_inline)]
    pub use curtail_core::terminal::*;

    mod pattern;
    pub use pattern::{pattern, PatternMatch};
}

mod driver;
pub use driver::run_parser;

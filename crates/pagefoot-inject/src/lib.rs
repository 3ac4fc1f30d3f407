//! Footer injection for static HTML pages.
//!
//! Inserts a fixed style block and footer markup into existing pages, skipping
//! pages that already carry the footer and backing up every page it changes.

pub mod discover;
pub mod fragment;
pub mod injector;
pub mod splice;

pub use discover::{discover_pages, DiscoverError};
pub use fragment::{Fragment, FragmentError, DEFAULT_SENTINEL, FOOTER_MARKUP, FOOTER_STYLE};
pub use injector::{
    FileOutcome, InjectError, InjectOptions, Injector, OptionsError, PageReport, PageStatus,
    RunSummary, DEFAULT_BACKUP_SUFFIX,
};
pub use splice::{splice, PartialPolicy, SpliceError, Spliced};

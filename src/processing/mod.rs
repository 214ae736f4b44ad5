//! Section extraction and item normalization

pub mod locator;
pub mod splitter;
pub mod normalizer;
pub mod record;

pub use locator::{locate_section, BlankLineOrHeader, Section, SectionBoundary, SectionLocator};
pub use normalizer::{CanonicalTable, Normalizer};
pub use record::{Category, HeaderTables, ResumeRecord, ResumeRecordBuilder};
pub use splitter::{ItemSplitter, SplitOptions};

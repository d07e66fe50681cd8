// Adapters layer: concrete implementations for external systems (document readers).

pub mod readers;

pub use readers::{reader_for_path, DocxReader, PlainTextReader, SUPPORTED_EXTENSIONS};

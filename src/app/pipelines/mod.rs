pub mod document_import;

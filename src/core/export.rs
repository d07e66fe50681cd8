use crate::core::ledger::SectionLedger;
use crate::utils::error::{ReportError, Result};

/// Renders the ledger as CSV with columns `order,id,title,content`.
pub fn sections_to_csv(ledger: &SectionLedger) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["order", "id", "title", "content"])?;

    for section in ledger.to_ordered_list() {
        writer.write_record([
            section.order().to_string(),
            section.id().to_string(),
            section.title().to_string(),
            section.content().to_string(),
        ])?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| ReportError::IoError(e.into_error()))?;
    String::from_utf8(data)
        .map_err(|e| ReportError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

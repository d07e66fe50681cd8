use crate::domain::model::Report;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// 讀取報告；檔案不存在時建立一份新的空報告
pub async fn load_or_new<S: Storage>(storage: &S, path: &str, title: &str) -> Result<Report> {
    if !storage.exists(path).await {
        tracing::info!("📄 Report '{}' not found, starting a new one", path);
        return Ok(Report::new(title));
    }

    let data = storage.read_file(path).await?;
    let report: Report = serde_json::from_slice(&data)?;
    tracing::debug!(
        "Loaded report '{}' with {} section(s)",
        report.title,
        report.sections.len()
    );
    Ok(report)
}

pub async fn save<S: Storage>(storage: &S, path: &str, report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    storage.write_file(path, json.as_bytes()).await?;
    tracing::debug!("Saved report ({} bytes) to '{}'", json.len(), path);
    Ok(())
}

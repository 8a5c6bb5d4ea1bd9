//! `export`: download the backend's export file.

use crate::RequestArgs;
use chrono::Local;
use log::info;
use sip_core::client::BackendClient;
use sip_core::source::ExportFormat;

/// POST the request to the export endpoint and save the returned bytes
/// unchanged.
pub async fn run_export(
    base_url: &str,
    args: &RequestArgs,
    format: ExportFormat,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let request = args
        .to_form()
        .assemble(today)
        .map_err(|e| anyhow::anyhow!("Invalid request:\n{}", e))?;

    let client = BackendClient::new(base_url)?;
    let bytes = client
        .export(&request, format)
        .await
        .map_err(|e| anyhow::anyhow!("Download failed: {}", e.user_message()))?;
    if bytes.is_empty() {
        anyhow::bail!("Download failed: the server returned an empty file");
    }

    let path = output
        .map(str::to_string)
        .unwrap_or_else(|| format.file_name(request.data_source, today));
    std::fs::write(&path, &bytes)?;
    info!("Saved {} bytes to {}", bytes.len(), path);
    println!("{}", path);
    Ok(())
}

//! Newline-delimited JSON transport: one [`BridgeRequest`] per input line,
//! one [`BridgeResponse`] per output line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info};

use transassist_protocols::{BridgeRequest, BridgeResponse};

use crate::service::BackgroundService;

/// Serve requests until `reader` is exhausted. Blank lines are skipped;
/// a line that is not a request gets an error response. Returns the
/// number of responses written.
pub async fn serve_lines<R, W>(service: &BackgroundService, reader: R, mut writer: W) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut answered = 0;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("Bridge request: {}", line.chars().take(200).collect::<String>());

        let response = match serde_json::from_str::<BridgeRequest>(line) {
            Ok(request) => service.handle(request).await,
            Err(e) => {
                error!("Failed to parse bridge request: {}", e);
                BridgeResponse::Error {
                    error: format!("Invalid request: {e}"),
                    kind: None,
                }
            }
        };

        let mut out = serde_json::to_string(&response)?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
        answered += 1;
    }
    info!("Bridge input closed after {} responses", answered);
    Ok(answered)
}

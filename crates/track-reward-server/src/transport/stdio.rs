//! stdio transport for line-delimited JSON-RPC

use crate::RewardServer;
use crate::methods::handle_request;
use crate::rpc::{Request, RequestId, Response};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};
use track_reward_core::{Result, RewardError, error_codes};

/// Run the server on stdin/stdout
pub async fn run(server: RewardServer) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    info!("Track reward server starting on stdio");
    serve(&server, reader, writer).await
}

/// Serve requests from `reader` until EOF, writing one response per line
pub async fn serve<R, W>(server: &RewardServer, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| RewardError::Io(format!("Failed to read stdin: {}", e)))?;

        if bytes_read == 0 {
            info!("Client disconnected (EOF)");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received: {}", trimmed);

        let response = match serde_json::from_str::<Request>(trimmed) {
            Ok(request) => handle_request(&request, server).await,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                Response::error(
                    RequestId::Null,
                    error_codes::PARSE_ERROR,
                    format!("Parse error: {}", e),
                )
            }
        };

        let response_json = serde_json::to_string(&response)?;
        debug!("Sending: {}", response_json);

        writer
            .write_all(response_json.as_bytes())
            .await
            .map_err(|e| RewardError::Io(format!("Failed to write stdout: {}", e)))?;
        writer
            .write_all(b"\n")
            .await
            .map_err(|e| RewardError::Io(format!("Failed to write newline: {}", e)))?;
        writer
            .flush()
            .await
            .map_err(|e| RewardError::Io(format!("Failed to flush stdout: {}", e)))?;
    }

    Ok(())
}

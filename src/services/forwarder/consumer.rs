use super::notification::NotificationReceiver;
use futures::StreamExt;
use log::{debug, warn};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes every received notification as a JSON line until all senders are gone
pub async fn emit<W: AsyncWrite + Unpin>(mut receiver: NotificationReceiver, mut writer: W) {
    while let Some(notification) = receiver.next().await {
        let line = match serde_json::to_string(&notification) {
            Ok(line) => line + "\n",
            Err(e) => {
                warn!("Unable to encode notification {:?}: {}", notification, e);
                continue;
            }
        };

        if let Err(e) = write_line(&mut writer, &line).await {
            warn!("Unable to emit notification {}: {}", line.trim_end(), e);
        }
    }

    debug!("Notification channel closed");
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

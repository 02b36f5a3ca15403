//! TCP トランスポート（`tokio-transport` feature）
//!
//! 1 接続 1 タスク。クライアントは 1 行に 1 つの JSON リクエストを送り、
//! サーバは 1 行に 1 つの JSON レスポンスを返す。

use std::future::Future;
use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::Instrument;

use crate::error::ApiError;
use crate::handler::handle_line;
use crate::protocol::Response;
use crate::registry::MatchRegistry;

/// 1 リクエスト行の上限バイト数
pub const MAX_LINE_BYTES: usize = 16 * 1024;

/// `shutdown` が完了するまで接続を受け付ける
pub async fn serve(
    listener: TcpListener,
    registry: Arc<MatchRegistry>,
    shutdown: impl Future<Output = ()>,
) -> io::Result<()> {
    let mut shutdown = std::pin::pin!(shutdown);
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("shutdown requested, no longer accepting connections");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        tracing::warn!("accept failed: {e}");
                        continue;
                    }
                };
                metrics::counter!("rdraughts_connections_total").increment(1);
                let registry = Arc::clone(&registry);
                let span = tracing::info_span!("conn", %peer);
                tokio::spawn(
                    async move {
                        tracing::debug!("connected");
                        if let Err(e) = handle_connection(stream, &registry).await {
                            tracing::debug!("connection error: {e}");
                        }
                        tracing::debug!("disconnected");
                    }
                    .instrument(span),
                );
            }
        }
    }
}

/// 1 接続分のリクエスト / レスポンスループ。クライアントが切断したら戻る
pub async fn handle_connection(stream: TcpStream, registry: &MatchRegistry) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        let n = (&mut reader).take(MAX_LINE_BYTES as u64 + 1).read_until(b'\n', &mut line).await?;
        if n == 0 {
            return Ok(());
        }
        if n > MAX_LINE_BYTES && line.last() != Some(&b'\n') {
            let err = ApiError::BadRequest(format!("request line exceeds {MAX_LINE_BYTES} bytes"));
            write_response(&mut writer, &Response::error(&err)).await?;
            discard_line(&mut reader).await?;
            continue;
        }
        let request = match std::str::from_utf8(&line) {
            Ok(text) => text.trim(),
            Err(e) => {
                let err = ApiError::BadRequest(format!("request line is not valid UTF-8: {e}"));
                write_response(&mut writer, &Response::error(&err)).await?;
                continue;
            }
        };
        if request.is_empty() {
            continue;
        }
        let response = handle_line(registry, request);
        write_response(&mut writer, &response).await?;
    }
}

async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> io::Result<()> {
    let mut out = response.to_line();
    out.push('\n');
    writer.write_all(out.as_bytes()).await?;
    writer.flush().await
}

/// 上限を超えた行の残りを改行まで読み捨てる
async fn discard_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> io::Result<()> {
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        if let Some(pos) = buf.iter().position(|&b| b == b'\n') {
            reader.consume(pos + 1);
            return Ok(());
        }
        let len = buf.len();
        reader.consume(len);
    }
}

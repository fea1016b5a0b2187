use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace, warn, Instrument};

use crate::config::ServerConfig;
use crate::error::ProtocolError;
use crate::logic;
use crate::protocol::request::{HeaderV2, MIN_PAYLOAD_LEN};
use crate::protocol::ResponseMessage;

/// Accepts connections forever, one task per connection.
/// A failing connection is logged and dropped without affecting the others.
pub async fn serve(listener: TcpListener, config: Arc<ServerConfig>) -> Result<()> {
    let addr = listener.local_addr().context("listener address")?;
    info!(%addr, "listening");

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("accept: {}", e);
                continue;
            }
        };

        let config = Arc::clone(&config);
        let span = tracing::info_span!("connection", %peer);
        tokio::spawn(
            async move {
                info!("accepted new connection");
                match handle_connection(stream, &config).await {
                    Ok(()) => info!("connection closed by peer"),
                    Err(e @ ProtocolError::UnsupportedApi(_)) => warn!("closing connection: {}", e),
                    Err(e) => error!("closing connection: {}", e),
                }
            }
            .instrument(span),
        );
    }
}

/// Serves sequential requests from one client until it closes the stream.
/// No frame is read before the response to the previous one is written.
pub async fn handle_connection<S>(mut stream: S, config: &ServerConfig) -> Result<(), ProtocolError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    while let Some(mut frame) = read_frame(&mut stream, config.max_frame_size).await? {
        trace!(frame = %hex::encode(&frame), "request frame");

        // https://kafka.apache.org/protocol.html#protocol_messages
        let header = HeaderV2::from_bytes(&mut frame)?;
        debug!(
            api_key = header.request_api_key,
            version = header.request_api_version,
            correlation_id = header.correlation_id,
            client_id = %header.client_id_lossy(),
            "request"
        );

        let resp = logic::process(&header, &mut frame, config)?;
        let resp_message = ResponseMessage::from_response(&*resp);

        stream.write_all(resp_message.as_bytes()).await?;
        stream.flush().await?;
        debug!(
            correlation_id = resp.correlation_id(),
            size = resp_message.as_bytes().len(),
            "response"
        );
    }

    Ok(())
}

/// Reads one size-prefixed frame and returns it with the size field still in front.
/// `None` means the peer closed the connection between frames.
pub async fn read_frame<R>(reader: &mut R, max_frame_size: usize) -> Result<Option<Bytes>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut msg_size_buf = [0u8; 4];
    let mut filled = 0;
    while filled < msg_size_buf.len() {
        let n = reader.read(&mut msg_size_buf[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(ProtocolError::MalformedFrame(format!(
                "stream ended after {filled} of 4 message size bytes"
            )));
        }
        filled += n;
    }

    let msg_size = i32::from_be_bytes(msg_size_buf);
    if msg_size < MIN_PAYLOAD_LEN as i32 {
        return Err(ProtocolError::MalformedFrame(format!(
            "message size {msg_size} is below the {MIN_PAYLOAD_LEN} byte request header"
        )));
    }
    let msg_size = msg_size as usize;
    if msg_size > max_frame_size {
        return Err(ProtocolError::MalformedFrame(format!(
            "message size {msg_size} exceeds {max_frame_size}"
        )));
    }

    let mut msg = BytesMut::with_capacity(4 + msg_size);
    msg.put_slice(&msg_size_buf);
    msg.resize(4 + msg_size, 0);
    match reader.read_exact(&mut msg[4..]).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ProtocolError::MalformedFrame(format!(
                "stream ended before {msg_size} message bytes were read"
            )))
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Some(msg.freeze()))
}

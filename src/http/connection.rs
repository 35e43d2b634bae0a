use std::io;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, BufReader, ReadBuf};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_native_tls::TlsStream;
use tracing::debug;

use super::fault::Fault;
use super::tls::TlsSettings;
use crate::error::HttpError;

const READ_BUFFER_CAPACITY: usize = 8 * 1024;

/// Plain TCP or TLS-over-TCP byte stream.
pub(crate) enum Transport {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl AsyncRead for Transport {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Transport::Plain(stream) => Pin::new(stream).poll_read(cx, buf),
            Transport::Tls(stream) => Pin::new(stream.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for Transport {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            Transport::Plain(stream) => Pin::new(stream).poll_write(cx, buf),
            Transport::Tls(stream) => Pin::new(stream.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Transport::Plain(stream) => Pin::new(stream).poll_flush(cx),
            Transport::Tls(stream) => Pin::new(stream.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Transport::Plain(stream) => Pin::new(stream).poll_shutdown(cx),
            Transport::Tls(stream) => Pin::new(stream.as_mut()).poll_shutdown(cx),
        }
    }
}

/// The buffered reader lives as long as the connection, so bytes read past
/// one response stay available to the next.
pub(crate) type Connection = BufReader<Transport>;

/// Owns at most one live connection for a worker.
pub(crate) struct ConnectionManager {
    addr: SocketAddr,
    tls: Option<TlsSettings>,
    connect_timeout: Duration,
    current: Option<Connection>,
    opened: u64,
}

impl ConnectionManager {
    pub(crate) const fn new(
        addr: SocketAddr,
        tls: Option<TlsSettings>,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            addr,
            tls,
            connect_timeout,
            current: None,
            opened: 0,
        }
    }

    /// Connections established so far, reconnects included.
    pub(crate) const fn opened(&self) -> u64 {
        self.opened
    }

    /// Returns the live connection, dialing a new one when none is held.
    pub(crate) async fn ensure_connection(&mut self) -> Result<&mut Connection, Fault> {
        if self.current.is_none() {
            let transport = self.open().await?;
            self.opened = self.opened.saturating_add(1);
            self.current = Some(BufReader::with_capacity(READ_BUFFER_CAPACITY, transport));
        }
        self.current
            .as_mut()
            .ok_or_else(|| Fault::connect(io::Error::from(io::ErrorKind::NotConnected)))
    }

    /// Drops the held connection, if any.
    pub(crate) fn teardown(&mut self) {
        if self.current.take().is_some() {
            debug!("Closed connection to {}", self.addr);
        }
    }

    async fn open(&self) -> Result<Transport, Fault> {
        let tcp = match timeout(self.connect_timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(err)) => return Err(Fault::connect(err)),
            Err(_) => return Err(Fault::Timeout),
        };
        if let Err(err) = tcp.set_nodelay(true) {
            debug!("Failed to set TCP_NODELAY on {}: {}", self.addr, err);
        }

        let Some(tls) = self.tls.as_ref() else {
            return Ok(Transport::Plain(tcp));
        };
        match timeout(self.connect_timeout, tls.connector.connect(&tls.domain, tcp)).await {
            Ok(Ok(stream)) => Ok(Transport::Tls(Box::new(stream))),
            Ok(Err(source)) => Err(Fault::Fatal(HttpError::TlsHandshake {
                domain: tls.domain.clone(),
                source,
            })),
            Err(_) => Err(Fault::Timeout),
        }
    }
}

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt};

use super::fault::Fault;
use crate::error::HttpError;

const LINE_CAPACITY: usize = 256;
/// Longest status or header line accepted, terminator included.
const MAX_LINE_BYTES: u64 = 8 * 1024;

/// Status of a response the server rejected outright.
const BAD_REQUEST: u64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedResponse {
    pub(crate) status: u64,
    pub(crate) keep_alive: bool,
    pub(crate) content_length: u64,
    /// Status line, header lines with terminators, and body.
    pub(crate) bytes: u64,
}

impl ParsedResponse {
    pub(crate) const fn is_error_status(&self) -> bool {
        self.status >= BAD_REQUEST
    }
}

enum Header {
    ContentLength(u64),
    Connection { keep_alive: bool },
    Other,
}

/// Reads one complete response from `reader` and discards its body.
///
/// Only `Content-Length` framing is understood; a response without it is
/// treated as having an empty body.
pub(crate) async fn read_response<R>(reader: &mut R) -> Result<ParsedResponse, Fault>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::with_capacity(LINE_CAPACITY);
    let mut bytes = read_line(reader, &mut line).await?;
    let status = parse_status_line(&line)?;

    let mut content_length = 0_u64;
    let mut keep_alive = true;
    loop {
        line.clear();
        let read = read_line(reader, &mut line).await?;
        bytes = bytes.saturating_add(read);
        if is_blank(&line) {
            break;
        }
        match parse_header(&line)? {
            Header::ContentLength(value) => content_length = value,
            Header::Connection { keep_alive: value } => keep_alive = value,
            Header::Other => {}
        }
    }

    drain_body(reader, content_length).await?;
    Ok(ParsedResponse {
        status,
        keep_alive,
        content_length,
        bytes: bytes.saturating_add(content_length),
    })
}

async fn read_line<R>(reader: &mut R, line: &mut Vec<u8>) -> Result<u64, Fault>
where
    R: AsyncBufRead + Unpin,
{
    let read = (&mut *reader)
        .take(MAX_LINE_BYTES)
        .read_until(b'\n', line)
        .await
        .map_err(Fault::read)?;
    let read = u64::try_from(read).unwrap_or(u64::MAX);
    if line.ends_with(b"\n") {
        return Ok(read);
    }
    if read >= MAX_LINE_BYTES {
        return Err(Fault::read(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("response line exceeds {} bytes", MAX_LINE_BYTES),
        )));
    }
    Err(Fault::read(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "connection closed before the response headers ended",
    )))
}

fn is_blank(line: &[u8]) -> bool {
    line == b"\r\n" || line == b"\n"
}

fn parse_status_line(line: &[u8]) -> Result<u64, Fault> {
    let text = String::from_utf8_lossy(line);
    let text = text.trim_end();
    let mut tokens = text.split_whitespace();
    let (Some(_version), Some(code), Some(_reason)) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(Fault::read(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("malformed status line '{}'", text),
        )));
    };

    let status = code
        .parse::<u64>()
        .map_err(|source| HttpError::InvalidStatusCode {
            line: text.to_owned(),
            source,
        })?;
    if status == BAD_REQUEST {
        return Err(HttpError::BadRequest {
            line: text.to_owned(),
        }
        .into());
    }
    Ok(status)
}

fn parse_header(line: &[u8]) -> Result<Header, Fault> {
    let text = String::from_utf8_lossy(line);
    let Some((name, value)) = text.split_once(':') else {
        return Ok(Header::Other);
    };
    let name = name.trim();
    let value = value.trim();

    if name.eq_ignore_ascii_case("content-length") {
        let length = value
            .parse::<u64>()
            .map_err(|source| HttpError::InvalidContentLength {
                value: value.to_owned(),
                source,
            })?;
        return Ok(Header::ContentLength(length));
    }
    if name.eq_ignore_ascii_case("connection") {
        let keep_alive = value.to_ascii_lowercase().contains("keep-alive");
        return Ok(Header::Connection { keep_alive });
    }
    Ok(Header::Other)
}

async fn drain_body<R>(reader: &mut R, length: u64) -> Result<(), Fault>
where
    R: AsyncRead + Unpin,
{
    if length == 0 {
        return Ok(());
    }
    let mut body = reader.take(length);
    let drained = tokio::io::copy(&mut body, &mut tokio::io::sink())
        .await
        .map_err(Fault::read)?;
    if drained < length {
        return Err(Fault::read(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("body ended after {} of {} bytes", drained, length),
        )));
    }
    Ok(())
}

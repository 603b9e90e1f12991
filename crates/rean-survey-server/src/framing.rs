//! Stdio message framing. A message is either one JSON line or a
//! `Content-Length` header block followed by exactly that many body bytes.

use std::io::{self, BufRead, Write};

/// Largest `Content-Length` body accepted. Survey requests are a few
/// hundred bytes; anything near this is a broken or hostile client.
pub const MAX_FRAME_BYTES: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Line,
    ContentLength,
}

#[derive(Debug)]
pub enum Inbound {
    Message { payload: Vec<u8>, frame: Frame },
    /// Unreadable framing. The header block has been consumed; a body whose
    /// length could not be trusted is left in the stream.
    Rejected { reason: String, frame: Frame },
}

pub struct FrameReader<R> {
    inner: R,
    line: String,
}

impl<R: BufRead> FrameReader<R> {
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            line: String::new(),
        }
    }

    /// Next message, or `None` at end of input.
    pub fn next_inbound(&mut self) -> io::Result<Option<Inbound>> {
        loop {
            self.line.clear();
            if self.inner.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let trimmed = self.line.trim_end_matches(['\r', '\n']).trim_start();
            if trimmed.is_empty() {
                continue;
            }
            if !is_header(trimmed) {
                return Ok(Some(Inbound::Message {
                    payload: trimmed.as_bytes().to_vec(),
                    frame: Frame::Line,
                }));
            }

            let first = trimmed.to_string();
            let inbound = match self.read_headers(&first) {
                Ok(len) => self.read_body(len),
                Err(err) => Inbound::Rejected {
                    reason: err.to_string(),
                    frame: Frame::ContentLength,
                },
            };
            return Ok(Some(inbound));
        }
    }

    // Consumes the whole header block even when a header is bad, so the
    // next read starts at the body.
    fn read_headers(&mut self, first: &str) -> io::Result<usize> {
        let mut content_length = header_length(first);
        loop {
            self.line.clear();
            if self.inner.read_line(&mut self.line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "end of input inside frame headers",
                ));
            }
            let header = self.line.trim_end_matches(['\r', '\n']);
            if header.is_empty() {
                break;
            }
            if content_length.is_ok() {
                match header_length(header) {
                    Ok(None) => {}
                    other => content_length = other,
                }
            }
        }
        content_length?
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "missing content-length"))
    }

    fn read_body(&mut self, len: usize) -> Inbound {
        let mut payload = vec![0_u8; len];
        match self.inner.read_exact(&mut payload) {
            Ok(()) => Inbound::Message {
                payload,
                frame: Frame::ContentLength,
            },
            Err(err) => Inbound::Rejected {
                reason: format!("body: {err}"),
                frame: Frame::ContentLength,
            },
        }
    }
}

fn is_header(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    lower.starts_with("content-length:") || lower.starts_with("content-type:")
}

/// `Ok(None)` for headers other than `Content-Length`.
fn header_length(line: &str) -> io::Result<Option<usize>> {
    let Some((name, value)) = line.split_once(':') else {
        return Ok(None);
    };
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return Ok(None);
    }
    let len = value.trim().parse::<usize>().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("bad content-length {:?}", value.trim()),
        )
    })?;
    if len > MAX_FRAME_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("content-length {len} exceeds {MAX_FRAME_BYTES} bytes"),
        ));
    }
    Ok(Some(len))
}

/// Writes `body` using the same framing the request arrived in.
pub fn write_frame<W: Write>(writer: &mut W, frame: Frame, body: &[u8]) -> io::Result<()> {
    match frame {
        Frame::Line => {
            writer.write_all(body)?;
            writer.write_all(b"\n")?;
        }
        Frame::ContentLength => {
            write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
            writer.write_all(body)?;
        }
    }
    writer.flush()
}

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Marks the end of a header block.
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Result of one header read cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete header block is in the buffer.
    Header,
    /// The peer closed the stream before sending a terminator.
    Closed,
    /// The buffer grew past the configured limit without a terminator.
    TooLarge,
}

/// Accumulates a request header block byte by byte.
///
/// The source should be buffered (`tokio::io::BufReader`); single-byte reads
/// on a raw socket are one syscall each.
pub struct HeaderReader {
    buffer: BytesMut,
    limit: Option<usize>,
}

impl HeaderReader {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            buffer: BytesMut::with_capacity(1024),
            limit,
        }
    }

    /// Clears the buffer, then reads until the buffer ends with
    /// `\r\n\r\n` or the stream ends.
    pub async fn read_header<S>(&mut self, source: &mut S) -> std::io::Result<ReadOutcome>
    where
        S: AsyncRead + Unpin,
    {
        self.buffer.clear();

        loop {
            let byte = match source.read_u8().await {
                Ok(b) => b,
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    return Ok(ReadOutcome::Closed);
                }
                Err(e) => return Err(e),
            };
            self.buffer.put_u8(byte);

            if self.buffer.ends_with(HEADER_TERMINATOR) {
                return Ok(ReadOutcome::Header);
            }

            if let Some(limit) = self.limit {
                if self.buffer.len() > limit {
                    return Ok(ReadOutcome::TooLarge);
                }
            }
        }
    }

    /// Bytes accumulated by the last read cycle.
    pub fn header(&self) -> &[u8] {
        &self.buffer
    }

    /// A bare `\r\n\r\n` with no request line in front of it.
    pub fn is_probe(&self) -> bool {
        &self.buffer[..] == HEADER_TERMINATOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stops_at_terminator_and_leaves_rest_unread() {
        let mut src: &[u8] = b"GET / HTTP/1.1\r\n\r\nHEAD";
        let mut reader = HeaderReader::new(None);

        let outcome = reader.read_header(&mut src).await.unwrap();

        assert_eq!(outcome, ReadOutcome::Header);
        assert_eq!(reader.header(), b"GET / HTTP/1.1\r\n\r\n");
        assert_eq!(src, b"HEAD");
    }
}

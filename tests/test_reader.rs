use staticd::http::reader::{HeaderReader, ReadOutcome};
use tokio::io::{AsyncWriteExt, BufReader};

#[tokio::test]
async fn test_reads_complete_header() {
    let mut src: &[u8] = b"GET / HTTP/1.1\r\nHost: a\r\n\r\n";
    let mut reader = HeaderReader::new(None);

    assert_eq!(reader.read_header(&mut src).await.unwrap(), ReadOutcome::Header);
    assert_eq!(reader.header(), b"GET / HTTP/1.1\r\nHost: a\r\n\r\n");
    assert!(!reader.is_probe());
}

#[tokio::test]
async fn test_end_of_stream_before_terminator() {
    let mut src: &[u8] = b"GET / HTTP/1.1\r\n";
    let mut reader = HeaderReader::new(None);

    assert_eq!(reader.read_header(&mut src).await.unwrap(), ReadOutcome::Closed);
}

#[tokio::test]
async fn test_empty_stream_is_closed() {
    let mut src: &[u8] = b"";
    let mut reader = HeaderReader::new(None);

    assert_eq!(reader.read_header(&mut src).await.unwrap(), ReadOutcome::Closed);
}

#[tokio::test]
async fn test_probe_detection() {
    let mut src: &[u8] = b"\r\n\r\nGET / HTTP/1.1\r\n\r\n";
    let mut reader = HeaderReader::new(None);

    assert_eq!(reader.read_header(&mut src).await.unwrap(), ReadOutcome::Header);
    assert!(reader.is_probe());

    assert_eq!(reader.read_header(&mut src).await.unwrap(), ReadOutcome::Header);
    assert!(!reader.is_probe());
    assert_eq!(reader.header(), b"GET / HTTP/1.1\r\n\r\n");
}

#[tokio::test]
async fn test_buffer_cleared_between_requests() {
    let mut src: &[u8] = b"GET /a HTTP/1.1\r\n\r\nHEAD /b HTTP/1.1\r\n\r\n";
    let mut reader = HeaderReader::new(None);

    reader.read_header(&mut src).await.unwrap();
    assert_eq!(reader.header(), b"GET /a HTTP/1.1\r\n\r\n");

    reader.read_header(&mut src).await.unwrap();
    assert_eq!(reader.header(), b"HEAD /b HTTP/1.1\r\n\r\n");
}

#[tokio::test]
async fn test_limit_exceeded() {
    let mut src: &[u8] = b"GET /aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa HTTP/1.1\r\n\r\n";
    let mut reader = HeaderReader::new(Some(16));

    assert_eq!(reader.read_header(&mut src).await.unwrap(), ReadOutcome::TooLarge);
    assert_eq!(reader.header().len(), 17);
}

#[tokio::test]
async fn test_header_split_across_writes() {
    let (mut client, server) = tokio::io::duplex(64);
    let mut server = BufReader::new(server);

    let writer = tokio::spawn(async move {
        client.write_all(b"GET / HTT").await.unwrap();
        tokio::task::yield_now().await;
        client.write_all(b"P/1.1\r\n\r").await.unwrap();
        tokio::task::yield_now().await;
        client.write_all(b"\n").await.unwrap();
        client
    });

    let mut reader = HeaderReader::new(None);
    assert_eq!(reader.read_header(&mut server).await.unwrap(), ReadOutcome::Header);
    assert_eq!(reader.header(), b"GET / HTTP/1.1\r\n\r\n");

    drop(writer.await.unwrap());
}

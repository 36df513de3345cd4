use lantern::http::response::{Response, ResponseBuilder, StatusCode};
use lantern::http::writer::{ResponseWriter, serialize_response};

#[test]
fn test_serialize_empty_response() {
    assert_eq!(
        serialize_response(&Response::not_found()),
        b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec()
    );
    assert_eq!(
        serialize_response(&Response::created()),
        b"HTTP/1.1 201 Created\r\n\r\n".to_vec()
    );
    assert_eq!(
        serialize_response(&Response::bad_request()),
        b"HTTP/1.1 400 Bad Request\r\n\r\n".to_vec()
    );
}

#[test]
fn test_serialize_headers_in_insertion_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("User-Agent", "ua")
        .header("Content-Type", "text/plain")
        .header("Content-Length", "5")
        .body(b"hello".to_vec())
        .build();

    assert_eq!(
        serialize_response(&response),
        b"HTTP/1.1 200 OK\r\nUser-Agent: ua\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello"
            .to_vec()
    );
}

#[test]
fn test_serialize_is_deterministic() {
    let response = Response::octets(vec![1, 2, 3]);

    let first = serialize_response(&response);
    for _ in 0..10 {
        assert_eq!(serialize_response(&response), first);
    }
}

#[test]
fn test_serialize_binary_body_untouched() {
    let body = vec![0u8, 13, 10, 13, 10, 255];
    let response = Response::octets(body.clone());

    let wire = serialize_response(&response);
    assert!(wire.ends_with(&body));
}

#[tokio::test]
async fn test_response_writer_writes_everything() {
    let response = Response::text("hello");
    let mut writer = ResponseWriter::new(&response);
    let expected = serialize_response(&response);
    assert_eq!(writer.remaining(), expected.len());

    let mut sink: Vec<u8> = Vec::new();
    writer.write_to_stream(&mut sink).await.unwrap();

    assert_eq!(sink, expected);
    assert_eq!(writer.remaining(), 0);
}

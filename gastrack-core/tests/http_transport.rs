//! HttpTransport against a loopback server.
//!
//! Each test binds an ephemeral port, serves exactly one canned response from
//! a background thread, and points the transport at it.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use serde_json::json;

use gastrack_core::data::{Acquirer, HttpTransport, SourceDescriptor, SourceError, Transport, FALLBACK_GWEI};

/// Serve one request; returns the URL and a handle yielding the raw request.
fn serve_once(status: &'static str, body: &'static str, delay: Duration) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = v.trim().parse().unwrap_or(0);
            }
            head.push_str(&line);
        }
        let mut payload = vec![0u8; content_length];
        reader.read_exact(&mut payload).unwrap();

        thread::sleep(delay);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = stream;
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();

        head + String::from_utf8_lossy(&payload).as_ref()
    });

    (url, handle)
}

fn transport(timeout: Duration) -> HttpTransport {
    let client = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap();
    HttpTransport::with_client(client, timeout)
}

#[test]
fn post_success_decodes_json() {
    let (url, server) = serve_once("200 OK", r#"{"jsonrpc":"2.0","id":1,"result":"0x3b9aca00"}"#, Duration::ZERO);
    let t = transport(Duration::from_secs(5));

    let body = t
        .post_json(&url, &json!({"jsonrpc": "2.0", "method": "eth_gasPrice", "params": [], "id": 1}))
        .unwrap();
    assert_eq!(body["result"], "0x3b9aca00");

    let request = server.join().unwrap();
    assert!(request.starts_with("POST / HTTP/1.1"));
    assert!(request.contains("eth_gasPrice"));
}

#[test]
fn non_success_status_is_error() {
    let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#, Duration::ZERO);
    let t = transport(Duration::from_secs(5));

    let err = t.get_json(&url).unwrap_err();
    assert_eq!(err, SourceError::HttpStatus { status: 500 });
    server.join().unwrap();
}

#[test]
fn oracle_error_status_with_price_body_falls_back() {
    let (url, server) = serve_once(
        "502 Bad Gateway",
        r#"{"status":"1","result":{"ProposeGasPrice":"0.012"}}"#,
        Duration::ZERO,
    );
    let url: &'static str = Box::leak(url.into_boxed_str());
    let acquirer = Acquirer::new(
        transport(Duration::from_secs(5)),
        Vec::new(),
        Some(SourceDescriptor::gas_oracle("oracle", url)),
    );

    let acq = acquirer.acquire_with_report();
    assert!(acq.reading.origin().is_fallback());
    assert_eq!(acq.reading.value(), FALLBACK_GWEI);
    assert_eq!(acq.attempts.len(), 1);
    assert_eq!(
        acq.attempts[0].result,
        Err(SourceError::HttpStatus { status: 502 })
    );
    server.join().unwrap();
}

#[test]
fn non_json_body_is_malformed() {
    let (url, server) = serve_once("200 OK", "<html>rate limited</html>", Duration::ZERO);
    let t = transport(Duration::from_secs(5));

    let err = t.get_json(&url).unwrap_err();
    assert!(matches!(err, SourceError::MalformedBody(_)));
    server.join().unwrap();
}

#[test]
fn slow_server_times_out() {
    let (url, server) = serve_once("200 OK", r#"{"result":"0x1"}"#, Duration::from_millis(800));
    let t = transport(Duration::from_millis(150));

    let err = t.get_json(&url).unwrap_err();
    assert_eq!(err, SourceError::Timeout(Duration::from_millis(150)));
    server.join().unwrap();
}

#[test]
fn closed_port_is_unreachable() {
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let t = transport(Duration::from_secs(2));

    let err = t.get_json(&format!("http://127.0.0.1:{port}")).unwrap_err();
    assert!(matches!(err, SourceError::NetworkUnreachable(_)), "{err:?}");
}

#[test]
fn descriptor_fetch_over_http() {
    let (url, server) = serve_once("200 OK", r#"{"result":"0x5f5e100"}"#, Duration::ZERO);
    let url: &'static str = Box::leak(url.into_boxed_str());
    let t = transport(Duration::from_secs(5));

    let value = SourceDescriptor::json_rpc("local", url).fetch(&t).unwrap();
    assert_eq!(value, 0.1);
    server.join().unwrap();
}

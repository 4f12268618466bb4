//! 통합 테스트 -- 실제 HTTP 클라이언트로 로컬 컨트롤러 스텁과 통신
//!
//! `std::net::TcpListener`로 한 번만 응답하는 HTTP 서버를 띄우고
//! `ReqwestTransport` 기반 집행기의 요청/응답 처리를 검증합니다.

use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use flowguard_core::diagnostic::{DiagnosticLevel, MemorySink};
use flowguard_core::FlowEnforcer;
use flowguard_odl::{OdlClientConfig, OdlClientConfigBuilder, OdlFlowEnforcer};

/// 스텁 서버가 받은 요청
struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// 요청 하나를 받아 고정 응답을 돌려주는 서버를 띄웁니다.
fn serve_once(
    status_line: &'static str,
    response_body: &'static str,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((k, v)) = line.split_once(':') {
                headers.push((k.trim().to_owned(), v.trim().to_owned()));
            }
        }

        let content_length = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(0);
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let mut stream = stream;
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response_body}",
            response_body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            request_line: request_line.trim_end().to_owned(),
            headers,
            body: String::from_utf8(request_body).unwrap(),
        }
    });

    (format!("http://{addr}/restconf/config/opendaylight-inventory:nodes"), handle)
}

fn config_for(base_url: &str) -> OdlClientConfig {
    OdlClientConfigBuilder::new()
        .base_url(base_url)
        .credentials("admin", "secret")
        .timeout_secs(5)
        .build()
        .unwrap()
}

/// 컨트롤러가 500을 반환하면 false와 응답 본문 포함 진단
#[test]
fn server_error_returns_false_with_body() {
    // Given
    let (base_url, server) = serve_once(
        "HTTP/1.1 500 Internal Server Error",
        r#"{"errors":{"error":[{"error-message":"datastore unavailable"}]}}"#,
    );
    let sink = Arc::new(MemorySink::new());
    let enforcer = OdlFlowEnforcer::new(&config_for(&base_url), sink.clone()).unwrap();

    // When
    let applied = enforcer.apply_flow("203.0.113.5", "src", "openflow:1");

    // Then
    assert!(!applied);
    let request = server.join().unwrap();
    assert_eq!(
        request.request_line,
        "PUT /restconf/config/opendaylight-inventory:nodes/node/openflow:1/table/0/flow/block-src-ip-203-0-113-5 HTTP/1.1"
    );
    let errors = sink.messages_at(DiagnosticLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("HTTP 500"));
    assert!(errors[0].contains("datastore unavailable"));
}

/// 성공 응답이면 true, 요청에는 인증/헤더/본문 포함
#[test]
fn successful_put_sends_auth_headers_and_payload() {
    // Given
    let (base_url, server) = serve_once("HTTP/1.1 201 Created", "");
    let sink = Arc::new(MemorySink::new());
    let enforcer = OdlFlowEnforcer::new(&config_for(&base_url), sink.clone()).unwrap();

    // When
    let applied = enforcer.apply_flow("198.51.100.7", "dst", "openflow:1");

    // Then
    assert!(applied);
    let request = server.join().unwrap();
    assert!(request.request_line.starts_with("PUT "));
    // admin:secret
    assert_eq!(request.header("authorization"), Some("Basic YWRtaW46c2VjcmV0"));
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.header("accept"), Some("application/json"));

    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["flow"][0]["id"], "block-dst-ip-198-51-100-7");
    assert_eq!(body["flow"][0]["match"]["ipv4-destination"], "198.51.100.7/32");
    assert!(sink.contains(DiagnosticLevel::Info, "successfully applied"));
}

/// DELETE는 본문 없이 같은 URL로 전송
#[test]
fn remove_sends_delete_to_same_resource() {
    // Given
    let (base_url, server) = serve_once("HTTP/1.1 200 OK", "");
    let sink = Arc::new(MemorySink::new());
    let enforcer = OdlFlowEnforcer::new(&config_for(&base_url), sink.clone()).unwrap();

    // When
    let removed = enforcer.remove_flow("10.0.0.9", "src", "openflow:1");

    // Then
    assert!(removed);
    let request = server.join().unwrap();
    assert_eq!(
        request.request_line,
        "DELETE /restconf/config/opendaylight-inventory:nodes/node/openflow:1/table/0/flow/block-src-ip-10-0-0-9 HTTP/1.1"
    );
    assert!(request.body.is_empty());
    assert!(request.header("content-type").is_none());
}

/// 제거 대상이 없으면 컨트롤러 응답(404)대로 false
#[test]
fn remove_missing_flow_reports_controller_answer() {
    let (base_url, server) = serve_once("HTTP/1.1 404 Not Found", r#"{"errors":"data-missing"}"#);
    let sink = Arc::new(MemorySink::new());
    let enforcer = OdlFlowEnforcer::new(&config_for(&base_url), sink.clone()).unwrap();

    assert!(!enforcer.remove_flow("10.0.0.9", "src", "openflow:1"));
    server.join().unwrap();
    assert!(sink.contains(DiagnosticLevel::Error, "HTTP 404"));
    assert!(sink.contains(DiagnosticLevel::Error, "data-missing"));
}

/// 닫힌 포트로의 요청은 전송 실패로 false
#[test]
fn connection_refused_returns_false() {
    // Given: 포트를 할당받은 뒤 바로 닫음
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base_url = format!("http://127.0.0.1:{port}/restconf");
    let sink = Arc::new(MemorySink::new());
    let enforcer = OdlFlowEnforcer::new(&config_for(&base_url), sink.clone()).unwrap();

    // When
    let applied = enforcer.apply_flow("1.2.3.4", "src", "openflow:1");

    // Then
    assert!(!applied);
    assert!(sink.contains(DiagnosticLevel::Error, "failed to apply flow rule: block-src-ip-1-2-3-4"));
    assert!(sink.contains(DiagnosticLevel::Error, "response: none"));
}

/// IP가 아닌 값은 경로를 조작할 수 있으므로 연결조차 하지 않음
#[test]
fn path_like_ip_never_reaches_controller() {
    // Given
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let base_url = format!(
        "http://{}/restconf/config/opendaylight-inventory:nodes",
        listener.local_addr().unwrap()
    );
    let sink = Arc::new(MemorySink::new());
    let enforcer = OdlFlowEnforcer::new(&config_for(&base_url), sink.clone()).unwrap();

    // When
    let removed = enforcer.remove_flow(
        "x/../../../openflow:2/table/0/flow/allow-mgmt",
        "src",
        "openflow:1",
    );

    // Then
    assert!(!removed);
    let accepted = listener.accept();
    assert!(
        matches!(accepted, Err(ref e) if e.kind() == ErrorKind::WouldBlock),
        "no connection expected"
    );
    assert!(sink.contains(DiagnosticLevel::Error, "invalid target ip"));
}

/// 응답하지 않는 컨트롤러는 타임아웃 후 전송 실패와 같이 처리
#[test]
fn unresponsive_controller_times_out() {
    // Given: 연결은 받지만 응답하지 않는 서버
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (done_tx, done_rx) = mpsc::channel::<()>();
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        // 테스트가 끝날 때까지 연결을 열어둠
        let _ = done_rx.recv_timeout(Duration::from_secs(30));
        drop(stream);
    });

    let config = OdlClientConfigBuilder::new()
        .base_url(format!("http://{addr}/restconf/config/opendaylight-inventory:nodes"))
        .credentials("admin", "secret")
        .timeout_secs(1)
        .build()
        .unwrap();
    let sink = Arc::new(MemorySink::new());
    let enforcer = OdlFlowEnforcer::new(&config, sink.clone()).unwrap();

    // When
    let applied = enforcer.apply_flow("203.0.113.5", "src", "openflow:1");

    // Then
    assert!(!applied);
    let errors = sink.messages_at(DiagnosticLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("block-src-ip-203-0-113-5"));
    assert!(errors[0].contains("response: none"));

    done_tx.send(()).unwrap();
    server.join().unwrap();
}

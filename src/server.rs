//! Agenda service: one read query behind permissive CORS.
//!
//! Request handling is a pure function from the request line to a
//! response triple so the routing is testable without sockets; the
//! listener loop in `bin/agenda_server` glues it to TCP.

use anyhow::Result;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};

use crate::logging::{log, obj, v_str, Domain, Level};
use crate::storage::LedgerStore;

pub const CORS_HEADERS: &str = "Access-Control-Allow-Origin: *\r\n\
Access-Control-Allow-Methods: GET,OPTIONS\r\n\
Access-Control-Allow-Headers: *\r\n";

pub struct Response {
    pub status: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

/// Route a request line. Preflight gets an empty 200; the agenda path
/// returns the table as JSON, newest first; everything else reports
/// the worker is alive.
pub fn handle_request(request_line: &str, sqlite_path: &str) -> Response {
    if request_line.starts_with("OPTIONS") {
        return Response {
            status: "200 OK",
            content_type: "text/plain",
            body: String::new(),
        };
    }

    if request_line.starts_with("GET /api/agenda") {
        return match agenda_json(sqlite_path) {
            Ok(body) => Response {
                status: "200 OK",
                content_type: "application/json",
                body,
            },
            Err(err) => {
                log(
                    Level::Error,
                    Domain::Server,
                    "agenda_query_failed",
                    obj(&[("error", v_str(&err.to_string()))]),
                );
                Response {
                    status: "500 INTERNAL SERVER ERROR",
                    content_type: "text/plain",
                    body: "agenda query failed".to_string(),
                }
            }
        };
    }

    Response {
        status: "200 OK",
        content_type: "text/plain",
        body: "Worker running".to_string(),
    }
}

fn agenda_json(sqlite_path: &str) -> Result<String> {
    let store = LedgerStore::new(sqlite_path)?;
    let items = store.list_agenda()?;
    Ok(serde_json::to_string(&items)?)
}

fn write_response(stream: &mut TcpStream, resp: &Response) {
    let raw = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\n{}Content-Length: {}\r\n\r\n{}",
        resp.status,
        resp.content_type,
        CORS_HEADERS,
        resp.body.len(),
        resp.body
    );
    let _ = stream.write_all(raw.as_bytes());
}

/// Accept loop. Runs until the process is killed.
pub fn serve(listener: TcpListener, sqlite_path: &str) -> Result<()> {
    log(
        Level::Info,
        Domain::Server,
        "listening",
        obj(&[("addr", v_str(&listener.local_addr()?.to_string()))]),
    );
    for stream in listener.incoming() {
        let mut stream = match stream {
            Ok(s) => s,
            Err(_) => continue,
        };
        let request_line = match BufReader::new(&stream).lines().next() {
            Some(Ok(line)) => line,
            _ => continue,
        };
        log(
            Level::Debug,
            Domain::Server,
            "request",
            obj(&[("line", v_str(&request_line))]),
        );
        let resp = handle_request(&request_line, sqlite_path);
        write_response(&mut stream, &resp);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AgendaItem;

    fn seeded_db() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.sqlite").to_string_lossy().to_string();
        let mut store = LedgerStore::new(&path).unwrap();
        store.init().unwrap();
        store.seed_demo().unwrap();
        (dir, path)
    }

    #[test]
    fn test_options_preflight_empty_body() {
        let (_dir, path) = seeded_db();
        let resp = handle_request("OPTIONS /api/agenda HTTP/1.1", &path);
        assert_eq!(resp.status, "200 OK");
        assert!(resp.body.is_empty());
    }

    #[test]
    fn test_agenda_route_returns_ordered_json() {
        let (_dir, path) = seeded_db();
        let resp = handle_request("GET /api/agenda HTTP/1.1", &path);
        assert_eq!(resp.status, "200 OK");
        assert_eq!(resp.content_type, "application/json");
        let items: Vec<AgendaItem> = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(items.len(), 4);
        for pair in items.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_unknown_path_reports_worker_running() {
        let (_dir, path) = seeded_db();
        let resp = handle_request("GET / HTTP/1.1", &path);
        assert_eq!(resp.body, "Worker running");
        assert_eq!(resp.content_type, "text/plain");
    }

    #[test]
    fn test_missing_db_is_500_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        // Opening creates the file, but the agenda table is absent.
        let path = dir.path().join("empty.sqlite").to_string_lossy().to_string();
        let resp = handle_request("GET /api/agenda HTTP/1.1", &path);
        assert_eq!(resp.status, "500 INTERNAL SERVER ERROR");
    }

    #[test]
    fn test_cors_headers_shape() {
        assert!(CORS_HEADERS.contains("Access-Control-Allow-Origin: *"));
        assert!(CORS_HEADERS.contains("GET,OPTIONS"));
    }
}

//! Loopback HTTP server answering a single request with a canned response.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// A server that accepts one connection, records the request target and
/// replies with a fixed status and JSON body.
pub struct OneShotServer {
    /// Base URL to hand to an adapter, e.g. `http://127.0.0.1:40123`.
    pub base_url: String,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    /// Start serving `body` with `status` (for example `"200 OK"`).
    pub fn respond(status: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap_or_else(|err| {
            panic!("failed to bind loopback listener: {err}");
        });
        let address = listener
            .local_addr()
            .unwrap_or_else(|err| panic!("listener has no address: {err}"));
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener
                .accept()
                .unwrap_or_else(|err| panic!("failed to accept connection: {err}"));
            let mut request = Vec::new();
            let mut chunk = [0_u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = stream
                    .read(&mut chunk)
                    .unwrap_or_else(|err| panic!("failed to read request: {err}"));
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..read]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .unwrap_or_else(|err| panic!("failed to write response: {err}"));
            stream
                .flush()
                .unwrap_or_else(|err| panic!("failed to flush response: {err}"));
            let head = String::from_utf8_lossy(&request);
            head.lines()
                .next()
                .and_then(|line| line.split_whitespace().nth(1))
                .unwrap_or_default()
                .to_owned()
        });
        Self {
            base_url: format!("http://{address}"),
            handle,
        }
    }

    /// Wait for the request to be served and return its target
    /// (path and query).
    pub fn request_target(self) -> String {
        self.handle
            .join()
            .unwrap_or_else(|_| panic!("loopback server thread panicked"))
    }
}

//! Minimal HTTP/1.1 server with canned per-path responses for integration tests.
//!
//! Every response closes the connection. Unknown paths get 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// What to put in the `Content-Length` header.
#[derive(Debug, Clone, Copy)]
pub enum Length {
    /// The real body length.
    Actual,
    /// A fixed value regardless of the body (servers that lie).
    Declared(u64),
    /// No header; body ends when the connection closes.
    Omitted,
}

/// How long a stalled response stays silent. Longer than any client timeout used in tests.
const STALL: Duration = Duration::from_secs(20);

/// Where the server goes silent instead of finishing the response.
#[derive(Debug, Clone, Copy)]
pub enum Stall {
    /// Accept the request and never send the status line.
    BeforeHead,
    /// Send the head and this many body bytes, then nothing more.
    AfterBody(usize),
}

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: Option<String>,
    pub length: Length,
    pub location: Option<String>,
    pub body: Vec<u8>,
    pub stall: Option<Stall>,
}

impl Route {
    pub fn ok(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.to_string()),
            length: Length::Actual,
            location: None,
            body,
            stall: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: Some("text/html".to_string()),
            length: Length::Actual,
            location: None,
            body: format!("<h1>{}</h1>", status).into_bytes(),
            stall: None,
        }
    }

    pub fn redirect(to: &str) -> Self {
        Self {
            location: Some(to.to_string()),
            ..Self::status(302)
        }
    }

    pub fn without_content_type(mut self) -> Self {
        self.content_type = None;
        self
    }

    pub fn with_length(mut self, length: Length) -> Self {
        self.length = length;
        self
    }

    /// Go silent at `stall` while keeping the connection open.
    pub fn stalling(mut self, stall: Stall) -> Self {
        self.stall = Some(stall);
        self
    }
}

pub struct ImageServer {
    base: String,
    hits: Arc<AtomicUsize>,
}

impl ImageServer {
    /// Starts serving `routes` (keyed by path, e.g. "/cat.jpg") on a background thread.
    /// The server runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
        );
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_srv = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                hits_srv.fetch_add(1, Ordering::SeqCst);
                thread::spawn(move || handle(stream, &routes));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}", port),
            hits,
        }
    }

    /// Absolute URL for `path` (which must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Number of connections accepted so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// A URL on a local port nobody listens on.
pub fn refused_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, path)
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/");
    let path = path.split('?').next().unwrap_or(path);

    let route = routes
        .get(path)
        .cloned()
        .unwrap_or_else(|| Route::status(404));

    if let Some(Stall::BeforeHead) = route.stall {
        thread::sleep(STALL);
        return;
    }

    let mut head = format!("HTTP/1.1 {} {}\r\n", route.status, reason(route.status));
    if let Some(ct) = &route.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    match route.length {
        Length::Actual => head.push_str(&format!("Content-Length: {}\r\n", route.body.len())),
        Length::Declared(n) => head.push_str(&format!("Content-Length: {}\r\n", n)),
        Length::Omitted => {}
    }
    if let Some(loc) = &route.location {
        head.push_str(&format!("Location: {}\r\n", loc));
    }
    head.push_str("Connection: close\r\n\r\n");

    let _ = stream.write_all(head.as_bytes());
    match route.stall {
        Some(Stall::AfterBody(n)) => {
            let _ = stream.write_all(&route.body[..n.min(route.body.len())]);
            let _ = stream.flush();
            thread::sleep(STALL);
        }
        _ => {
            let _ = stream.write_all(&route.body);
            let _ = stream.flush();
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

//! Minimal HTTP/1.1 server that answers every request like a director would:
//! a redirect status plus the configured headers, with an empty body.
//!
//! Request paths are recorded so tests can check what was asked for and
//! that the redirect was not followed.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct DirectorServerOptions {
    /// Status line sent back, e.g. "307 Temporary Redirect".
    pub status: &'static str,
    /// Extra response headers as (name, value).
    pub headers: Vec<(String, String)>,
}

impl Default for DirectorServerOptions {
    fn default() -> Self {
        Self {
            status: "307 Temporary Redirect",
            headers: Vec::new(),
        }
    }
}

pub struct DirectorServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl DirectorServer {
    /// Paths requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts the server in a background thread. It runs until the process exits.
pub fn start(opts: DirectorServerOptions) -> DirectorServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{}", port);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let opts = Arc::new(opts);

    thread::spawn({
        let requests = Arc::clone(&requests);
        move || {
            for stream in listener.incoming().flatten() {
                let requests = Arc::clone(&requests);
                let opts = Arc::clone(&opts);
                thread::spawn(move || handle(stream, &opts, &requests));
            }
        }
    });

    DirectorServer { base_url, requests }
}

fn handle(
    mut stream: std::net::TcpStream,
    opts: &DirectorServerOptions,
    requests: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    requests.lock().unwrap().push(path);

    let mut response = format!("HTTP/1.1 {}\r\n", opts.status);
    for (name, value) in &opts.headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("Content-Length: 0\r\nConnection: close\r\n\r\n");
    let _ = stream.write_all(response.as_bytes());
}

/// A local URL nothing is listening on.
pub fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

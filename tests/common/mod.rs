//! Shared helpers: a throwaway data root and a full request/response
//! exchange over an in-memory duplex stream.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use roster::app::App;
use roster::http::connection::Connection;
use roster::store::{MemoryStore, RecordStore};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const LIST_TEMPLATE: &str = "<table>{{students}}</table>";
pub const ADD_PAGE: &str = "<p>Saved.</p>";

/// A parsed response as seen by the client.
#[derive(Debug)]
pub struct RawResponse {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn status(&self) -> u16 {
        self.status_line
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.parse().ok())
            .expect("status code")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf-8 body")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

/// Creates a data root with the record pages and a couple of assets.
pub fn data_root() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    write(root, "app_list.html", LIST_TEMPLATE);
    write(root, "app_add.html", ADD_PAGE);
    write(root, "index.html", "<h1>Home</h1>");
    write(root, "style.css", "body {}");
    write(root, "blob.xyz", "\x00\x01");
    std::fs::create_dir(root.join("docs")).expect("mkdir");
    write(root, "docs/index.html", "<h1>Docs</h1>");

    dir
}

fn write(root: &Path, name: &str, contents: &str) {
    std::fs::write(root.join(name), contents).expect("write asset");
}

pub fn memory_app(root: &Path) -> (Arc<App>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = Arc::new(App::new(root, Arc::clone(&store) as Arc<dyn RecordStore>));
    (app, store)
}

/// Sends `raw` over a fresh connection and reads the response until close.
pub async fn exchange(app: Arc<App>, raw: &[u8]) -> RawResponse {
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    let peer: SocketAddr = "127.0.0.1:40000".parse().expect("addr");

    let handle = tokio::spawn(async move {
        let mut conn = Connection::new(server, peer, app);
        conn.run().await
    });

    client.write_all(raw).await.expect("write request");
    client.shutdown().await.expect("close request side");

    let mut received = Vec::new();
    client.read_to_end(&mut received).await.expect("read response");
    handle.await.expect("join").expect("connection");

    parse_response(&received)
}

pub fn parse_response(raw: &[u8]) -> RawResponse {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("header terminator");
    let head = std::str::from_utf8(&raw[..split]).expect("utf-8 head");
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().expect("status line").to_string();
    let headers = lines
        .map(|line| {
            let (k, v) = line.split_once(": ").expect("header");
            (k.to_string(), v.to_string())
        })
        .collect();

    RawResponse {
        status_line,
        headers,
        body,
    }
}

pub fn get(target: &str) -> Vec<u8> {
    format!("GET {} HTTP/1.1\r\nHost: localhost:8080\r\n\r\n", target).into_bytes()
}

pub fn post_form(target: &str, body: &str) -> Vec<u8> {
    format!(
        "POST {} HTTP/1.1\r\nHost: localhost:8080\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{}",
        target,
        body.len(),
        body
    )
    .into_bytes()
}

//! Shared utilities for integration testing.
//!
//! `MockNode` is an in-process stand-in for a ledger node's REST API. It
//! applies create-agent transactions with the same acceptance rules as the
//! certificate registry processor so client behaviour can be checked
//! without a running validator.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use prost::Message;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use consensource_client::registry::addressing::make_agent_address;
use consensource_client::registry::protos::{Agent, AgentContainer};
use consensource_client::registry::Action;
use consensource_client::sawtooth::protos::{BatchList, TransactionHeader};

/// A parsed HTTP request.
#[allow(dead_code)]
pub struct MockRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Vec<u8>,
}

async fn read_request(socket: &mut TcpStream) -> Option<MockRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    let (path, query_string) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), query.to_string()),
        None => (target, String::new()),
    };
    let query = query_string
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Some(MockRequest {
        method,
        path,
        query,
        body,
    })
}

async fn write_response(socket: &mut TcpStream, status: u16, body: &str) {
    let status_text = match status {
        200 => "200 OK",
        202 => "202 Accepted",
        400 => "400 Bad Request",
        404 => "404 Not Found",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Start a programmable backend on an ephemeral port.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(MockRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        if let Some(request) = read_request(&mut socket).await {
                            let (status, body) = f(request).await;
                            write_response(&mut socket, status, &body).await;
                            tokio::time::sleep(Duration::from_millis(10)).await;
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

#[allow(dead_code)]
#[derive(Default)]
struct NodeState {
    state: BTreeMap<String, Vec<u8>>,
    statuses: HashMap<String, Value>,
    block_num: u64,
}

/// In-memory ledger node serving the REST endpoints the client uses.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockNode {
    inner: Arc<Mutex<NodeState>>,
}

#[allow(dead_code)]
impl MockNode {
    /// Start serving; returns the node handle and its `host:port`.
    pub async fn start() -> (Self, String) {
        let node = Self::default();
        let handler = node.clone();
        let addr = start_programmable_backend(move |request| {
            let node = handler.clone();
            async move { node.handle(request) }
        })
        .await;
        (node, addr.to_string())
    }

    /// Number of state entries currently stored.
    pub fn state_len(&self) -> usize {
        self.inner.lock().unwrap().state.len()
    }

    fn handle(&self, request: MockRequest) -> (u16, String) {
        match (request.method.as_str(), request.path.as_str()) {
            ("GET", "/blocks") => self.blocks(),
            ("POST", "/batches") => self.submit(&request.body),
            ("GET", "/batch_statuses") => self.statuses(&request.query),
            ("GET", "/state") => self.list_state(&request.query),
            ("GET", path) if path.starts_with("/state/") => self.get_state(&path[7..]),
            _ => error(404, "Not Found"),
        }
    }

    fn blocks(&self) -> (u16, String) {
        let inner = self.inner.lock().unwrap();
        let body = json!({
            "data": [{
                "header_signature": format!("block{}", inner.block_num),
                "header": { "block_num": inner.block_num.to_string() }
            }],
            "link": "/blocks"
        });
        (200, body.to_string())
    }

    fn submit(&self, body: &[u8]) -> (u16, String) {
        let batch_list = match BatchList::decode(body) {
            Ok(list) => list,
            Err(_) => return error(400, "Submitted Batches Invalid"),
        };

        let mut inner = self.inner.lock().unwrap();
        let mut ids = Vec::new();
        for batch in batch_list.batches {
            let batch_id = batch.header_signature.clone();
            let mut status = json!({ "id": batch_id, "status": "COMMITTED", "invalid_transactions": [] });

            for txn in &batch.transactions {
                if let Err(message) = apply(&mut inner.state, txn) {
                    status = json!({
                        "id": batch_id,
                        "status": "INVALID",
                        "invalid_transactions": [
                            { "id": txn.header_signature, "message": message, "extended_data": "" }
                        ]
                    });
                    break;
                }
            }

            inner.block_num += 1;
            inner.statuses.insert(batch_id.clone(), status);
            ids.push(batch_id);
        }

        let body = json!({ "link": format!("/batch_statuses?id={}", ids.join(",")) });
        (202, body.to_string())
    }

    fn statuses(&self, query: &HashMap<String, String>) -> (u16, String) {
        let inner = self.inner.lock().unwrap();
        let ids = match query.get("id") {
            Some(ids) if !ids.is_empty() => ids,
            _ => return error(400, "Missing Id Query"),
        };

        let data: Vec<Value> = ids
            .split(',')
            .map(|id| {
                inner
                    .statuses
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| json!({ "id": id, "status": "UNKNOWN", "invalid_transactions": [] }))
            })
            .collect();
        (200, json!({ "data": data }).to_string())
    }

    fn list_state(&self, query: &HashMap<String, String>) -> (u16, String) {
        let inner = self.inner.lock().unwrap();
        let prefix = query.get("address").cloned().unwrap_or_default();

        let data: Vec<Value> = inner
            .state
            .iter()
            .filter(|(address, _)| address.starts_with(&prefix))
            .map(|(address, data)| json!({ "address": address, "data": STANDARD.encode(data) }))
            .collect();
        (200, json!({ "data": data, "paging": {} }).to_string())
    }

    fn get_state(&self, address: &str) -> (u16, String) {
        let inner = self.inner.lock().unwrap();
        match inner.state.get(address) {
            Some(data) => (200, json!({ "data": STANDARD.encode(data) }).to_string()),
            None => error(404, "State Not Found"),
        }
    }
}

/// Apply one transaction the way the registry processor would.
#[allow(dead_code)]
fn apply(
    state: &mut BTreeMap<String, Vec<u8>>,
    txn: &consensource_client::sawtooth::protos::Transaction,
) -> Result<(), String> {
    let header = TransactionHeader::decode(txn.header.as_slice())
        .map_err(|_| "Invalid transaction header".to_string())?;
    let action = Action::decode(&txn.payload).map_err(|e| e.to_string())?;

    match action {
        Action::CreateAgent { name, timestamp } => {
            let name = name.ok_or_else(|| "Name was not provided".to_string())?;
            let public_key = header.signer_public_key;
            let address = make_agent_address(&public_key);

            let mut container = state
                .get(&address)
                .map(|data| AgentContainer::decode(data.as_slice()).unwrap_or_default())
                .unwrap_or_default();
            if container.entries.iter().any(|a| a.public_key == public_key) {
                return Err(format!("Agent already exists: {}", public_key));
            }

            container.entries.push(Agent {
                public_key,
                name,
                organization_id: String::new(),
                timestamp,
            });
            state.insert(address, container.encode_to_vec());
            Ok(())
        }
    }
}

#[allow(dead_code)]
fn error(code: u16, title: &str) -> (u16, String) {
    let body = json!({ "error": { "code": code, "title": title, "message": title } });
    (code, body.to_string())
}

//! In-memory transport for driving the bootstrap without sockets

use crate::transport::{HttpResponse, HttpTransport};
use crate::{NetworkError, NetworkResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Reply {
    Respond(HttpResponse),
    Hang,
}

/// A recorded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub url: String,
    pub query: Vec<(String, String)>,
}

/// Replies with canned bodies keyed by URL. Unknown URLs fail like a refused
/// connection.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, Reply>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, url: &str, body: &str) -> Self {
        self.status(url, 200, body)
    }

    pub fn status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.routes
            .insert(url.to_string(), Reply::Respond(HttpResponse::new(status, body)));
        self
    }

    pub fn hang(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Reply::Hang);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.url.clone()).collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> NetworkResult<HttpResponse> {
        self.calls.lock().push(Call {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });

        match self.routes.get(url).cloned() {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(NetworkError::Transport("hung request resumed".to_string()))
            }
            None => Err(NetworkError::Transport(format!(
                "connection refused: {}",
                url
            ))),
        }
    }
}

/// Canned node API bodies
pub mod bodies {
    pub fn autoconfigure(nethash: &str, version: u8) -> String {
        format!(
            r#"{{"success":true,"network":{{"nethash":"{}","token":"ARK","symbol":"Ѧ","explorer":"https://explorer.ark.io","version":{}}}}}"#,
            nethash, version
        )
    }

    pub fn fees() -> String {
        r#"{"success":true,"fees":{"send":10000000,"vote":100000000,"secondsignature":500000000,"delegate":2500000000,"multisignature":500000000}}"#.to_string()
    }

    pub fn peer(ip: &str, port: u16, status: &str, version: &str, height: u64) -> String {
        format!(
            r#"{{"ip":"{}","port":{},"status":"{}","version":"{}","height":{},"os":"linux","delay":12}}"#,
            ip, port, status, version, height
        )
    }

    pub fn peer_status(peer: &str) -> String {
        format!(r#"{{"success":true,"peer":{}}}"#, peer)
    }

    pub fn peers(peers: &[String]) -> String {
        format!(r#"{{"success":true,"peers":[{}]}}"#, peers.join(","))
    }
}

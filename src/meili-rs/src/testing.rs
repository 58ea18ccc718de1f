//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};
use crate::{Client, ClientConfig};

enum Scripted {
    Respond(HttpResponse),
    Fail(String),
}

/// Replays scripted responses in order; once the script runs out it repeats
/// the fallback response, if one was set, and fails otherwise.
#[derive(Default)]
pub(crate) struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Option<HttpResponse>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.push(Scripted::Respond(HttpResponse::new(status, body)))
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.push(Scripted::Fail(message.to_string()))
    }

    pub(crate) fn repeat(mut self, status: u16, body: &str) -> Self {
        self.fallback = Some(HttpResponse::new(status, body));
        self
    }

    fn push(self, entry: Scripted) -> Self {
        self.script.lock().unwrap().push_back(entry);
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Body of the `n`th request, parsed as JSON
    pub(crate) fn json_body(&self, n: usize) -> serde_json::Value {
        let requests = self.requests.lock().unwrap();
        let body = requests[n].body.as_deref().expect("request has no body");
        serde_json::from_slice(body).unwrap()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(message.into()),
            None => match &self.fallback {
                Some(response) => Ok(response.clone()),
                None => Err("no scripted response left".into()),
            },
        }
    }
}

pub(crate) fn client_with(transport: Arc<MockTransport>) -> Client {
    Client::with_transport(ClientConfig::new("http://localhost:7700"), transport)
}

use crate::error::{Result, SockError};
use crate::events::{BusEvent, DetailType, EventBus, EventSink};
use crate::model::protocol::ContentBlock;
use crate::model::{ModelRequest, ModelResponse, TextModel, Usage};
use std::sync::{Arc, Mutex};

/// Model that replays scripted responses.
///
/// Responses are consumed in order; the last one repeats forever. `Err`
/// entries become model errors.
pub(crate) struct ScriptedModel {
    responses: Mutex<Vec<std::result::Result<ModelResponse, String>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedModel {
    pub(crate) fn new(responses: Vec<std::result::Result<ModelResponse, String>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_text(text: &str) -> Self {
        Self::new(vec![Ok(Self::text_response(text))])
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self::new(vec![Err(message.to_string())])
    }

    pub(crate) fn text_response(text: &str) -> ModelResponse {
        ModelResponse {
            content: vec![ContentBlock::Text {
                text: text.to_string(),
            }],
            stop_reason: Some("end_turn".to_string()),
            usage: None,
        }
    }

    pub(crate) fn text_response_with_usage(text: &str, input: u64, output: u64) -> ModelResponse {
        ModelResponse {
            usage: Some(Usage {
                input_tokens: input,
                output_tokens: output,
            }),
            ..Self::text_response(text)
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Text of the first user message of the first request.
    pub(crate) fn first_prompt(&self) -> String {
        let requests = self.requests.lock().unwrap();
        match &requests[0].messages[0].content {
            crate::model::protocol::MessageContent::Text(text) => text.clone(),
            other => panic!("expected a text prompt, got {other:?}"),
        }
    }
}

impl TextModel for ScriptedModel {
    fn invoke(&self, request: &ModelRequest) -> Result<ModelResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let mut responses = self.responses.lock().unwrap();
        let next = if responses.len() > 1 {
            responses.remove(0)
        } else {
            responses
                .first()
                .cloned()
                .unwrap_or_else(|| Err("no scripted response".to_string()))
        };
        next.map_err(SockError::ModelError)
    }
}

/// Event sink that keeps everything it receives. Clones share storage.
#[derive(Clone, Default)]
pub(crate) struct MemoryEventSink {
    events: Arc<Mutex<Vec<BusEvent>>>,
}

impl MemoryEventSink {
    pub(crate) fn events(&self) -> Vec<BusEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn detail_types(&self) -> Vec<DetailType> {
        self.events().iter().map(|e| e.detail_type).collect()
    }

    /// A bus delivering into a fresh sink, plus a handle to inspect it.
    pub(crate) fn bus() -> (EventBus, MemoryEventSink) {
        let sink = MemoryEventSink::default();
        let bus = EventBus::new("test-bus", Box::new(sink.clone()));
        (bus, sink)
    }
}

impl EventSink for MemoryEventSink {
    fn deliver(&self, event: &BusEvent) -> Result<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A local HTTP server that answers exactly one request.
///
/// `request()` returns the raw request text (head and body) once the
/// response has been written.
pub(crate) struct StubServer {
    url: String,
    handle: std::thread::JoinHandle<String>,
}

impl StubServer {
    pub(crate) fn respond(status: &str, body: &str) -> Self {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            let head_end = loop {
                let n = stream.read(&mut buf).unwrap();
                assert!(n > 0, "client closed before sending headers");
                raw.extend_from_slice(&buf[..n]);
                if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&raw[..head_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while raw.len() < head_end + content_length {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }

            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });

        Self { url, handle }
    }

    /// Base URL, without a trailing slash.
    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn request(self) -> String {
        self.handle.join().unwrap()
    }
}

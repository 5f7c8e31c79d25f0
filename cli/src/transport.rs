//! Blocking ureq transport executing the core's `HttpRequest` values.

use todo_sync::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

/// Executes requests with a shared ureq agent.
///
/// ureq's automatic status-code-as-error behavior is disabled so 4xx/5xx
/// responses come back as data; the core decides what a status means.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent(),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => {
                let mut r = self.agent.get(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.call()
            }
            (HttpMethod::Delete, _) => {
                let mut r = self.agent.delete(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.call()
            }
            (HttpMethod::Post, body) => {
                let mut r = self.agent.post(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.send(body.unwrap_or_default().as_bytes())
            }
            (HttpMethod::Put, body) => {
                let mut r = self.agent.put(&req.url);
                for (name, value) in &req.headers {
                    r = r.header(name, value);
                }
                r.send(body.unwrap_or_default().as_bytes())
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

use crate::error::Result;
use gloo_net::http::Request;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back whatever the server said, whatever the
/// status. Only a missing response is an error at this level.
#[allow(async_fn_in_trait)]
pub trait Transport: Clone + 'static {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Browser `fetch` through gloo-net.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let response = match &request.body {
            Some(body) => builder.json(body)?.send().await?,
            None => builder.send().await?,
        };

        let status = response.status();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

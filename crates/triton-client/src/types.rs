//! Canonical request / response values shared by every dialect.

use std::time::Duration;

/// Transport used to reach the upstream server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Grpc,
    Http,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Grpc => "gRPC",
            Protocol::Http => "HTTP",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The normalized generation call every inbound dialect is reduced to.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// Generated text plus the numbers the outbound formatters report.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResponse {
    pub text: String,
    /// Whitespace-separated word count of `text`, not a tokenizer count.
    pub tokens: usize,
    /// Wall-clock time spent in the upstream inference call.
    pub elapsed: Duration,
}

impl InferenceResponse {
    pub fn new(text: String, elapsed: Duration) -> Self {
        let tokens = approximate_tokens(&text);
        Self {
            text,
            tokens,
            elapsed,
        }
    }
}

/// Approximate token count used by every dialect: whitespace-separated words.
pub fn approximate_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Upstream health signals, sampled fresh on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthSnapshot {
    pub live: bool,
    pub ready: bool,
    pub model_ready: bool,
}

impl HealthSnapshot {
    /// Server is both live and ready.
    pub fn is_ok(&self) -> bool {
        self.live && self.ready
    }

    /// Server is up and the configured model can take requests.
    pub fn is_serving(&self) -> bool {
        self.is_ok() && self.model_ready
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn token_approximation_splits_on_whitespace() {
        assert_eq!(approximate_tokens("4"), 1);
        assert_eq!(approximate_tokens("  two\twords\n"), 2);
        assert_eq!(approximate_tokens(""), 0);
    }

    #[test]
    fn response_counts_tokens() {
        let resp = InferenceResponse::new("the answer is 4".into(), Duration::ZERO);
        assert_eq!(resp.tokens, 4);
    }

    #[test]
    fn snapshot_requires_live_and_ready() {
        let live_only = HealthSnapshot {
            live: true,
            ready: false,
            model_ready: true,
        };
        assert!(!live_only.is_ok());
        assert!(!live_only.is_serving());

        let not_live = HealthSnapshot {
            live: false,
            ready: true,
            model_ready: true,
        };
        assert!(!not_live.is_serving());

        let all = HealthSnapshot {
            live: true,
            ready: true,
            model_ready: true,
        };
        assert!(all.is_serving());
    }

    #[test]
    fn protocol_names() {
        assert_eq!(Protocol::Grpc.to_string(), "gRPC");
        assert_eq!(Protocol::Http.to_string(), "HTTP");
    }
}

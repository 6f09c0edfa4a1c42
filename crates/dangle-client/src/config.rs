//! Client configuration types.

use std::num::NonZeroU32;
use std::time::Duration;

/// Transport timeouts and connection pool settings.
///
/// A zone audit is a single bounded pass, so these are the only limits on a
/// stuck request; there is no retry layer on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// TCP connect timeout
    pub connect: Duration,

    /// TLS handshake allowance, added on top of the connect timeout
    pub tls_handshake: Duration,

    /// Maximum wait for response data once the request is sent
    pub response_header: Duration,

    /// How long an idle pooled connection is kept
    pub idle_connection: Duration,

    /// TCP keep-alive interval
    pub keep_alive: Duration,

    /// Maximum idle connections kept per host
    pub max_idle_per_host: usize,

    /// Upper bound on a whole request, body included
    pub request: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportConfig {
    /// Create a transport configuration with conservative defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connect: Duration::from_secs(5),
            tls_handshake: Duration::from_secs(5),
            response_header: Duration::from_secs(5),
            idle_connection: Duration::from_secs(90),
            keep_alive: Duration::from_secs(30),
            max_idle_per_host: 10,
            request: Duration::from_secs(30),
        }
    }

    /// Set the TCP connect timeout
    #[must_use]
    pub const fn connect(mut self, duration: Duration) -> Self {
        self.connect = duration;
        self
    }

    /// Set the TLS handshake allowance
    #[must_use]
    pub const fn tls_handshake(mut self, duration: Duration) -> Self {
        self.tls_handshake = duration;
        self
    }

    /// Set the response header timeout
    #[must_use]
    pub const fn response_header(mut self, duration: Duration) -> Self {
        self.response_header = duration;
        self
    }

    /// Set the idle connection timeout
    #[must_use]
    pub const fn idle_connection(mut self, duration: Duration) -> Self {
        self.idle_connection = duration;
        self
    }

    /// Set the TCP keep-alive interval
    #[must_use]
    pub const fn keep_alive(mut self, duration: Duration) -> Self {
        self.keep_alive = duration;
        self
    }

    /// Set the idle pool size per host
    #[must_use]
    pub const fn max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = max;
        self
    }

    /// Set the overall request timeout
    #[must_use]
    pub const fn request(mut self, duration: Duration) -> Self {
        self.request = duration;
        self
    }

    /// Time allowed to establish a connection, TLS included
    #[must_use]
    pub fn connect_budget(&self) -> Duration {
        self.connect.saturating_add(self.tls_handshake)
    }
}

/// Client-side request rate limit.
///
/// The provider enforces a per-account request rate on its control plane;
/// staying under it avoids throttling errors aborting the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Sustained requests per second
    pub per_second: NonZeroU32,
}

impl RateLimit {
    /// Provider's documented limit: five requests per second per account
    pub const PROVIDER_DEFAULT: Self = Self {
        per_second: match NonZeroU32::new(5) {
            Some(n) => n,
            None => unreachable!(),
        },
    };

    /// A limit of `per_second` requests; `None` if zero
    #[must_use]
    pub fn per_second(per_second: u32) -> Option<Self> {
        NonZeroU32::new(per_second).map(|per_second| Self { per_second })
    }
}

impl Default for RateLimit {
    fn default() -> Self {
        Self::PROVIDER_DEFAULT
    }
}

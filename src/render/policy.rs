//! Request-filtering policy applied to a page's outgoing sub-requests.
//!
//! Every article fetch pays for the page's sub-resources, so sources block
//! non-essential resource classes and known tracking hosts to cut load time
//! and bandwidth. The policy is a plain value; the engine translates it into
//! whatever mechanism the rendering environment offers.

/// Classes of sub-resource a page may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Image,
    Stylesheet,
    Font,
    Media,
}

/// Tracking/ad hosts blocked by every filtering source.
pub const CORE_TRACKER_HOSTS: &[&str] = &[
    "google-analytics.com",
    "googletagmanager.com",
    "scorecardresearch.com",
    "chartbeat.com",
    "cxense.com",
    "adservice.google.com",
    "doubleclick.net",
];

/// Superset used by sources with heavier third-party embeds.
pub const EXTENDED_TRACKER_HOSTS: &[&str] = &[
    "google-analytics.com",
    "googletagmanager.com",
    "scorecardresearch.com",
    "chartbeat.com",
    "cxense.com",
    "adservice.google.com",
    "doubleclick.net",
    "facebook.net",
    "twitter.com",
    "googlesyndication.com",
    "vdo.ai",
];

/// Predicate over outgoing sub-requests: abort or continue.
#[derive(Debug, Clone)]
pub struct RequestFilterPolicy {
    blocked_resources: &'static [ResourceKind],
    blocked_hosts: &'static [&'static str],
}

impl RequestFilterPolicy {
    pub const fn new(
        blocked_resources: &'static [ResourceKind],
        blocked_hosts: &'static [&'static str],
    ) -> Self {
        Self {
            blocked_resources,
            blocked_hosts,
        }
    }

    /// A policy that lets every sub-request through.
    pub const fn permissive() -> Self {
        Self {
            blocked_resources: &[],
            blocked_hosts: &[],
        }
    }

    pub fn blocks_resource(&self, kind: ResourceKind) -> bool {
        self.blocked_resources.contains(&kind)
    }

    pub fn blocked_hosts(&self) -> &'static [&'static str] {
        self.blocked_hosts
    }

    /// Decides whether a sub-request should be aborted.
    ///
    /// A request is aborted when its resource class is blocked or its URL
    /// falls under one of the blocked hosts.
    pub fn should_abort(&self, kind: Option<ResourceKind>, url: &str) -> bool {
        if let Some(kind) = kind {
            if self.blocks_resource(kind) {
                return true;
            }
        }
        self.blocked_hosts.iter().any(|host| url.contains(host))
    }
}

use tracing::debug;

/// Answers whether backdrop effects may reference an SVG filter (`backdrop-filter: url(...)`).
pub trait CapabilityProvider {
    fn detect(&self) -> bool;
}

/// Environment that always supports SVG backdrop filters.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProbedTrue;

/// Environment that never supports SVG backdrop filters.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProbedFalse;

impl CapabilityProvider for ProbedTrue {
    fn detect(&self) -> bool {
        true
    }
}

impl CapabilityProvider for ProbedFalse {
    fn detect(&self) -> bool {
        false
    }
}

/// Low-level queries the heuristic needs from the hosting environment.
pub trait EnvironmentProbe {
    /// Whether a plain `backdrop-filter: blur(...)` is accepted at all.
    fn supports_backdrop_blur(&self) -> bool;

    /// Environment identification string (a browser user agent).
    fn user_agent(&self) -> Option<String>;

    /// Whether a `backdrop-filter: url(#...)` value survives assignment.
    fn accepts_backdrop_filter_url(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum BrowserFamily {
    Chromium,
    Firefox,
    WebKit,
    Unknown,
}

impl BrowserFamily {
    pub fn classify(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| ua.contains(n));

        let firefox = has(&["firefox", "fxios"]);
        let chromium = has(&["chrome", "chromium", "crios", "edg"]);

        if chromium && !firefox {
            Self::Chromium
        } else if firefox {
            Self::Firefox
        } else if has(&["safari"]) {
            Self::WebKit
        } else {
            Self::Unknown
        }
    }

    /// Known verdict for this family; `None` means the environment has to be probed.
    pub fn svg_backdrop_support(self) -> Option<bool> {
        match self {
            Self::Chromium => Some(true),
            Self::Firefox | Self::WebKit => Some(false),
            Self::Unknown => None,
        }
    }
}

/// Classifies the environment by its identification string, probing only unknown families.
#[derive(Clone, Debug)]
pub struct HeuristicByEnvironmentTag<P> {
    probe: P,
}

impl<P> HeuristicByEnvironmentTag<P> {
    pub const fn new(probe: P) -> Self {
        Self { probe }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }
}

impl<P: EnvironmentProbe> CapabilityProvider for HeuristicByEnvironmentTag<P> {
    fn detect(&self) -> bool {
        if !self.probe.supports_backdrop_blur() {
            debug!("backdrop blur unsupported");
            return false;
        }

        let family = self
            .probe
            .user_agent()
            .map_or(BrowserFamily::Unknown, |ua| BrowserFamily::classify(&ua));
        debug!(?family, "classified environment");

        family
            .svg_backdrop_support()
            .unwrap_or_else(|| self.probe.accepts_backdrop_filter_url())
    }
}

/// Fixed answers for an environment known ahead of time (server-side rendering, the CLI, tests).
#[derive(Clone, Debug, Default)]
pub struct StaticEnvironment {
    pub backdrop_blur: bool,
    pub user_agent: Option<String>,
    pub backdrop_filter_url: bool,
}

impl StaticEnvironment {
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            backdrop_blur: true,
            user_agent: Some(user_agent.into()),
            backdrop_filter_url: false,
        }
    }
}

impl EnvironmentProbe for StaticEnvironment {
    fn supports_backdrop_blur(&self) -> bool {
        self.backdrop_blur
    }

    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }

    fn accepts_backdrop_filter_url(&self) -> bool {
        self.backdrop_filter_url
    }
}

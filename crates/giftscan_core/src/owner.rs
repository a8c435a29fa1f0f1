use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Table header that precedes the owner cell on an item page.
pub const OWNER_MARKER: &str = "<th>Owner</th>";
/// How many characters after the marker are searched for the profile link.
pub const OWNER_WINDOW_CHARS: usize = 300;
pub const DEFAULT_PROFILE_HOST: &str = "t.me";
/// Rendering of [`Owner::Unknown`].
pub const UNKNOWN_OWNER: &str = "unknown";

// Built from constants only; `regex::escape` makes any host a valid literal.
static DEFAULT_PROFILE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    profile_link_pattern(DEFAULT_PROFILE_HOST).expect("escaped host always forms a valid pattern")
});

fn profile_link_pattern(host: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"<a href="https://{}/([A-Za-z0-9_]+)""#,
        regex::escape(host)
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    /// `@handle` of the owning profile.
    Handle(String),
    Unknown,
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Handle(handle) => f.write_str(handle),
            Owner::Unknown => f.write_str(UNKNOWN_OWNER),
        }
    }
}

pub trait OwnerExtractor: Send + Sync {
    fn extract(&self, content: &str) -> Owner;
}

/// Finds the first owner marker, then looks for a profile link only within the
/// next `window_chars` characters. Links further down the page never match.
#[derive(Debug, Clone)]
pub struct LabelWindowExtractor {
    marker: String,
    window_chars: usize,
    profile_link: Regex,
}

impl LabelWindowExtractor {
    pub fn new() -> Self {
        Self {
            marker: OWNER_MARKER.to_string(),
            window_chars: OWNER_WINDOW_CHARS,
            profile_link: DEFAULT_PROFILE_LINK.clone(),
        }
    }

    pub fn with_profile_host(host: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            profile_link: profile_link_pattern(host)?,
            ..Self::new()
        })
    }

    pub fn with_window(mut self, window_chars: usize) -> Self {
        self.window_chars = window_chars;
        self
    }

    fn window<'a>(&self, after_marker: &'a str) -> &'a str {
        let end = after_marker
            .char_indices()
            .nth(self.window_chars)
            .map(|(idx, _)| idx)
            .unwrap_or(after_marker.len());
        &after_marker[..end]
    }
}

impl Default for LabelWindowExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnerExtractor for LabelWindowExtractor {
    fn extract(&self, content: &str) -> Owner {
        let Some(pos) = content.find(&self.marker) else {
            return Owner::Unknown;
        };
        let window = self.window(&content[pos + self.marker.len()..]);
        match self.profile_link.captures(window).and_then(|caps| caps.get(1)) {
            Some(handle) => Owner::Handle(format!("@{}", handle.as_str())),
            None => Owner::Unknown,
        }
    }
}

//! Font registry and font-spec parsing.
//!
//! Fonts are loaded by the host application and injected into the
//! board; the core only needs the (name, size) pairs to resolve
//! persisted font strings and fall back when a font is unknown.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Family substituted when a requested font is not registered.
pub const FALLBACK_FONT_NAME: &str = "Arial";

/// Default font sizes registered for each family (8 to 72 in steps of 4).
pub const FAMILY_SIZES: std::ops::RangeInclusive<u32> = 8..=72;

/// A font reference: family name plus point size.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontSpec {
    pub name: String,
    pub size: u32,
}

impl FontSpec {
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// The fallback font at a given size.
    pub fn fallback(size: u32) -> Self {
        Self::new(FALLBACK_FONT_NAME, size)
    }

    /// Parse a persisted `"name size"` string. The size is the last
    /// whitespace-separated token, so multi-word family names survive.
    pub fn parse(spec: &str) -> Option<Self> {
        let (name, size) = spec.trim().rsplit_once(' ')?;
        let size = size.parse().ok()?;
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, size))
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.size)
    }
}

/// Registry of the (family, size) pairs the host has loaded.
///
/// Constructor-injected into the board rather than kept as a global
/// cache; resolution substitutes the fallback family at the requested
/// size instead of failing.
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    loaded: HashSet<(String, u32)>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single (family, size) pair.
    pub fn register(&mut self, name: &str, size: u32) {
        self.loaded.insert((name.to_string(), size));
    }

    /// Register a family at every standard size.
    pub fn register_family(&mut self, name: &str) {
        for size in FAMILY_SIZES.step_by(4) {
            self.register(name, size);
        }
    }

    /// Create a registry with the fallback family pre-registered.
    pub fn with_fallback() -> Self {
        let mut registry = Self::new();
        registry.register_family(FALLBACK_FONT_NAME);
        registry
    }

    pub fn contains(&self, name: &str, size: u32) -> bool {
        self.loaded.contains(&(name.to_string(), size))
    }

    /// Resolve a requested font, substituting the fallback family at
    /// the requested size when the font is not registered.
    pub fn resolve(&self, name: &str, size: u32) -> FontSpec {
        if self.contains(name, size) {
            FontSpec::new(name, size)
        } else {
            log::debug!("font {name:?} size {size} not loaded, substituting fallback");
            FontSpec::fallback(size)
        }
    }

    /// Resolve a persisted `"name size"` string; an unparseable string
    /// yields the fallback at the default toolbox size.
    pub fn resolve_spec(&self, spec: &str) -> FontSpec {
        match FontSpec::parse(spec) {
            Some(f) => self.resolve(&f.name, f.size),
            None => {
                log::warn!("unparseable font spec {spec:?}, using fallback");
                FontSpec::fallback(crate::tools::DEFAULT_TEXT_FONT_SIZE)
            }
        }
    }
}

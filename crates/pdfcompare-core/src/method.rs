//! Comparison methods and the capability set.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One comparison dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MethodKind {
    #[cfg_attr(feature = "serde", serde(rename = "text_comparison"))]
    Text,
    #[cfg_attr(feature = "serde", serde(rename = "visual_comparison"))]
    Visual,
    #[cfg_attr(feature = "serde", serde(rename = "structure_analysis"))]
    Structure,
    #[cfg_attr(feature = "serde", serde(rename = "metadata_comparison"))]
    Metadata,
}

impl MethodKind {
    /// Every method, in report order.
    pub const ALL: [MethodKind; 4] = [
        MethodKind::Text,
        MethodKind::Visual,
        MethodKind::Structure,
        MethodKind::Metadata,
    ];

    /// Key used for this method's result in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Text => "text_comparison",
            MethodKind::Visual => "visual_comparison",
            MethodKind::Structure => "structure_analysis",
            MethodKind::Metadata => "metadata_comparison",
        }
    }

    /// Name accepted on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            MethodKind::Text => "text",
            MethodKind::Visual => "visual",
            MethodKind::Structure => "structure",
            MethodKind::Metadata => "metadata",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown comparison method '{}' (expected text, visual, structure or metadata)",
            self.0
        )
    }
}

impl std::error::Error for UnknownMethod {}

impl FromStr for MethodKind {
    type Err = UnknownMethod;

    /// Accepts both the short name and the report key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MethodKind::ALL
            .into_iter()
            .find(|m| m.short_name() == s || m.as_str() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// The set of methods that can run in this environment.
///
/// Computed once per process by capability detection and handed to the
/// orchestrator; nothing downstream checks again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    available: BTreeSet<MethodKind>,
}

impl Capabilities {
    /// Every method available.
    pub fn all() -> Self {
        MethodKind::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, method: MethodKind) {
        self.available.insert(method);
    }

    pub fn contains(&self, method: MethodKind) -> bool {
        self.available.contains(&method)
    }

    /// Available methods in report order.
    pub fn iter(&self) -> impl Iterator<Item = MethodKind> + '_ {
        self.available.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

impl FromIterator<MethodKind> for Capabilities {
    fn from_iter<I: IntoIterator<Item = MethodKind>>(iter: I) -> Self {
        Self {
            available: iter.into_iter().collect(),
        }
    }
}

//! Detection of the comparison methods this environment can run.

use pdfcompare_core::{Capabilities, MethodKind};

use crate::rasterizer::{PDFTOPPM, Pdftoppm};

/// Detect available methods using the default `pdftoppm` lookup.
///
/// Text, structure and metadata comparison only need the built-in parser;
/// visual comparison needs `pdftoppm`.
pub fn detect_capabilities() -> Capabilities {
    detect_with(&Pdftoppm::default())
}

/// Detect available methods using a specific renderer.
pub fn detect_with(renderer: &Pdftoppm) -> Capabilities {
    let mut caps: Capabilities = [MethodKind::Text, MethodKind::Structure, MethodKind::Metadata]
        .into_iter()
        .collect();
    if renderer.is_available() {
        caps.insert(MethodKind::Visual);
    } else {
        tracing::info!("{PDFTOPPM} not found; visual comparison disabled");
    }
    caps
}

/// External dependency a method needs beyond the built-in parser.
pub fn dependency_of(method: MethodKind) -> &'static str {
    match method {
        MethodKind::Visual => PDFTOPPM,
        MethodKind::Text | MethodKind::Structure | MethodKind::Metadata => "lopdf",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_methods_always_available() {
        let caps = detect_with(&Pdftoppm::with_program("pdfcompare-no-such-renderer"));
        assert!(caps.contains(MethodKind::Text));
        assert!(caps.contains(MethodKind::Structure));
        assert!(caps.contains(MethodKind::Metadata));
        assert!(!caps.contains(MethodKind::Visual));
    }

    #[test]
    fn visual_depends_on_pdftoppm() {
        assert_eq!(dependency_of(MethodKind::Visual), "pdftoppm");
    }
}

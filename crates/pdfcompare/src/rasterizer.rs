//! Page rendering through the external `pdftoppm` tool.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use pdfcompare_core::{CompareError, ExtractionError, ExtractionFailure, MethodKind, Raster};

/// Name of the rendering tool, also used as the missing-dependency name.
pub const PDFTOPPM: &str = "pdftoppm";

/// Renders PDF pages to greyscale rasters with `pdftoppm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdftoppm {
    program: OsString,
}

impl Default for Pdftoppm {
    fn default() -> Self {
        Self {
            program: OsString::from(PDFTOPPM),
        }
    }
}

impl Pdftoppm {
    /// Use a specific executable instead of looking up `pdftoppm` on `PATH`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns `true` if the program can be started.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-v")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    /// Render every page of `pdf` at `dpi`, in page order.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::DependencyUnavailable`] if the program cannot
    /// be started, and an extraction error attributed to `pdf` if it fails
    /// or its output cannot be decoded.
    pub fn render(&self, pdf: &Path, dpi: u32) -> Result<Vec<Raster>, CompareError> {
        let unreadable =
            |detail: String| ExtractionError::new(pdf, ExtractionFailure::Unreadable, detail);
        let workdir = tempfile::tempdir().map_err(|e| unreadable(e.to_string()))?;
        let prefix = workdir.path().join("page");

        let output = Command::new(&self.program)
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-gray")
            .arg(pdf)
            .arg(&prefix)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    CompareError::DependencyUnavailable {
                        method: MethodKind::Visual,
                        dependency: PDFTOPPM.to_string(),
                    }
                }
                _ => unreadable(e.to_string()).into(),
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::new(
                pdf,
                ExtractionFailure::Corrupt,
                format!("{PDFTOPPM} exited with {}: {}", output.status, stderr.trim()),
            )
            .into());
        }

        // pdftoppm zero-pads page numbers, so name order is page order.
        let mut files: Vec<_> = std::fs::read_dir(workdir.path())
            .map_err(|e| unreadable(e.to_string()))?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "pgm"))
            .collect();
        files.sort();
        tracing::debug!(pdf = %pdf.display(), pages = files.len(), dpi, "rendered pages");

        files
            .iter()
            .map(|file| {
                load_page(file).map_err(|detail| {
                    CompareError::from(ExtractionError::new(
                        pdf,
                        ExtractionFailure::Unsupported,
                        detail,
                    ))
                })
            })
            .collect()
    }
}

/// Decode one rendered page image into an 8-bit greyscale raster.
pub fn load_page(file: &Path) -> Result<Raster, String> {
    let gray = image::open(file)
        .map_err(|e| format!("{}: {e}", file.display()))?
        .to_luma8();
    let (width, height) = gray.dimensions();
    Raster::new(width as usize, height as usize, gray.into_raw())
        .ok_or_else(|| format!("{}: pixel buffer does not match its size", file.display()))
}

/// Write an executable script standing in for `pdftoppm`.
///
/// The script body sees the real argument list: `-r DPI -gray PDF PREFIX`.
#[cfg(all(test, unix))]
pub(crate) fn fake_pdftoppm(dir: &Path, body: &str) -> Pdftoppm {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-pdftoppm");
    std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    Pdftoppm::with_program(script)
}

/// Renders two pages: a 2x1 black/white page and a 1x1 mid-grey page.
#[cfg(all(test, unix))]
pub(crate) const TWO_PAGE_SCRIPT: &str = r#"[ "$1" = "-r" ] && [ "$3" = "-gray" ] || exit 3
printf 'P5\n1 1\n255\n\200' > "$5-2.pgm"
printf 'P5\n2 1\n255\n\000\377' > "$5-1.pgm"
printf 'not a page' > "$5.txt""#;

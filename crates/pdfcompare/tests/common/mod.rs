//! Shared helpers for building fixture PDFs with lopdf.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, ObjectId, Stream, dictionary};

/// US Letter in points.
pub const LETTER: (i64, i64) = (612, 792);
/// A4 in points.
pub const A4: (i64, i64) = (595, 842);

/// Builder for small text PDFs where every line is its own text object.
#[derive(Debug, Default, Clone)]
pub struct TestPdf {
    pages: Vec<(Vec<String>, (i64, i64))>,
    info: Vec<(String, String)>,
}

impl TestPdf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a US Letter page with the given lines.
    pub fn page(self, lines: &[&str]) -> Self {
        self.sized_page(lines, LETTER)
    }

    pub fn sized_page(mut self, lines: &[&str], size: (i64, i64)) -> Self {
        self.pages
            .push((lines.iter().map(|l| l.to_string()).collect(), size));
        self
    }

    /// Set an /Info entry such as `Title` or `Author`.
    pub fn info(mut self, key: &str, value: &str) -> Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id: ObjectId = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids: Vec<Object> = Vec::new();
        for (lines, (width, height)) in &self.pages {
            let mut content = String::new();
            for (i, line) in lines.iter().enumerate() {
                let y = height - 72 - 14 * i as i64;
                content.push_str(&format!("BT /F1 12 Tf 72 {y} Td ({line}) Tj ET\n"));
            }
            let stream = Stream::new(dictionary! {}, content.into_bytes());
            let content_id = doc.add_object(Object::Stream(stream));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), (*width).into(), (*height).into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! {
                        "F1" => font_id,
                    },
                },
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.pages.len() as i64,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if !self.info.is_empty() {
            let mut info = lopdf::Dictionary::new();
            for (key, value) in &self.info {
                info.set(key.as_str(), Object::string_literal(value.as_str()));
            }
            let info_id = doc.add_object(Object::Dictionary(info));
            doc.trailer.set("Info", Object::Reference(info_id));
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }

    /// Write the PDF into `dir` and return its path.
    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.to_bytes()).expect("failed to write test PDF");
        path
    }
}

/// Write bytes that are not a PDF.
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not a pdf").expect("failed to write file");
    path
}

//! Document metadata and its comparison.
//!
//! Provides [`DocumentMetadata`] for the fields of the PDF /Info dictionary
//! and [`compare_metadata`], which checks them field by field alongside a
//! content hash of each file.

use std::collections::BTreeMap;

/// Document-level metadata extracted from the PDF /Info dictionary.
///
/// All fields are optional since PDFs may omit the /Info dictionary entirely
/// or include only a subset of fields. Dates are kept as raw PDF date strings
/// (`D:YYYYMMDDHHmmSSOHH'mm'`).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    /// Application that created the original document.
    pub creator: Option<String>,
    /// Application that produced the PDF.
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
}

impl DocumentMetadata {
    /// Returns `true` if all metadata fields are `None`.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }

    /// Every field paired with its /Info key, in a fixed order.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("title", self.title.as_deref()),
            ("author", self.author.as_deref()),
            ("subject", self.subject.as_deref()),
            ("keywords", self.keywords.as_deref()),
            ("creator", self.creator.as_deref()),
            ("producer", self.producer.as_deref()),
            ("creationDate", self.creation_date.as_deref()),
            ("modDate", self.mod_date.as_deref()),
        ]
    }
}

/// One /Info field in both files. Missing fields compare as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldComparison {
    pub pdf1: String,
    pub pdf2: String,
    pub identical: bool,
}

/// Content hashes of both files.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileHashComparison {
    pub pdf1: String,
    pub pdf2: String,
    pub identical: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataComparison {
    /// `true` if every metadata field matches. The file hash is reported
    /// separately and does not take part.
    pub identical: bool,
    pub file_hash: FileHashComparison,
    pub metadata: BTreeMap<String, FieldComparison>,
}

/// Compare /Info fields and file hashes of two documents.
pub fn compare_metadata(
    old: &DocumentMetadata,
    old_hash: &str,
    new: &DocumentMetadata,
    new_hash: &str,
) -> MetadataComparison {
    let metadata: BTreeMap<String, FieldComparison> = old
        .fields()
        .iter()
        .zip(new.fields().iter())
        .map(|((key, a), (_, b))| {
            let pdf1 = a.unwrap_or_default().to_string();
            let pdf2 = b.unwrap_or_default().to_string();
            let identical = pdf1 == pdf2;
            (
                (*key).to_string(),
                FieldComparison {
                    pdf1,
                    pdf2,
                    identical,
                },
            )
        })
        .collect();

    MetadataComparison {
        identical: metadata.values().all(|f| f.identical),
        file_hash: FileHashComparison {
            pdf1: old_hash.to_string(),
            pdf2: new_hash.to_string(),
            identical: old_hash == new_hash,
        },
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> DocumentMetadata {
        DocumentMetadata {
            title: Some(title.to_string()),
            producer: Some("pdfcompare".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn default_metadata_is_empty() {
        let meta = DocumentMetadata::default();
        assert!(meta.is_empty());
        assert!(meta.fields().iter().all(|(_, v)| v.is_none()));
    }

    #[test]
    fn metadata_with_partial_fields() {
        let meta = titled("Only Title");
        assert!(!meta.is_empty());
        assert_eq!(meta.fields()[0], ("title", Some("Only Title")));
        assert_eq!(meta.fields()[1], ("author", None));
    }

    #[test]
    fn identical_metadata_different_hash() {
        let result = compare_metadata(&titled("Report"), "aaa", &titled("Report"), "bbb");
        assert!(result.identical);
        assert!(!result.file_hash.identical);
        assert_eq!(result.metadata.len(), 8);
    }

    #[test]
    fn changed_title_is_reported() {
        let result = compare_metadata(&titled("v1"), "h", &titled("v2"), "h");
        assert!(!result.identical);
        assert!(result.file_hash.identical);
        let title = &result.metadata["title"];
        assert_eq!(title.pdf1, "v1");
        assert_eq!(title.pdf2, "v2");
        assert!(!title.identical);
        assert!(result.metadata["producer"].identical);
    }

    #[test]
    fn missing_field_equals_empty_field() {
        let a = DocumentMetadata::default();
        let b = DocumentMetadata {
            author: Some(String::new()),
            ..Default::default()
        };
        assert!(compare_metadata(&a, "h", &b, "h").identical);
    }

    #[test]
    fn missing_field_versus_value() {
        let a = DocumentMetadata::default();
        let b = DocumentMetadata {
            author: Some("Jane".to_string()),
            ..Default::default()
        };
        let result = compare_metadata(&a, "h", &b, "h");
        assert!(!result.identical);
        assert_eq!(result.metadata["author"].pdf1, "");
        assert_eq!(result.metadata["author"].pdf2, "Jane");
    }
}

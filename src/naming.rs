//! Storage name generation
//!
//! Every stored upload and generated audio file is keyed by a random UUID so
//! concurrent requests never write to the same path.

use std::path::Path;

use uuid::Uuid;

/// Generate a unique file name, keeping the extension of `original` if any
///
/// `Some("Report.PDF")` yields `"<uuid>.PDF"`; `None` or an extension-less
/// name yields the bare UUID.
pub fn generate_unique_filename(original: Option<&str>) -> String {
    let extension = original
        .map(Path::new)
        .and_then(|p| p.extension())
        .and_then(|ext| ext.to_str());

    match extension {
        Some(ext) => generate_name_with_extension(ext),
        None => Uuid::new_v4().to_string(),
    }
}

/// Generate a unique file name with the given extension (without the dot)
pub fn generate_name_with_extension(extension: &str) -> String {
    if extension.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        format!("{}.{}", Uuid::new_v4(), extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keeps_extension() {
        let name = generate_unique_filename(Some("chapter one.pdf"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(name.len(), 36 + ".pdf".len());
        assert!(Uuid::parse_str(&name[..36]).is_ok());
    }

    #[test]
    fn test_extension_case_preserved() {
        assert!(generate_unique_filename(Some("SCAN.PDF")).ends_with(".PDF"));
    }

    #[test]
    fn test_without_extension() {
        let name = generate_unique_filename(None);
        assert!(Uuid::parse_str(&name).is_ok());

        let name = generate_unique_filename(Some("README"));
        assert!(Uuid::parse_str(&name).is_ok());
    }

    #[test]
    fn test_with_extension() {
        assert!(generate_name_with_extension("wav").ends_with(".wav"));
        assert!(Uuid::parse_str(&generate_name_with_extension("")).is_ok());
    }

    #[test]
    fn test_names_are_distinct() {
        let names: HashSet<String> = (0..1000)
            .map(|_| generate_unique_filename(Some("a.wav")))
            .collect();
        assert_eq!(names.len(), 1000);
    }
}

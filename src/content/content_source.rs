use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use std::{fs, io};

/// Where post files come from.
///
/// `list_content_files` returns file names (not paths) with the given extension,
/// `read_content` reads one of them fully as UTF-8 text.
pub trait ContentSource {
    fn list_content_files(&self, dir: &Path, extension: &str) -> io::Result<Vec<String>>;
    fn read_content(&self, dir: &Path, name: &str) -> io::Result<String>;
}

/// Reads posts straight from a directory. Subdirectories are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsContentSource;

impl ContentSource for FsContentSource {
    fn list_content_files(&self, dir: &Path, extension: &str) -> io::Result<Vec<String>> {
        let suffix = format!(".{}", extension);
        let mut names = vec![];
        for entry in fs::read_dir(dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }
            if let Some(file_name) = entry.file_name().to_str() {
                if file_name.ends_with(&suffix) {
                    names.push(file_name.to_string());
                }
            }
        }

        // read_dir order depends on the platform
        names.sort();
        Ok(names)
    }

    fn read_content(&self, dir: &Path, name: &str) -> io::Result<String> {
        fs::read_to_string(dir.join(name))
    }
}

/// In-memory set of files keyed by name. The directory argument is ignored.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentSource {
    files: BTreeMap<String, String>,
}

impl MemoryContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: &str, content: &str) -> Self {
        self.files.insert(name.to_string(), content.to_string());
        self
    }
}

impl ContentSource for MemoryContentSource {
    fn list_content_files(&self, _dir: &Path, extension: &str) -> io::Result<Vec<String>> {
        let suffix = format!(".{}", extension);
        Ok(self.files.keys()
            .filter(|name| name.ends_with(&suffix))
            .cloned()
            .collect())
    }

    fn read_content(&self, _dir: &Path, name: &str) -> io::Result<String> {
        match self.files.get(name) {
            Some(content) => Ok(content.clone()),
            None => Err(io::Error::new(ErrorKind::NotFound, format!("No content named {}", name))),
        }
    }
}

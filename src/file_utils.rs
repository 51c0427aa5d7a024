use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::chunking::ContentKind;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string, decoding as Latin-1 when it is not valid UTF-8
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("Failed to read file: {:?}", path))?;

        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(e) => {
                warn!("{:?} is not valid UTF-8, decoding as Latin-1", path);
                Ok(e.into_bytes().iter().map(|&b| char::from(b)).collect())
            }
        }
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Lowercased extension of a path including the dot, or "" when there is none
    pub fn extension_of<P: AsRef<Path>>(path: P) -> String {
        path.as_ref()
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }

    /// Check if content appears to be JSON (trimmed, wrapped in {} or [])
    pub fn is_json_content(content: &str) -> bool {
        let content = content.trim();
        (content.starts_with('{') && content.ends_with('}'))
            || (content.starts_with('[') && content.ends_with(']'))
    }

    /// Decide whether a file should be chunked as JSON or as text
    pub fn detect_content_kind<P: AsRef<Path>>(path: P, content: &str) -> ContentKind {
        let extension = Self::extension_of(path);
        if extension == ".json" || (!extension.is_empty() && Self::is_json_content(content)) {
            ContentKind::Json
        } else {
            ContentKind::Text
        }
    }

    /// Name of chunk `index` (1-based) out of `total`: `<stem>-<NN><ext>`
    pub fn chunk_file_name(stem: &str, index: usize, total: usize, extension: &str) -> String {
        let width = total.max(1).to_string().len();
        format!("{}-{:0width$}{}", stem, index, extension, width = width)
    }

    /// Write chunks next to `input_path`, or into `output_dir` when given.
    ///
    /// Either every chunk is written or, on failure, the files already
    /// written by this call are removed again.
    pub fn write_chunks<F>(
        chunks: &[String],
        input_path: &Path,
        output_dir: Option<&Path>,
        mut on_written: F,
    ) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&Path),
    {
        let output_dir = match output_dir {
            Some(dir) => {
                Self::ensure_dir(dir)?;
                dir.to_path_buf()
            }
            None => input_path.parent().unwrap_or(Path::new("")).to_path_buf(),
        };

        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "chunk".to_string());
        let extension = Self::extension_of(input_path);

        let mut written = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            let path = output_dir.join(Self::chunk_file_name(&stem, i + 1, chunks.len(), &extension));

            if let Err(e) = fs::write(&path, chunk) {
                for done in &written {
                    if let Err(cleanup) = fs::remove_file(done) {
                        warn!("Failed to remove partial output {:?}: {}", done, cleanup);
                    }
                }
                return Err(e).with_context(|| format!("Failed to write chunk file: {:?}", path));
            }

            debug!("Wrote {:?} ({} bytes)", path, chunk.len());
            on_written(&path);
            written.push(path);
        }

        Ok(written)
    }
}

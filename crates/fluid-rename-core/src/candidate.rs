use std::cell::OnceCell;
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Number of bytes inspected when sniffing a file.
pub const PREFIX_LENGTH: u64 = 1024;

/// Extension segment that marks a file as a Fluid template.
pub const MARKER: &str = "fluid";

/// A file found in the package that might need the marker extension.
#[derive(Debug)]
pub struct CandidateFile {
    path: PathBuf,
    size: u64,
    prefix: OnceCell<Vec<u8>>,
}

impl CandidateFile {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            prefix: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn directory(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// File name without its last extension.
    pub fn basename(&self) -> Option<&OsStr> {
        self.path.file_stem()
    }

    pub fn extension(&self) -> Option<&OsStr> {
        self.path.extension()
    }

    /// `dir/name.ext` becomes `dir/name.fluid.ext`; files without extension have no marked form.
    pub fn marked_path(&self) -> Option<PathBuf> {
        let basename = self.basename()?;
        let extension = self.extension()?;

        let mut file_name = OsString::with_capacity(basename.len() + extension.len() + MARKER.len() + 2);
        file_name.push(basename);
        file_name.push(".");
        file_name.push(MARKER);
        file_name.push(".");
        file_name.push(extension);

        Some(match self.directory() {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        })
    }

    /// First [`PREFIX_LENGTH`] bytes of the file, read once and cached.
    pub fn prefix(&self) -> io::Result<&[u8]> {
        if let Some(prefix) = self.prefix.get() {
            return Ok(prefix);
        }
        let mut buffer = Vec::with_capacity(PREFIX_LENGTH as usize);
        File::open(&self.path)?
            .take(PREFIX_LENGTH)
            .read_to_end(&mut buffer)?;
        Ok(self.prefix.get_or_init(|| buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_name_parts() {
        let file = CandidateFile::new("/pkg/Resources/Private/Templates/List.tar.html", 10);
        assert_eq!(file.basename(), Some(OsStr::new("List.tar")));
        assert_eq!(file.extension(), Some(OsStr::new("html")));
        assert_eq!(
            file.directory(),
            Some(Path::new("/pkg/Resources/Private/Templates"))
        );
    }

    #[test]
    fn test_marked_path() {
        let marked = |path: &str| CandidateFile::new(path, 1).marked_path();
        assert_eq!(
            marked("/pkg/Templates/Default.html"),
            Some(PathBuf::from("/pkg/Templates/Default.fluid.html"))
        );
        assert_eq!(
            marked("/pkg/Mail.de.txt"),
            Some(PathBuf::from("/pkg/Mail.de.fluid.txt"))
        );
        assert_eq!(marked("Default.html"), Some(PathBuf::from("Default.fluid.html")));
        assert_eq!(marked("/pkg/Makefile"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_marked_path_keeps_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let file = CandidateFile::new(Path::new(OsStr::from_bytes(b"/pkg/Caf\xe9.html")), 1);
        let marked = file.marked_path().unwrap();
        assert_eq!(marked.as_os_str().as_bytes(), b"/pkg/Caf\xe9.fluid.html");
    }

    #[test]
    fn test_prefix_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Large.html");
        fs::write(&path, "x".repeat(4096)).unwrap();

        let file = CandidateFile::new(&path, 4096);
        assert_eq!(file.prefix().unwrap().len(), PREFIX_LENGTH as usize);
    }

    #[test]
    fn test_prefix_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Small.html");
        fs::write(&path, "<f:render />").unwrap();

        let file = CandidateFile::new(&path, 12);
        assert_eq!(file.prefix().unwrap(), b"<f:render />");

        fs::remove_file(&path).unwrap();
        assert_eq!(file.prefix().unwrap(), b"<f:render />");
    }
}

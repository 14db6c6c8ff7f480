use tracing::debug;

use crate::candidate::CandidateFile;
use crate::sniffer::TemplateSniffer;
use crate::Result;

/// Candidates split by sniffing result, each in enumeration order.
#[derive(Debug, Default)]
pub struct Classification {
    pub detected: Vec<CandidateFile>,
    pub unconfirmed: Vec<CandidateFile>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.detected.is_empty() && self.unconfirmed.is_empty()
    }
}

pub fn classify<I>(files: I, sniffer: &TemplateSniffer) -> Result<Classification>
where
    I: IntoIterator<Item = CandidateFile>,
{
    let mut result = Classification::default();

    for file in files {
        if file.size() == 0 {
            debug!("Skipping empty file: {:?}", file.path());
            continue;
        }
        if sniffer.is_template(file.prefix()?) {
            debug!("Detected template: {:?}", file.path());
            result.detected.push(file);
        } else {
            debug!("Unconfirmed template: {:?}", file.path());
            result.unconfirmed.push(file);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn candidate(dir: &Path, name: &str, content: &str) -> CandidateFile {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        CandidateFile::new(path, content.len() as u64)
    }

    fn names(files: &[CandidateFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path().file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_partition_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            candidate(dir.path(), "A.html", "<div>a</div>"),
            candidate(dir.path(), "B.html", "<f:layout name=\"Default\" />"),
            candidate(dir.path(), "C.html", "plain"),
            candidate(dir.path(), "D.html", "{f:translate(key: 'x')}"),
        ];

        let result = classify(files, &TemplateSniffer::new().unwrap()).unwrap();

        assert_eq!(names(&result.detected), vec!["B.html", "D.html"]);
        assert_eq!(names(&result.unconfirmed), vec!["A.html", "C.html"]);
    }

    #[test]
    fn test_empty_files_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            candidate(dir.path(), "Empty.html", ""),
            candidate(dir.path(), "Layout.html", "<f:render section=\"Main\" />"),
            candidate(dir.path(), "Empty.txt", ""),
            candidate(dir.path(), "Note.txt", "hello"),
        ];
        let total = files.len();

        let result = classify(files, &TemplateSniffer::new().unwrap()).unwrap();

        assert_eq!(result.detected.len() + result.unconfirmed.len() + 2, total);
        assert!(result
            .detected
            .iter()
            .chain(result.unconfirmed.iter())
            .all(|f| f.size() > 0));
    }

    #[test]
    fn test_zero_size_file_is_never_read() {
        let file = CandidateFile::new("/does/not/exist.html", 0);
        let result = classify(vec![file], &TemplateSniffer::new().unwrap()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let file = CandidateFile::new("/does/not/exist.html", 10);
        assert!(classify(vec![file], &TemplateSniffer::new().unwrap()).is_err());
    }
}

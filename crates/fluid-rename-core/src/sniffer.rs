use regex::bytes::Regex;
use tracing::debug;

/// Namespace URI prefix shared by all Fluid ViewHelper namespaces.
pub const NAMESPACE_PREFIX: &str = "http://typo3.org/ns/";

/// Decides from the first bytes of a file whether it is a Fluid template.
///
/// The checks are shallow on purpose: a false negative only moves the file
/// into the batch that the user reviews by hand.
pub struct TemplateSniffer {
    patterns: Vec<(&'static str, Regex)>,
}

impl TemplateSniffer {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = vec![
            ("xmlns namespace", Regex::new(&regex::escape(NAMESPACE_PREFIX))?),
            (
                "namespace declaration",
                Regex::new(
                    r"(?:\A|(?-u:[^\\]))\{namespace\s*[a-zA-Z*]+[a-zA-Z0-9.*]*\s*(?:=\s*(?:[A-Za-z0-9.]+|Tx)(?:\\\w+)+\s*)?\}",
                )?,
            ),
            ("inline viewhelper", Regex::new(r"\{f:[a-zA-Z0-9.]+\(")?),
            ("tag viewhelper", Regex::new(r"<f:[a-zA-Z0-9.]+[\s>]")?),
        ];
        Ok(Self { patterns })
    }

    pub fn is_template(&self, prefix: &[u8]) -> bool {
        for (name, pattern) in &self.patterns {
            if pattern.is_match(prefix) {
                debug!("Template marker matched: {}", name);
                return true;
            }
        }
        false
    }
}

//! Record filtering ahead of tree insertion

use crate::config::ReportConfig;
use crate::record::{Record, split_path};

/// Drops records outside the configured path prefix or owned by other users.
///
/// Prefix matching is segment-wise: `/data/pro` does not match
/// `/data/projects/x`.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    prefix: Vec<String>,
    user: Option<String>,
}

impl RecordFilter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            prefix: config
                .path_filter
                .as_deref()
                .map(split_path)
                .unwrap_or_default(),
            user: config.user_filter.clone(),
        }
    }

    /// Name of the tree root: the normalized prefix, or `/`.
    pub fn root_name(&self) -> String {
        format!("/{}", self.prefix.join("/"))
    }

    /// Segments of `record` below the prefix, or `None` if it is filtered out.
    pub fn relative_path<'r>(&self, record: &'r Record) -> Option<&'r [String]> {
        if self.user.as_ref().is_some_and(|u| *u != record.owner) {
            return None;
        }
        record.path.strip_prefix(self.prefix.as_slice())
    }

    pub fn accepts(&self, record: &Record) -> bool {
        self.relative_path(record).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(path: Option<&str>, user: Option<&str>) -> RecordFilter {
        RecordFilter::new(&ReportConfig {
            path_filter: path.map(str::to_string),
            user_filter: user.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn test_no_filter_accepts_everything() {
        let f = filter(None, None);
        let record = Record::new("/a/b", 1, "u");
        assert_eq!(f.root_name(), "/");
        assert_eq!(f.relative_path(&record).unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_prefix_is_segment_wise() {
        let f = filter(Some("/data/projects/"), None);
        assert_eq!(f.root_name(), "/data/projects");
        assert_eq!(
            f.relative_path(&Record::new("/data/projects/x/y", 1, "u"))
                .unwrap(),
            ["x", "y"]
        );
        assert!(f.relative_path(&Record::new("/data/projects", 1, "u")).unwrap().is_empty());
        assert!(!f.accepts(&Record::new("/data/pro", 1, "u")));
        assert!(!f.accepts(&Record::new("/data/projectsX/y", 1, "u")));
        assert!(!f.accepts(&Record::new("/other", 1, "u")));
    }

    #[test]
    fn test_user_filter() {
        let f = filter(None, Some("alice"));
        assert!(f.accepts(&Record::new("/a", 1, "alice")));
        assert!(!f.accepts(&Record::new("/a", 1, "bob")));
    }

    #[test]
    fn test_combined_filters() {
        let f = filter(Some("/home"), Some("alice"));
        assert!(f.accepts(&Record::new("/home/alice/x", 1, "alice")));
        assert!(!f.accepts(&Record::new("/home/alice/x", 1, "bob")));
        assert!(!f.accepts(&Record::new("/tmp/x", 1, "alice")));
    }
}

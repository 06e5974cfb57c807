//! Tolerant parser for the bracketed-section `.cfg` dialect.
//!
//! ```text
//! # comment
//! [BaseCurve]
//! type = CurveBuilder
//! tenor = 10Y
//!
//! [Analytics]          <- skipped, as is any `[Scope::Name]`
//! level = debug
//! ```
//!
//! Parsing never fails on malformed lines; anything that is not a header or a
//! `key=value` pair inside an active section is a no-op.

use std::io;
use std::path::Path;
use std::str::Lines;

use crate::config::ParserConfig;
use crate::fs_utils::read_source_lossy;
use crate::types::FunctorRecord;

/// Section-filtering rules applied while reading a file.
#[derive(Clone, Debug)]
pub struct ConfigParser {
    comment_markers: Vec<String>,
    namespace_separator: String,
    ignored_sections: Vec<String>,
}

impl Default for ConfigParser {
    fn default() -> Self {
        Self::from_config(&ParserConfig::default())
    }
}

impl ConfigParser {
    pub fn from_config(config: &ParserConfig) -> Self {
        Self {
            comment_markers: config
                .comment_markers
                .iter()
                .filter(|m| !m.is_empty())
                .cloned()
                .collect(),
            namespace_separator: config.namespace_separator.clone(),
            ignored_sections: config
                .ignored_sections
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// Lazily iterate the functor records of `content`. Each call starts over.
    pub fn sections<'a>(&'a self, content: &'a str, source_file: &'a Path) -> Sections<'a> {
        Sections {
            parser: self,
            lines: content.lines(),
            source_file,
            current: None,
            done: false,
        }
    }

    /// Read `path` once and collect its records.
    pub fn parse_file(&self, path: &Path) -> io::Result<Vec<FunctorRecord>> {
        let content = read_source_lossy(path)?;
        Ok(self.sections(&content, path).collect())
    }

    fn is_comment(&self, line: &str) -> bool {
        self.comment_markers.iter().any(|m| line.starts_with(m.as_str()))
    }

    /// `false` for headers whose following lines must be discarded.
    fn is_functor_header(&self, name: &str) -> bool {
        if !self.namespace_separator.is_empty() && name.contains(&self.namespace_separator) {
            return false;
        }
        let lowered = name.to_lowercase();
        !self.ignored_sections.iter().any(|s| *s == lowered)
    }
}

enum Line<'a> {
    Skip,
    Header(&'a str),
    Assignment(&'a str, &'a str),
}

fn classify<'a>(parser: &ConfigParser, raw: &'a str) -> Line<'a> {
    let line = raw.trim();
    if line.is_empty() || parser.is_comment(line) {
        return Line::Skip;
    }
    if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
        return Line::Header(line[1..line.len() - 1].trim());
    }
    match line.split_once('=') {
        Some((key, value)) => Line::Assignment(key.trim(), value.trim()),
        None => Line::Skip,
    }
}

/// Iterator returned by [`ConfigParser::sections`].
pub struct Sections<'a> {
    parser: &'a ConfigParser,
    lines: Lines<'a>,
    source_file: &'a Path,
    current: Option<FunctorRecord>,
    done: bool,
}

impl Iterator for Sections<'_> {
    type Item = FunctorRecord;

    fn next(&mut self) -> Option<FunctorRecord> {
        if self.done {
            return None;
        }
        // A filtered header closes the previous record without opening a new one.
        for raw in self.lines.by_ref() {
            match classify(self.parser, raw) {
                Line::Skip => {}
                Line::Header(name) => {
                    let next = if self.parser.is_functor_header(name) {
                        Some(FunctorRecord::new(name, self.source_file))
                    } else {
                        None
                    };
                    let finished = std::mem::replace(&mut self.current, next);
                    if finished.is_some() {
                        return finished;
                    }
                }
                Line::Assignment(key, value) => {
                    if let Some(record) = self.current.as_mut() {
                        record
                            .properties
                            .insert_if_absent(key.to_lowercase(), value);
                    }
                }
            }
        }
        self.done = true;
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(content: &str) -> Vec<FunctorRecord> {
        let parser = ConfigParser::default();
        let path = PathBuf::from("deal.cfg");
        parser.sections(content, &path).collect()
    }

    #[test]
    fn reads_sections_in_order() {
        let records = parse(
            "[A]\ntype = Foo\nx = 1\n\n[B]\ntype=Bar\n[C]\ntype = Foo\n",
        );
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(records[0].properties.get("x"), Some("1"));
        assert_eq!(records[1].calculator_type(), Some("Bar"));
        assert_eq!(records[0].source_file, PathBuf::from("deal.cfg"));
    }

    #[test]
    fn empty_section_is_still_yielded() {
        let records = parse("[Lonely]\n");
        assert_eq!(records.len(), 1);
        assert!(records[0].properties.is_empty());
    }

    #[test]
    fn empty_file_yields_nothing() {
        assert!(parse("").is_empty());
        assert!(parse("\n  \n# only a comment\n").is_empty());
    }

    #[test]
    fn namespaced_and_analytics_sections_swallow_their_lines() {
        let records = parse(
            "[Foo::Bar]\ntype = Foo\n[ANALYTICS]\nlevel = 3\n[Real]\ntype = Foo\n",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Real");
        assert!(!records[0].properties.contains_key("level"));
    }

    #[test]
    fn filtered_header_closes_previous_section() {
        let records = parse("[A]\ntype = Foo\n[analytics]\nx = 9\n");
        assert_eq!(records.len(), 1);
        assert!(!records[0].properties.contains_key("x"));
    }

    #[test]
    fn first_declaration_of_a_key_wins() {
        let records = parse("[A]\na=1\nA = 2\na=3\n");
        assert_eq!(records[0].properties.get("a"), Some("1"));
        assert_eq!(records[0].properties.len(), 1);
    }

    #[test]
    fn keys_are_lowercased_and_split_on_first_equals() {
        let records = parse("[A]\n  Expr = x=y+1  \n");
        assert_eq!(records[0].properties.get("expr"), Some("x=y+1"));
    }

    #[test]
    fn assignments_before_any_header_are_ignored() {
        let records = parse("orphan = 1\n[A]\ntype = Foo\n");
        assert_eq!(records.len(), 1);
        assert!(!records[0].properties.contains_key("orphan"));
    }

    #[test]
    fn garbage_lines_are_no_ops() {
        let records = parse("[A]\nthis is not a pair\n[unclosed\ntype = Foo\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].calculator_type(), Some("Foo"));
    }

    #[test]
    fn sections_iterator_is_restartable() {
        let parser = ConfigParser::default();
        let path = PathBuf::from("x.cfg");
        let content = "[A]\n[B]\n";
        assert_eq!(parser.sections(content, &path).count(), 2);
        assert_eq!(parser.sections(content, &path).count(), 2);
    }

    #[test]
    fn n_plain_sections_give_n_records() {
        let content: String = (0..25).map(|i| format!("[S{i}]\nk = {i}\n")).collect();
        assert_eq!(parse(&content).len(), 25);
    }

    #[test]
    fn custom_comment_markers() {
        let config = ParserConfig {
            comment_markers: vec!["#".into(), ";".into()],
            ..ParserConfig::default()
        };
        let parser = ConfigParser::from_config(&config);
        let path = PathBuf::from("x.cfg");
        let records: Vec<_> = parser.sections("[A]\n; k = 1\n", &path).collect();
        assert!(records[0].properties.is_empty());
    }

    #[test]
    fn parse_file_reads_from_disk() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("deal.cfg");
        std::fs::write(&path, "[A]\ntype = Foo\n").expect("write cfg");

        let records = ConfigParser::default().parse_file(&path).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_file, path);
    }

    #[test]
    fn invalid_utf8_comment_does_not_lose_the_file() {
        let temp = tempfile::TempDir::new().expect("temp dir");
        let path = temp.path().join("legacy.cfg");
        std::fs::write(&path, b"# Deal caf\xE9\n[A]\ntype=Foo\nx=1\n").expect("write cfg");

        let records = ConfigParser::default().parse_file(&path).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].properties.get("x"), Some("1"));
    }
}

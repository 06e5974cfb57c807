use regex::Regex;

use crate::types::DefaultLiteral;

use super::regexes::{regex_init_routine, regex_settings_accessor};
use super::scanner::scan_body;

/// Pulls `(property, default)` pairs out of an implementation's `init` routine.
pub struct DefaultsExtractor {
    accessor: Regex,
    literal: DefaultLiteral,
}

impl DefaultsExtractor {
    pub fn new(tag_variable: &str, literal: DefaultLiteral) -> Self {
        Self {
            accessor: regex_settings_accessor(tag_variable),
            literal,
        }
    }

    pub fn extract(&self, content: &str) -> Vec<(String, String)> {
        scan_body(content, regex_init_routine(), &self.accessor, |caps| {
            let name = caps.get(1)?.as_str().trim().to_string();
            let default = caps
                .get(2)
                .map(|m| self.normalise(m.as_str()))
                .unwrap_or_default();
            Some((name, default))
        })
    }

    fn normalise(&self, raw: &str) -> String {
        let literal = raw.trim();
        match self.literal {
            DefaultLiteral::Verbatim => literal.to_string(),
            DefaultLiteral::ZeroAsAbsent if is_numeric_zero(literal) => String::new(),
            DefaultLiteral::ZeroAsAbsent => literal.to_string(),
        }
    }
}

/// `0`, `0.0`, `-0`, `0.` but not `"0"` or `0x0`.
fn is_numeric_zero(literal: &str) -> bool {
    literal
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-')
        && literal.parse::<f64>().is_ok_and(|v| v == 0.0)
}

/// Key a native file stem the way `type=` values are compared:
/// `DurationCalculator` -> `duration`.
pub fn implementation_key(stem: &str, suffix: &str) -> String {
    let lowered = stem.to_lowercase();
    let suffix = suffix.to_lowercase();
    match lowered.strip_suffix(suffix.as_str()) {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => lowered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMPL_CPP: &str = r#"
DurationCalculator::DurationCalculator() {}

void DurationCalculator::init(const Config& cfg)
{
    m_model = vm->GetStringSetting(m_cfgTag + ".model", "flat");
    if (cfg.verbose()) {
        m_shift = vm->GetDoubleSetting(m_cfgTag + ".shift", 0.0001);
    }
    m_steps = vm->GetIntSetting(m_cfgTag + ".steps", 0);
    m_label = vm->GetStringSetting(m_cfgTag + ".label", 'n');
    m_curve = vm->GetStringSetting(m_cfgTag + ".curve");
    m_other = vm->GetStringSetting(otherTag + ".ignored", "x");
}

double DurationCalculator::calc() {
    return vm->GetDoubleSetting(m_cfgTag + ".late", 1.0);
}
"#;

    fn pairs(literal: DefaultLiteral) -> Vec<(String, String)> {
        DefaultsExtractor::new("m_cfgTag", literal).extract(IMPL_CPP)
    }

    #[test]
    fn extracts_settings_from_init_only() {
        let found = pairs(DefaultLiteral::Verbatim);
        let names: Vec<_> = found.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["model", "shift", "steps", "label", "curve"]);
    }

    #[test]
    fn verbatim_keeps_literals_and_zero() {
        let found = pairs(DefaultLiteral::Verbatim);
        assert_eq!(found[0].1, "\"flat\"");
        assert_eq!(found[1].1, "0.0001");
        assert_eq!(found[2].1, "0");
        assert_eq!(found[3].1, "'n'");
        assert_eq!(found[4].1, "");
    }

    #[test]
    fn zero_as_absent_blanks_numeric_zero() {
        let found = pairs(DefaultLiteral::ZeroAsAbsent);
        assert_eq!(found[1].1, "0.0001");
        assert_eq!(found[2].1, "");
        assert_eq!(found[0].1, "\"flat\"");
    }

    #[test]
    fn numeric_zero_detection() {
        assert!(is_numeric_zero("0"));
        assert!(is_numeric_zero("0.0"));
        assert!(is_numeric_zero("-0"));
        assert!(!is_numeric_zero("\"0\""));
        assert!(!is_numeric_zero("0x0"));
        assert!(!is_numeric_zero("10"));
    }

    #[test]
    fn file_without_init_yields_nothing() {
        let extractor = DefaultsExtractor::new("m_cfgTag", DefaultLiteral::Verbatim);
        assert!(extractor.extract("class Foo { int x; };").is_empty());
    }

    #[test]
    fn implementation_key_strips_suffix() {
        assert_eq!(implementation_key("DurationCalculator", "Calculator"), "duration");
        assert_eq!(implementation_key("Greeks", "Calculator"), "greeks");
        assert_eq!(implementation_key("Calculator", "Calculator"), "calculator");
        assert_eq!(implementation_key("FXCALCULATOR", "Calculator"), "fx");
    }
}

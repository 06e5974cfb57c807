use std::sync::OnceLock;

use regex::Regex;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid regex literal")
}

/// Header of the registration routine, e.g. `void CalculatorFactory::Register() {`.
pub(crate) fn regex_register_routine() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\b\w*Register\w*\s*\(\s*(?:void\s*)?\)\s*\{"#))
}

/// `Registrator<Calculator> r("Name", ObjectFactory<Calculator>::DFactoryMethod<Impl>)`
pub(crate) fn regex_registration_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(
            r#"(?s)Registrator\s*<\s*\w+\s*>.*?"([^"]+)"\s*,\s*ObjectFactory\s*<\s*\w+\s*>\s*::\s*\w*FactoryMethod\s*<\s*([^>\s]+)\s*>"#,
        )
    })
}

/// Header of an implementation's initialisation method, e.g. `void FooCalculator::init(const Cfg& c) {`.
pub(crate) fn regex_init_routine() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r#"\b\w+\s*::\s*\w*[iI]nit\s*\([^)]*\)\s*(?:const\s*)?\{"#))
}

/// Settings accessor reading `<tag> + ".name"` with an optional literal default:
/// `vm->GetDoubleSetting(m_cfgTag + ".notional", 1.0)`.
pub(crate) fn regex_settings_accessor(tag_variable: &str) -> Regex {
    let pattern = format!(
        r#"(?s)\w+\s*(?:->|\.)\s*[Gg]et\w*Setting\s*\(\s*{}\s*\+\s*"\.?([^"']+)"\s*(?:,\s*([\w.\-]+|"[^"]*"|'[^']*'))?\s*\)"#,
        regex::escape(tag_variable)
    );
    regex(&pattern)
}

use crate::types::RegistrationEntry;

use super::regexes::{regex_register_routine, regex_registration_call};
use super::scanner::scan_body;

/// Registration pairs declared in the `Register` routine of `content`, in source order.
pub fn extract_registrations(content: &str) -> Vec<RegistrationEntry> {
    scan_body(
        content,
        regex_register_routine(),
        regex_registration_call(),
        |caps| {
            Some(RegistrationEntry {
                registered_name: caps.get(1)?.as_str().to_string(),
                implementation_id: caps.get(2)?.as_str().to_string(),
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTER_CPP: &str = r#"
#include "CalculatorFactory.h"

void CalculatorFactory::Register()
{
    Registrator<Calculator> r1("CashflowPV",
        ObjectFactory<Calculator>::DFactoryMethod<CashflowPVCalculator>);
    if (enableExperimental()) {
        Registrator<Calculator> r2("Greeks", ObjectFactory<Calculator>::DFactoryMethod< GreeksCalculator >);
    }
    Registrator<Calculator> r3("Duration", ObjectFactory<Calculator>::DFactoryMethod<DurationCalculator>);
}

void CalculatorFactory::Other()
{
    Registrator<Calculator> r4("Hidden", ObjectFactory<Calculator>::DFactoryMethod<HiddenCalculator>);
}
"#;

    #[test]
    fn extracts_pairs_in_source_order() {
        let entries = extract_registrations(REGISTER_CPP);
        let pairs: Vec<_> = entries
            .iter()
            .map(|e| (e.registered_name.as_str(), e.implementation_id.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("CashflowPV", "CashflowPVCalculator"),
                ("Greeks", "GreeksCalculator"),
                ("Duration", "DurationCalculator"),
            ]
        );
    }

    #[test]
    fn ignores_calls_outside_the_routine() {
        let entries = extract_registrations(REGISTER_CPP);
        assert!(entries.iter().all(|e| e.registered_name != "Hidden"));
    }

    #[test]
    fn no_routine_means_no_entries() {
        let content = r#"Registrator<Calculator> r("X", ObjectFactory<Calculator>::DFactoryMethod<XCalculator>);"#;
        assert!(extract_registrations(content).is_empty());
        assert!(extract_registrations("").is_empty());
    }
}

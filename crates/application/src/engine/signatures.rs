use apollo_domain::{ConfigError, Severity, SignatureRuleConfig};
use regex::{Regex, RegexBuilder};

#[derive(Debug)]
struct CompiledRule {
    regex: Regex,
    name: String,
    severity: Severity,
}

/// Ordered payload signature rules; first match wins.
///
/// Every pattern is compiled case-insensitive at construction. A pattern
/// that fails to compile aborts startup — a half-loaded rule set would
/// silently change which rule a payload hits first.
#[derive(Debug)]
pub struct SignatureEngine {
    rules: Vec<CompiledRule>,
}

impl SignatureEngine {
    pub fn compile(rules: &[SignatureRuleConfig]) -> Result<Self, ConfigError> {
        let rules = rules
            .iter()
            .map(|rule| {
                RegexBuilder::new(&rule.pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| CompiledRule {
                        regex,
                        name: rule.name.clone(),
                        severity: rule.severity,
                    })
                    .map_err(|e| ConfigError::InvalidSignaturePattern {
                        name: rule.name.clone(),
                        detail: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Match `payload` against the rules in declared order.
    ///
    /// The payload is decoded lossily; invalid UTF-8 sequences become
    /// replacement characters rather than failing the scan.
    pub fn scan(&self, payload: &[u8]) -> Option<(&str, Severity)> {
        if payload.is_empty() || self.rules.is_empty() {
            return None;
        }
        let text = String::from_utf8_lossy(payload);
        self.rules
            .iter()
            .find(|rule| rule.regex.is_match(&text))
            .map(|rule| (rule.name.as_str(), rule.severity))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

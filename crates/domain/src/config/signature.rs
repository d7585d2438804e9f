use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// One payload signature rule. Rules are evaluated in declared order and
/// the first match wins; patterns are compiled case-insensitive.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignatureRuleConfig {
    pub pattern: String,
    pub name: String,
    pub severity: Severity,
}

use crate::{ElementTag, FlowType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A UX pattern to look for across the catalog
///
/// `label_patterns` holds regex sources; they are compiled by whoever
/// evaluates the definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternDefinition {
    pub slug: String,
    pub name: String,
    pub description: String,
    /// Section of the pattern index this definition is listed under
    pub category: String,
    #[serde(default)]
    pub tags: Vec<ElementTag>,
    #[serde(default)]
    pub label_patterns: Vec<String>,
    #[serde(default)]
    pub flow_types: Vec<FlowType>,
}

/// Adoption bucket of an aggregate pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Dominant,
    Common,
    Emerging,
    Outlier,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Dominant => "dominant",
            Classification::Common => "common",
            Classification::Emerging => "emerging",
            Classification::Outlier => "outlier",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dominant" => Ok(Classification::Dominant),
            "common" => Ok(Classification::Common),
            "emerging" => Ok(Classification::Emerging),
            "outlier" => Ok(Classification::Outlier),
            other => Err(format!("unknown classification '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_definition_from_yaml() {
        let yaml = r#"
slug: wallet-connection
name: Wallet Connection
description: How apps ask users to connect a wallet
category: Onboarding
tags: ["Wallet Connect Button", "Network Selector"]
labelPatterns: ['(?i)connect\s*wallet']
flowTypes: [Onboarding]
"#;
        let def: PatternDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.tags.len(), 2);
        assert_eq!(def.label_patterns, vec![r"(?i)connect\s*wallet".to_string()]);
        assert_eq!(def.flow_types, vec![FlowType::Onboarding]);
    }

    #[test]
    fn test_classification_serde() {
        let c: Classification = serde_json::from_str("\"emerging\"").unwrap();
        assert_eq!(c, Classification::Emerging);
        assert_eq!(Classification::Dominant.to_string(), "dominant");
        assert_eq!("Outlier".parse::<Classification>(), Ok(Classification::Outlier));
        assert!("rare".parse::<Classification>().is_err());
    }
}

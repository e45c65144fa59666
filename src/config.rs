// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Weight configuration: named per-type weight tables, validated at load.
//!
//! Field names stay strings at this boundary - weight tables are
//! data-driven and user-editable per item type - but they are checked
//! against the rules (and optionally a known field set) when the
//! configuration is loaded, so a typo fails fast instead of silently
//! never matching. Search never validates.

use crate::types::FieldWeight;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Why a weight configuration was rejected.
#[derive(Debug)]
pub enum WeightConfigError {
    /// The JSON payload did not parse as weight tables.
    Parse(serde_json::Error),
    /// A field name is empty.
    EmptyFieldName { profile: String },
    /// The same field appears twice in one profile.
    DuplicateField { profile: String, field: String },
    /// A weight is outside `[0, 1]`.
    WeightOutOfRange {
        profile: String,
        field: String,
        weight: f64,
    },
    /// A boost multiplier is below 1.
    BoostBelowOne {
        profile: String,
        field: String,
        boost: f64,
    },
    /// A field is not in the caller's known set for the profile.
    UnknownField { profile: String, field: String },
}

impl fmt::Display for WeightConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightConfigError::Parse(err) => {
                write!(f, "weight config is not valid JSON: {}", err)
            }
            WeightConfigError::EmptyFieldName { profile } => {
                write!(f, "profile '{}' has an entry with an empty field name", profile)
            }
            WeightConfigError::DuplicateField { profile, field } => {
                write!(f, "profile '{}' lists field '{}' twice", profile, field)
            }
            WeightConfigError::WeightOutOfRange {
                profile,
                field,
                weight,
            } => {
                write!(
                    f,
                    "weight {} for field '{}' in profile '{}' is outside [0, 1]",
                    weight, field, profile
                )
            }
            WeightConfigError::BoostBelowOne {
                profile,
                field,
                boost,
            } => {
                write!(
                    f,
                    "boost {} for field '{}' in profile '{}' is below 1",
                    boost, field, profile
                )
            }
            WeightConfigError::UnknownField { profile, field } => {
                write!(f, "profile '{}' names unknown field '{}'", profile, field)
            }
        }
    }
}

impl std::error::Error for WeightConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeightConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Named weight tables, one per item type.
///
/// Serialized as a plain JSON object: profile name to weight list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightConfig {
    pub profiles: HashMap<String, Vec<FieldWeight>>,
}

impl WeightConfig {
    /// Parse and validate a JSON weight configuration.
    pub fn from_json(json: &str) -> Result<Self, WeightConfigError> {
        let config: WeightConfig =
            serde_json::from_str(json).map_err(WeightConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// The weight table for one profile.
    pub fn profile(&self, name: &str) -> Option<&[FieldWeight]> {
        self.profiles.get(name).map(Vec::as_slice)
    }

    /// Look up one field's weight entry within a profile.
    pub fn field_weight(&self, profile: &str, field: &str) -> Option<&FieldWeight> {
        self.profile(profile)?.iter().find(|w| w.field == field)
    }

    /// Check structural rules: non-empty unique field names, weights in
    /// `[0, 1]`, boosts `≥ 1`.
    pub fn validate(&self) -> Result<(), WeightConfigError> {
        for (profile, weights) in &self.profiles {
            let mut seen: HashSet<&str> = HashSet::new();

            for w in weights {
                if w.field.is_empty() {
                    return Err(WeightConfigError::EmptyFieldName {
                        profile: profile.clone(),
                    });
                }
                if !seen.insert(w.field.as_str()) {
                    return Err(WeightConfigError::DuplicateField {
                        profile: profile.clone(),
                        field: w.field.clone(),
                    });
                }
                if !(0.0..=1.0).contains(&w.weight) {
                    return Err(WeightConfigError::WeightOutOfRange {
                        profile: profile.clone(),
                        field: w.field.clone(),
                        weight: w.weight,
                    });
                }
                for boost in [w.boost_exact, w.boost_prefix].into_iter().flatten() {
                    if boost < 1.0 {
                        return Err(WeightConfigError::BoostBelowOne {
                            profile: profile.clone(),
                            field: w.field.clone(),
                            boost,
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Check one profile's field names against the caller's known set.
    pub fn validate_against(
        &self,
        profile: &str,
        known_fields: &[&str],
    ) -> Result<(), WeightConfigError> {
        if let Some(weights) = self.profile(profile) {
            for w in weights {
                if !known_fields.contains(&w.field.as_str()) {
                    return Err(WeightConfigError::UnknownField {
                        profile: profile.to_string(),
                        field: w.field.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for WeightConfig {
    /// The stock tables: one profile for narrative-shaped items, one for
    /// model-shaped items.
    fn default() -> Self {
        let narrative = vec![
            FieldWeight::with_boosts("title", 1.0, 2.0, 1.5),
            FieldWeight::with_boosts("category", 0.8, 1.8, 1.3),
            FieldWeight::with_boosts("tags", 0.7, 1.5, 1.2),
            FieldWeight::with_boosts("summary", 0.5, 1.2, 1.1),
            FieldWeight::with_boosts("domain", 0.6, 1.4, 1.2),
            FieldWeight {
                field: "evidence_quality".to_string(),
                weight: 0.4,
                boost_exact: Some(1.3),
                boost_prefix: None,
            },
        ];

        let model = vec![
            FieldWeight::with_boosts("name", 1.0, 2.0, 1.5),
            FieldWeight::with_boosts("category", 0.8, 1.8, 1.3),
            FieldWeight::with_boosts("tags", 0.7, 1.5, 1.2),
            FieldWeight::with_boosts("description", 0.5, 1.2, 1.1),
            FieldWeight {
                field: "difficulty".to_string(),
                weight: 0.3,
                boost_exact: Some(1.2),
                boost_prefix: None,
            },
        ];

        let mut profiles = HashMap::new();
        profiles.insert("narrative".to_string(), narrative);
        profiles.insert("model".to_string(), model);
        WeightConfig { profiles }
    }
}

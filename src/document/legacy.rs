use super::IntoActivities;
use crate::activity::{Activity, Branch, BranchId, BranchKey, Continuation, StructuralPosition};
use crate::config::EditorConfig;
use crate::error::ConversionError;
use crate::numbering::renumber;
use ahash::AHashSet;
use serde::Deserialize;

/// The flat record shape older procedure exports use: every continuation field is
/// present on every record, whether or not the record's continuation type uses it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyActivity {
    pub id: String,
    #[serde(alias = "systemNumber")]
    pub structural_position: String,
    #[serde(default, alias = "userNumber")]
    pub display_position: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub description: String,
    /// `"individual"`, `"decision"`, `"alternatives"` or `"terminal"`.
    #[serde(default)]
    pub continuation_type: Option<String>,
    #[serde(default)]
    pub next_activity: Option<String>,
    #[serde(default)]
    pub yes_label: Option<String>,
    #[serde(default)]
    pub no_label: Option<String>,
    #[serde(default)]
    pub alternative_branches: Option<Vec<LegacyBranch>>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub parent_branch_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyBranch {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

/// A whole legacy export, converted with the labels of `config` as fallbacks.
#[derive(Debug, Clone)]
pub struct LegacyProcedure {
    pub activities: Vec<LegacyActivity>,
    pub config: EditorConfig,
}

impl LegacyProcedure {
    pub fn new(activities: Vec<LegacyActivity>) -> Self {
        Self {
            activities,
            config: EditorConfig::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl IntoActivities for LegacyProcedure {
    /// Converts every record, keeping only the fields its continuation type uses, and
    /// renumbers the result.
    fn into_activities(self) -> Result<Vec<Activity>, ConversionError> {
        let mut seen = AHashSet::new();
        let mut activities = Vec::with_capacity(self.activities.len());
        for legacy in self.activities {
            if !seen.insert(legacy.id.clone()) {
                return Err(ConversionError::DuplicateActivity(legacy.id));
            }
            activities.push(convert(legacy, &self.config)?);
        }
        Ok(renumber(&activities))
    }
}

fn convert(legacy: LegacyActivity, config: &EditorConfig) -> Result<Activity, ConversionError> {
    let continuation = continuation_of(&legacy, config)?;

    let parent_branch = match (&legacy.parent_id, legacy.parent_branch_key) {
        (Some(_), Some(key)) => Some(BranchKey::from(key)),
        (Some(_), None) => None,
        (None, Some(key)) => {
            return Err(ConversionError::BranchWithoutParent {
                activity_id: legacy.id,
                branch: key,
            });
        }
        (None, None) => None,
    };

    Ok(Activity {
        id: legacy.id.into(),
        structural_position: StructuralPosition::new(legacy.structural_position),
        display_position: legacy.display_position,
        name: legacy.name,
        responsible: legacy.responsible,
        description: legacy.description,
        continuation,
        parent_id: legacy.parent_id.map(Into::into),
        parent_branch,
    })
}

fn continuation_of(
    legacy: &LegacyActivity,
    config: &EditorConfig,
) -> Result<Continuation, ConversionError> {
    let type_name = legacy
        .continuation_type
        .as_deref()
        .unwrap_or("individual")
        .trim()
        .to_lowercase();

    let continuation = match type_name.as_str() {
        "" | "individual" => Continuation::Individual {
            next_ref: legacy.next_activity.clone().unwrap_or_default(),
        },
        "decision" => Continuation::Decision {
            yes_label: legacy
                .yes_label
                .clone()
                .unwrap_or_else(|| config.yes_label.clone()),
            no_label: legacy
                .no_label
                .clone()
                .unwrap_or_else(|| config.no_label.clone()),
        },
        "alternatives" | "alternative" => {
            let mut branches: Vec<Branch> = legacy
                .alternative_branches
                .iter()
                .flatten()
                .map(|b| Branch::new(BranchId::new(b.id.clone()), b.label.clone()))
                .collect();
            if branches.is_empty() {
                // Keep the at-least-one-branch floor with a stable, derived id.
                branches.push(Branch::new(format!("{}-branch-1", legacy.id), ""));
            }
            Continuation::Alternatives { branches }
        }
        "terminal" | "end" => Continuation::Terminal,
        _ => {
            return Err(ConversionError::UnknownContinuation {
                activity_id: legacy.id.clone(),
                type_name,
            });
        }
    };
    Ok(continuation)
}

//! User answers driving project generation.

use super::{Ipv4, ZoneCount};
use crate::error::{AppError, Result};
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Project name used for the output directory when none was answered.
pub const FALLBACK_PROJECT: &str = "my-project";

static PROJECT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_project_regex() -> &'static Regex {
    PROJECT_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("Invalid Regex"))
}

/// Supported cloud providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
    #[default]
    Aws,
    Gcp,
    Azure,
}

impl Cloud {
    /// Lowercase name, also the cloud-specific template directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cloud::Aws => "aws",
            Cloud::Gcp => "gcp",
            Cloud::Azure => "azure",
        }
    }
}

impl FromStr for Cloud {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aws" => Ok(Cloud::Aws),
            "gcp" => Ok(Cloud::Gcp),
            "azure" => Ok(Cloud::Azure),
            other => Err(format!(
                "unknown cloud provider '{other}', expected aws, gcp or azure"
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Cloud {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Cloud, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cloud::from_str(&s).map_err(de::Error::custom)
    }
}

impl fmt::Display for Cloud {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_backend() -> bool {
    true
}

/// Read a tag map whose values may be any scalar; numbers and booleans are
/// kept as their text, null becomes an empty string.
fn deserialize_tags<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(de::Error::custom(format!(
                        "tag '{key}' must be a string, number or boolean"
                    )));
                }
            };
            Ok((key, text))
        })
        .collect()
}

/// Answers to the generator questions.
///
/// Keys not modelled here are kept in `extra` and handed to the templates
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub cloud: Cloud,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_cidr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub az_count: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: BTreeMap<String, String>,
    #[serde(default = "default_backend")]
    pub backend: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Answers {
    fn default() -> Self {
        Answers {
            project: None,
            cloud: Cloud::default(),
            region: None,
            vpc_cidr: None,
            az_count: None,
            tags: BTreeMap::new(),
            backend: true,
            extra: Map::new(),
        }
    }
}

impl Answers {
    /// Project name, falling back to [`FALLBACK_PROJECT`].
    pub fn project_name(&self) -> &str {
        self.project.as_deref().unwrap_or(FALLBACK_PROJECT)
    }

    /// Check the project name is usable as a directory name.
    pub fn validate_project(&self) -> Result<()> {
        let name = self.project_name();
        if get_project_regex().is_match(name) {
            Ok(())
        } else {
            Err(AppError::Answers(format!(
                "project name '{name}' may only contain letters, digits, '.', '_' and '-'"
            )))
        }
    }

    /// The validated base network.
    pub fn address_block(&self) -> Result<Ipv4> {
        let cidr = self
            .vpc_cidr
            .as_deref()
            .ok_or_else(|| AppError::Answers("missing answer 'vpc_cidr'".to_string()))?;
        Ok(Ipv4::new(cidr)?)
    }

    /// The validated availability zone count.
    pub fn zone_count(&self) -> Result<ZoneCount> {
        let count = self
            .az_count
            .ok_or_else(|| AppError::Answers("missing answer 'az_count'".to_string()))?;
        Ok(ZoneCount::new(count)?)
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The known raw shapes of a content entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceShape {
    /// `levels` keyed `"1"`..`"5"` with `summary`/`explanation` fields.
    NumericLevels,
    /// `levels` keyed `"level1"`..`"level5"` with `title`/`content` fields.
    StringLevels,
    /// Already normalized: numeric keys with `bodyEn` fields.
    Canonical,
}

impl SourceShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NumericLevels => "numeric-levels",
            Self::StringLevels => "string-levels",
            Self::Canonical => "canonical",
        }
    }
}

impl fmt::Display for SourceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the keys of a raw `levels` object are spelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelKeyStyle {
    /// `"1"`, `"2"`, ...
    Numeric,
    /// `"level1"`, `"level2"`, ...
    Prefixed,
}

impl LevelKeyStyle {
    /// Classify a single key.
    pub fn of_key(key: &str) -> Option<Self> {
        if is_digits(key) {
            Some(Self::Numeric)
        } else if key.strip_prefix("level").is_some_and(is_digits) {
            Some(Self::Prefixed)
        } else {
            None
        }
    }

    /// Numeric level encoded by `key` under this style.
    pub fn parse(&self, key: &str) -> Option<i64> {
        let digits = match self {
            Self::Numeric => key,
            Self::Prefixed => key.strip_prefix("level")?,
        };
        digits.parse().ok()
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Key style shared by every key of `levels`, or `None` if the object is
/// empty or mixes styles.
pub fn level_key_style(levels: &Map<String, Value>) -> Option<LevelKeyStyle> {
    let mut styles = levels.keys().map(|k| LevelKeyStyle::of_key(k));
    let first = styles.next()??;
    styles.all(|s| s == Some(first)).then_some(first)
}

/// The `levels` object of a raw entry, if it has one.
pub fn raw_levels(raw: &Value) -> Option<&Map<String, Value>> {
    raw.get("levels")?.as_object()
}

/// The level inspected for field-name detection: the one with the lowest
/// numeric key.
pub fn sample_level(levels: &Map<String, Value>) -> Option<&Map<String, Value>> {
    let style = level_key_style(levels)?;
    levels
        .iter()
        .filter_map(|(k, v)| Some((style.parse(k)?, v)))
        .min_by_key(|(n, _)| *n)
        .and_then(|(_, v)| v.as_object())
}

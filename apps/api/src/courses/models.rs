use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CourseError {
    #[error("course must be a JSON object")]
    NotAnObject,

    #[error("course is missing '_id'")]
    MissingId,

    #[error("course '_id' must be a string or a number")]
    InvalidId,

    #[error("course {0} is missing 'tags'")]
    MissingTags(String),

    #[error("course {0} has a non-string tag")]
    InvalidTag(String),
}

/// A course supplied by the caller.
///
/// `id`, `title` and `tags` are the fields the ranker reads; the original JSON
/// object is kept so every other field is returned to the caller unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub tags: Vec<String>,
    raw: Value,
}

impl Course {
    pub fn from_value(raw: Value) -> Result<Self, CourseError> {
        let obj = raw.as_object().ok_or(CourseError::NotAnObject)?;

        let id = obj
            .get("_id")
            .ok_or(CourseError::MissingId)
            .and_then(|v| CourseId::from_value(v).ok_or(CourseError::InvalidId))?;

        let title = obj
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let tags = obj
            .get("tags")
            .and_then(Value::as_array)
            .ok_or_else(|| CourseError::MissingTags(id.to_string()))?
            .iter()
            .map(|t| {
                t.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| CourseError::InvalidTag(id.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Course {
            id,
            title,
            tags,
            raw,
        })
    }

    /// Returns the caller's original course object.
    pub fn into_value(self) -> Value {
        self.raw
    }

    pub fn summary(&self) -> CourseSummary<'_> {
        CourseSummary {
            id: &self.id,
            title: &self.title,
            tags: &self.tags,
        }
    }
}

/// The reduced projection of a course shown to the model.
#[derive(Debug, Serialize)]
pub struct CourseSummary<'a> {
    pub id: &'a CourseId,
    pub title: &'a str,
    pub tags: &'a [String],
}

/// A course identifier as the caller typed it. `1` and `"1"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CourseId {
    Str(String),
    Num(Number),
}

impl CourseId {
    /// Strings and numbers are identifiers; anything else is not.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(CourseId::Str(s.clone())),
            Value::Number(n) => Some(CourseId::Num(n.clone())),
            _ => None,
        }
    }

    /// The same id written as the other JSON type, if it has one.
    /// Lets a model that quotes numeric ids (or unquotes string ones) still match.
    pub fn alternate(&self) -> Option<Self> {
        match self {
            CourseId::Str(s) => s.parse::<Number>().ok().map(CourseId::Num),
            CourseId::Num(n) => Some(CourseId::Str(n.to_string())),
        }
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseId::Str(s) => f.write_str(s),
            CourseId::Num(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_keeps_extra_fields() {
        let raw = json!({
            "_id": "64f1c2",
            "title": "Intro to Python",
            "tags": ["Python"],
            "instructor": {"name": "Ada"},
            "price": 0
        });
        let course = Course::from_value(raw.clone()).unwrap();
        assert_eq!(course.id, CourseId::Str("64f1c2".to_string()));
        assert_eq!(course.tags, vec!["Python".to_string()]);
        assert_eq!(course.into_value(), raw);
    }

    #[test]
    fn test_numeric_id_keeps_its_type() {
        let course = Course::from_value(json!({"_id": 7, "tags": []})).unwrap();
        assert_eq!(course.id, CourseId::Num(Number::from(7u64)));
        assert_ne!(course.id, CourseId::Str("7".to_string()));
        assert_eq!(course.id.to_string(), "7");
        assert_eq!(course.title, "");
    }

    #[test]
    fn test_alternate_crosses_json_types() {
        assert_eq!(
            CourseId::Str("12".to_string()).alternate(),
            Some(CourseId::Num(Number::from(12u64)))
        );
        assert_eq!(
            CourseId::Num(Number::from(12u64)).alternate(),
            Some(CourseId::Str("12".to_string()))
        );
        assert_eq!(CourseId::Str("abc".to_string()).alternate(), None);
    }

    #[test]
    fn test_numeric_id_summary_stays_numeric() {
        let course = Course::from_value(json!({"_id": 3, "title": "Go", "tags": []})).unwrap();
        let value = serde_json::to_value(course.summary()).unwrap();
        assert_eq!(value, json!({"id": 3, "title": "Go", "tags": []}));
    }

    #[test]
    fn test_missing_tags_is_an_error() {
        let err = Course::from_value(json!({"_id": "a1", "title": "No tags"})).unwrap_err();
        assert_eq!(err, CourseError::MissingTags("a1".to_string()));
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let err = Course::from_value(json!({"tags": ["x"]})).unwrap_err();
        assert_eq!(err, CourseError::MissingId);
    }

    #[test]
    fn test_object_id_is_rejected() {
        let err = Course::from_value(json!({"_id": {"$oid": "x"}, "tags": []})).unwrap_err();
        assert_eq!(err, CourseError::InvalidId);
    }

    #[test]
    fn test_summary_projection() {
        let course =
            Course::from_value(json!({"_id": "c9", "title": "Art", "tags": ["Art"], "x": 1}))
                .unwrap();
        let value = serde_json::to_value(course.summary()).unwrap();
        assert_eq!(value, json!({"id": "c9", "title": "Art", "tags": ["Art"]}));
    }
}

//! Data path suggestions derived from a template's example data.
//!
//! Paths look like `$.customer.name`. Arrays are written `$.items[]` and
//! their element fields `$.items[].price`. Inside a loop, columns bind
//! relative to one list element, so they are suggested as `$.price`.

use serde_json::Value;

/// What a suggested path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Scalar,
    Object,
    /// A list, bindable as a loop
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSuggestion {
    pub path: String,
    pub kind: PathKind,
}

/// Suggests bindable paths while the operator types.
pub trait PathSuggester {
    /// Absolute paths into `schema` matching `partial`.
    fn suggest(&self, schema: &Value, partial: &str) -> Vec<PathSuggestion>;

    /// Row-relative paths for the elements of the list at `loop_path`.
    fn suggest_in_loop(&self, schema: &Value, loop_path: &str, partial: &str)
    -> Vec<PathSuggestion>;
}

/// Walks example JSON to enumerate every reachable path.
#[derive(Debug, Clone)]
pub struct SchemaPathSuggester {
    /// Nesting levels walked below the root
    pub max_depth: usize,
    /// Maximum number of suggestions returned
    pub limit: usize,
}

impl Default for SchemaPathSuggester {
    fn default() -> Self {
        Self {
            max_depth: 8,
            limit: 50,
        }
    }
}

impl SchemaPathSuggester {
    fn collect(&self, value: &Value, prefix: &str, depth: usize, out: &mut Vec<PathSuggestion>) {
        if depth >= self.max_depth {
            return;
        }
        let Value::Object(map) = value else { return };
        for (key, child) in map {
            let path = format!("{prefix}.{key}");
            match child {
                Value::Array(items) => {
                    let list = format!("{path}[]");
                    out.push(PathSuggestion {
                        path: list.clone(),
                        kind: PathKind::List,
                    });
                    if let Some(first) = items.first() {
                        self.collect(first, &list, depth + 1, out);
                    }
                }
                Value::Object(_) => {
                    out.push(PathSuggestion {
                        path: path.clone(),
                        kind: PathKind::Object,
                    });
                    self.collect(child, &path, depth + 1, out);
                }
                _ => out.push(PathSuggestion {
                    path,
                    kind: PathKind::Scalar,
                }),
            }
        }
    }

    /// Prefix matches first, then substring matches, each in walk order.
    fn filter(&self, all: Vec<PathSuggestion>, partial: &str) -> Vec<PathSuggestion> {
        let needle = partial.trim().to_lowercase();
        if needle.is_empty() {
            return all.into_iter().take(self.limit).collect();
        }
        let (mut prefixed, contained): (Vec<_>, Vec<_>) = all
            .into_iter()
            .filter(|s| s.path.to_lowercase().contains(&needle))
            .partition(|s| s.path.to_lowercase().starts_with(&needle));
        prefixed.extend(contained);
        prefixed.truncate(self.limit);
        prefixed
    }
}

/// Element value of the list a loop path names, e.g. `$.order.items[]`.
fn list_element<'a>(schema: &'a Value, loop_path: &str) -> Option<&'a Value> {
    let trimmed = loop_path.trim();
    let rest = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let mut current = schema;
    for segment in rest.split('.').filter(|s| !s.is_empty()) {
        let name = segment.strip_suffix("[]").unwrap_or(segment);
        current = current.get(name)?;
        if segment.ends_with("[]") {
            current = current.as_array()?.first()?;
        }
    }
    match current {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

impl PathSuggester for SchemaPathSuggester {
    fn suggest(&self, schema: &Value, partial: &str) -> Vec<PathSuggestion> {
        let mut all = Vec::new();
        self.collect(schema, "$", 0, &mut all);
        self.filter(all, partial)
    }

    fn suggest_in_loop(
        &self,
        schema: &Value,
        loop_path: &str,
        partial: &str,
    ) -> Vec<PathSuggestion> {
        let Some(element) = list_element(schema, loop_path) else {
            return Vec::new();
        };
        let mut all = Vec::new();
        self.collect(element, "$", 0, &mut all);
        self.filter(all, partial)
    }
}

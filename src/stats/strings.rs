use std::collections::HashMap;

use serde_json::Value;

/// Localised labels for the numeric codes used in API payloads
/// (`civ`, `leaderboard`, `game_type`, ...).
#[derive(Clone, Debug, Default)]
pub struct StringTable {
    language: Option<String>,
    categories: HashMap<String, HashMap<i64, String>>,
}

impl StringTable {
    /// Reads the `strings` endpoint payload. Top-level keys whose value is not
    /// a list of `{id, string}` objects are ignored.
    pub fn from_value(value: &Value) -> Self {
        let mut table = Self::default();
        let Some(object) = value.as_object() else {
            return table;
        };

        table.language = object
            .get("language")
            .and_then(Value::as_str)
            .map(str::to_string);

        for (category, entries) in object {
            let Some(entries) = entries.as_array() else {
                continue;
            };
            let labels: HashMap<i64, String> = entries
                .iter()
                .filter_map(|e| {
                    let id = e.get("id")?.as_i64()?;
                    let label = e.get("string")?.as_str()?;
                    Some((id, label.to_string()))
                })
                .collect();
            table.categories.insert(category.clone(), labels);
        }

        table
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn lookup(&self, category: &str, id: i64) -> Option<&str> {
        self.categories
            .get(category)
            .and_then(|labels| labels.get(&id))
            .map(String::as_str)
    }
}

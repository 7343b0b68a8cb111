//! Data model for externally supplied records.
//!
//! A data source exposes a table's fields (id, name, type) and raw records
//! as maps from field id to an arbitrary JSON cell value. Records are
//! grouped by the values of the configured grouping fields; each group is
//! printed as one page.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::cell_text;

/// Raw record cells keyed by field id.
pub type RecordFields = Map<String, Value>;

/// Field metadata as reported by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub name: String,
    /// Platform specific field type code.
    #[serde(rename = "type", default)]
    pub field_type: i64,
}

impl Field {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type: 0,
        }
    }
}

/// Ordered list of the fields of the active table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: Vec<Field>,
}

impl FieldCatalog {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn by_id(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<Field> for FieldCatalog {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A grouping field name and the formatted value shared by a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupKey {
    pub name: String,
    pub value: String,
}

impl GroupKey {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One page worth of data: the grouping keys and every record sharing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordGroup {
    #[serde(rename = "groupingInfo", default)]
    pub keys: Vec<GroupKey>,
    #[serde(default)]
    pub records: Vec<RecordFields>,
}

impl RecordGroup {
    pub fn new(keys: Vec<GroupKey>, records: Vec<RecordFields>) -> Self {
        Self { keys, records }
    }

    /// Value of the grouping key called `name`.
    pub fn key_value(&self, name: &str) -> Option<&str> {
        self.keys
            .iter()
            .find(|k| k.name == name)
            .map(|k| k.value.as_str())
    }

    /// Formatted cell of `field_id` in the first record, if any.
    pub fn first_cell(&self, field_id: &str) -> Option<String> {
        self.records
            .first()
            .map(|r| r.get(field_id).map(cell_text).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_lookup() {
        let catalog: FieldCatalog = vec![Field::new("f1", "金额"), Field::new("f2", "客户名称")]
            .into_iter()
            .collect();
        assert_eq!(catalog.by_name("金额").map(|f| f.id.as_str()), Some("f1"));
        assert_eq!(catalog.by_id("f2").map(|f| f.name.as_str()), Some("客户名称"));
        assert!(catalog.by_name("数量").is_none());
    }

    #[test]
    fn test_group_wire_shape() {
        let group: RecordGroup = serde_json::from_value(json!({
            "groupingInfo": [{"name": "客户名称", "value": "张三"}],
            "records": [{"f1": 10}]
        }))
        .expect("group should parse");
        assert_eq!(group.key_value("客户名称"), Some("张三"));
        assert_eq!(group.first_cell("f1").as_deref(), Some("10"));
        assert_eq!(group.first_cell("missing").as_deref(), Some(""));
    }
}

//! Splits fetched records into pages.

use std::collections::HashMap;

use docket_core::{cell_text, FieldCatalog, GroupKey, RecordFields, RecordGroup};

/// Shown for a grouping field whose cell is empty.
pub const EMPTY_GROUP_VALUE: &str = "无";

/// Groups `records` by the formatted values of the grouping fields.
///
/// Groups appear in the order their first record appears. Grouping ids
/// missing from the catalog are ignored. Without grouping fields every
/// record becomes its own group.
pub fn group_records(
    records: Vec<RecordFields>,
    catalog: &FieldCatalog,
    grouping_field_ids: &[String],
) -> Vec<RecordGroup> {
    if grouping_field_ids.is_empty() {
        return records
            .into_iter()
            .map(|r| RecordGroup::new(Vec::new(), vec![r]))
            .collect();
    }

    let fields: Vec<_> = grouping_field_ids
        .iter()
        .filter_map(|id| catalog.by_id(id))
        .collect();

    let mut groups: Vec<RecordGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for record in records {
        let keys: Vec<GroupKey> = fields
            .iter()
            .map(|field| {
                let value = record.get(&field.id).map(cell_text).unwrap_or_default();
                if value.is_empty() {
                    GroupKey::new(&field.name, EMPTY_GROUP_VALUE)
                } else {
                    GroupKey::new(&field.name, value)
                }
            })
            .collect();
        let key = keys
            .iter()
            .map(|k| k.value.as_str())
            .collect::<Vec<_>>()
            .join("#");

        match index.get(&key) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(key, groups.len());
                groups.push(RecordGroup::new(keys, vec![record]));
            }
        }
    }
    groups
}

// Copyright (C) 2015-2025 The Neo Project.
//
// type_checker.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Structural classifiers for untyped stack item JSON.

use crate::stack_item::StackItemType;
use serde_json::Value;

/// Runtime predicates narrowing an untyped JSON value to a stack item variant.
///
/// Container predicates validate their contents recursively, so a value is
/// only accepted when every nested element is itself a stack item.
pub struct TypeChecker;

impl TypeChecker {
    pub fn is_stack_type_any(item: &Value) -> bool {
        has_type(item, StackItemType::Any)
    }

    pub fn is_stack_type_boolean(item: &Value) -> bool {
        has_type(item, StackItemType::Boolean) && item.get("value").map_or(false, Value::is_boolean)
    }

    pub fn is_stack_type_integer(item: &Value) -> bool {
        has_type(item, StackItemType::Integer) && has_string_value(item)
    }

    pub fn is_stack_type_byte_string(item: &Value) -> bool {
        has_type(item, StackItemType::ByteString) && has_string_value(item)
    }

    pub fn is_stack_type_array(item: &Value) -> bool {
        has_type(item, StackItemType::Array) && has_stack_item_elements(item)
    }

    pub fn is_stack_type_struct(item: &Value) -> bool {
        has_type(item, StackItemType::Struct) && has_stack_item_elements(item)
    }

    pub fn is_stack_type_map(item: &Value) -> bool {
        has_type(item, StackItemType::Map)
            && item
                .get("value")
                .and_then(Value::as_array)
                .map_or(false, |entries| {
                    entries.iter().all(|entry| {
                        entry.get("key").map_or(false, Self::is_stack_item)
                            && entry.get("value").map_or(false, Self::is_stack_item)
                    })
                })
    }

    pub fn is_stack_type_interop_interface(item: &Value) -> bool {
        has_type(item, StackItemType::InteropInterface)
            && item.get("interface").map_or(false, Value::is_string)
            && item.get("id").map_or(false, Value::is_string)
    }

    pub fn is_stack_type_pointer(item: &Value) -> bool {
        has_type(item, StackItemType::Pointer) && has_string_value(item)
    }

    pub fn is_stack_type_buffer(item: &Value) -> bool {
        has_type(item, StackItemType::Buffer) && has_string_value(item)
    }

    /// True when `item` matches any stack item variant.
    pub fn is_stack_item(item: &Value) -> bool {
        Self::classify(item).is_some()
    }

    /// Returns the variant `item` structurally matches, if any.
    pub fn classify(item: &Value) -> Option<StackItemType> {
        let item_type = item
            .get("type")
            .and_then(Value::as_str)
            .and_then(|name| name.parse::<StackItemType>().ok())?;

        let matches = match item_type {
            StackItemType::Any => Self::is_stack_type_any(item),
            StackItemType::Boolean => Self::is_stack_type_boolean(item),
            StackItemType::Integer => Self::is_stack_type_integer(item),
            StackItemType::ByteString => Self::is_stack_type_byte_string(item),
            StackItemType::Array => Self::is_stack_type_array(item),
            StackItemType::Map => Self::is_stack_type_map(item),
            StackItemType::InteropInterface => Self::is_stack_type_interop_interface(item),
            StackItemType::Pointer => Self::is_stack_type_pointer(item),
            StackItemType::Buffer => Self::is_stack_type_buffer(item),
            StackItemType::Struct => Self::is_stack_type_struct(item),
        };

        matches.then_some(item_type)
    }
}

fn has_type(item: &Value, item_type: StackItemType) -> bool {
    item.get("type").and_then(Value::as_str) == Some(item_type.name())
}

fn has_string_value(item: &Value) -> bool {
    item.get("value").map_or(false, Value::is_string)
}

fn has_stack_item_elements(item: &Value) -> bool {
    item.get("value")
        .and_then(Value::as_array)
        .map_or(false, |elements| elements.iter().all(TypeChecker::is_stack_item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_scalars_with_matching_value_types() {
        assert!(TypeChecker::is_stack_type_any(&json!({ "type": "Any" })));
        assert!(TypeChecker::is_stack_type_boolean(&json!({ "type": "Boolean", "value": false })));
        assert!(TypeChecker::is_stack_type_integer(&json!({ "type": "Integer", "value": "18" })));
        assert!(TypeChecker::is_stack_type_byte_string(&json!({ "type": "ByteString", "value": "" })));
        assert!(TypeChecker::is_stack_type_pointer(&json!({ "type": "Pointer", "value": "3" })));
        assert!(TypeChecker::is_stack_type_buffer(&json!({ "type": "Buffer", "value": "AA==" })));
        assert!(TypeChecker::is_stack_type_interop_interface(
            &json!({ "type": "InteropInterface", "interface": "IIterator", "id": "1" })
        ));
    }

    #[test]
    fn rejects_wrong_value_types() {
        assert!(!TypeChecker::is_stack_type_boolean(&json!({ "type": "Boolean", "value": "true" })));
        assert!(!TypeChecker::is_stack_type_integer(&json!({ "type": "Integer", "value": 18 })));
        assert!(!TypeChecker::is_stack_type_byte_string(&json!({ "type": "ByteString" })));
        assert!(!TypeChecker::is_stack_type_interop_interface(
            &json!({ "type": "InteropInterface", "interface": "IIterator" })
        ));
        assert!(!TypeChecker::is_stack_item(&json!(null)));
        assert!(!TypeChecker::is_stack_item(&json!([{ "type": "Any" }])));
    }

    #[test]
    fn validates_nested_containers() {
        let valid = json!({
            "type": "Map",
            "value": [{
                "key": { "type": "ByteString", "value": "a2V5" },
                "value": { "type": "Struct", "value": [{ "type": "Integer", "value": "1" }] }
            }]
        });
        assert_eq!(TypeChecker::classify(&valid), Some(StackItemType::Map));

        let bad_element = json!({
            "type": "Array",
            "value": [{ "type": "Integer", "value": "1" }, { "type": "Integer", "value": 2 }]
        });
        assert!(!TypeChecker::is_stack_type_array(&bad_element));

        let missing_key = json!({ "type": "Map", "value": [{ "value": { "type": "Any" } }] });
        assert!(!TypeChecker::is_stack_type_map(&missing_key));
    }

    #[test]
    fn predicates_do_not_cross_variants() {
        let array = json!({ "type": "Array", "value": [] });
        assert!(TypeChecker::is_stack_type_array(&array));
        assert!(!TypeChecker::is_stack_type_struct(&array));
        assert!(!TypeChecker::is_stack_type_map(&array));
    }
}

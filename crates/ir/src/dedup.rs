//! Structural deduplication of composed schemas.

use crate::node::{SchemaKind, SchemaNode};

/// Remove `items` that are deep-equal to an earlier item.
///
/// Tuple items are positional, so a tuple comes back unchanged. When at most
/// one item survives and the node is not an array or enum, that item is
/// lifted into the node itself and the composition disappears.
pub fn deduplicate(node: &SchemaNode) -> SchemaNode {
    let Some(items) = node.items.as_ref() else {
        return node.clone();
    };
    if node.kind == Some(SchemaKind::Tuple) {
        return node.clone();
    }

    let mut unique: Vec<&SchemaNode> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }

    let keeps_items = matches!(node.kind, Some(SchemaKind::Array | SchemaKind::Enum));

    if unique.len() <= 1 && !keeps_items {
        return match unique.first() {
            Some(only) => node.lift(only),
            None => SchemaNode {
                items: None,
                logical_operator: None,
                ..node.clone()
            },
        };
    }

    SchemaNode {
        items: Some(unique.into_iter().cloned().collect()),
        ..node.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::node::LogicalOperator;
    use serde_json::{Value, json};

    fn node(value: Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_duplicates_collapse() {
        let union = node(json!({
            "items": [
                { "type": "string" },
                { "type": "number" },
                { "type": "string" }
            ],
            "logicalOperator": "or"
        }));

        let deduped = deduplicate(&union);
        let items = deduped.items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, Some(SchemaKind::String));
        assert_eq!(items[1].kind, Some(SchemaKind::Number));
        assert_eq!(deduped.logical_operator, Some(LogicalOperator::Or));
    }

    #[test]
    fn test_single_survivor_is_lifted() {
        let union = node(json!({
            "description": "either",
            "items": [
                { "$ref": "#/components/schemas/Pet" },
                { "$ref": "#/components/schemas/Pet" }
            ],
            "logicalOperator": "or"
        }));

        let lifted = deduplicate(&union);
        assert!(lifted.is_reference());
        assert_eq!(lifted.reference.as_deref(), Some("#/components/schemas/Pet"));
        assert_eq!(lifted.description.as_deref(), Some("either"));
        assert!(lifted.items.is_none());
        assert!(lifted.logical_operator.is_none());
    }

    #[test]
    fn test_structurally_different_items_survive() {
        let union = node(json!({
            "items": [
                { "type": "string", "format": "uuid" },
                { "type": "string" }
            ],
            "logicalOperator": "or"
        }));
        assert_eq!(deduplicate(&union).items.unwrap().len(), 2);
    }

    #[test]
    fn test_array_items_never_lifted() {
        let array = node(json!({
            "type": "array",
            "items": [{ "type": "string" }, { "type": "string" }]
        }));

        let deduped = deduplicate(&array);
        assert_eq!(deduped.kind, Some(SchemaKind::Array));
        assert_eq!(deduped.items.unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_nested_compositions_collapse() {
        let nested = json!({
            "items": [{ "type": "string" }, { "type": "null" }],
            "logicalOperator": "or"
        });
        let union = node(json!({
            "items": [nested.clone(), nested],
            "logicalOperator": "or"
        }));

        let deduped = deduplicate(&union);
        assert_eq!(deduped.logical_operator, Some(LogicalOperator::Or));
        let items = deduped.items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, Some(SchemaKind::String));
        assert_eq!(items[1].kind, Some(SchemaKind::Null));
    }

    #[test]
    fn test_duplicate_tuple_members_collapse() {
        let pair = json!({ "type": "tuple", "items": [{ "type": "string" }] });
        let union = node(json!({ "items": [pair.clone(), pair], "logicalOperator": "or" }));

        let lifted = deduplicate(&union);
        assert_eq!(lifted.kind, Some(SchemaKind::Tuple));
        assert_eq!(lifted.items.unwrap().len(), 1);
        assert!(lifted.logical_operator.is_none());
    }

    #[test]
    fn test_tuple_items_are_positional() {
        let tuple = node(json!({
            "type": "tuple",
            "items": [{ "type": "string" }, { "type": "string" }]
        }));
        assert_eq!(deduplicate(&tuple), tuple);
    }

    #[test]
    fn test_node_without_items_is_unchanged() {
        let plain = node(json!({ "type": "string", "minLength": 1 }));
        assert_eq!(deduplicate(&plain), plain);
    }
}

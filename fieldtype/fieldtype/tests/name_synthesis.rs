//! Synthesized names and shapes agree: any leaf wrapped in arrays and
//! null-safe layers can be found again both by its name and by its shape.

use fieldtype::{FieldTypeRegistry, Value};
use proptest::prelude::*;

const LEAVES: [&str; 8] = [
    "boolean", "byte", "short", "int", "long", "float", "double", "string",
];

/// `leaf`, then one `[]` per layer, each followed by `?` when the flag is set.
fn compose(leaf: &str, nullable_leaf: bool, layers: &[bool]) -> String {
    let mut name = leaf.to_string();
    if nullable_leaf {
        name.push('?');
    }
    for &nullable in layers {
        name.push_str("[]");
        if nullable {
            name.push('?');
        }
    }
    name
}

proptest! {
    #[test]
    fn composed_names_resolve_by_name_and_shape(
        leaf in 0..LEAVES.len(),
        nullable_leaf: bool,
        layers in prop::collection::vec(any::<bool>(), 0..6),
    ) {
        let registry = FieldTypeRegistry::shared();
        let name = compose(LEAVES[leaf], nullable_leaf, &layers);

        let ty = registry.lookup_by_name(&name).unwrap();
        prop_assert_eq!(ty.name(), name.as_str());

        let resolved = registry.resolve(ty.shape(), None).unwrap();
        prop_assert_eq!(resolved.name(), name.as_str());
        prop_assert!(*resolved == *ty);

        let default = ty.default_value();
        let bytes = ty.encode(&default).unwrap();
        prop_assert_eq!(ty.decode_exact(&bytes).unwrap(), default.clone());
        if layers.last().copied().unwrap_or(nullable_leaf) {
            prop_assert_eq!(default, Value::Null);
        }
    }
}

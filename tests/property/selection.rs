use super::utils::{constructor_shapes, constructors_from, expected_selection};
use bloat_builder::{Builder, BuilderError, ConstructorSelector};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_selects_first_longest_public_constructor(shapes in constructor_shapes()) {
        let result = ConstructorSelector::select_from("Sut", constructors_from(&shapes));

        match expected_selection(&shapes) {
            Some(expected) => {
                let selected = result.unwrap();
                let max_public = shapes
                    .iter()
                    .filter(|(public, _)| *public)
                    .map(|(_, arity)| *arity)
                    .max()
                    .unwrap();
                prop_assert_eq!(selected.parameters().len(), max_public);

                let built = Builder::from_selected(selected).build().unwrap();
                prop_assert_eq!(built, expected);
            }
            None => {
                prop_assert!(
                    matches!(result, Err(BuilderError::NoPublicConstructor { sut: "Sut" })),
                    "expected NoPublicConstructor"
                );
            }
        }
    }

    #[test]
    fn test_selection_is_stable(shapes in constructor_shapes()) {
        let first = ConstructorSelector::select_from("Sut", constructors_from(&shapes))
            .map(|selected| Builder::from_selected(selected).build().unwrap());
        let second = ConstructorSelector::select_from("Sut", constructors_from(&shapes))
            .map(|selected| Builder::from_selected(selected).build().unwrap());

        prop_assert_eq!(first.ok(), second.ok());
    }
}

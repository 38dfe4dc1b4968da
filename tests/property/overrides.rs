use bloat_builder::{Builder, BuilderError, Constructor, ConstructorSelector, EntryState};
use proptest::prelude::*;

type Built = (Option<u8>, Option<u16>, Option<u32>);

#[derive(Clone, Debug)]
enum Override {
    With(usize, Option<u32>),
    WithOrDefault(usize, Option<u32>),
    Unknown,
}

fn overrides() -> impl Strategy<Value = Vec<Override>> {
    let op = prop_oneof![
        (0usize..3, proptest::option::of(0u32..200)).prop_map(|(slot, v)| Override::With(slot, v)),
        (0usize..3, proptest::option::of(0u32..200))
            .prop_map(|(slot, v)| Override::WithOrDefault(slot, v)),
        Just(Override::Unknown),
    ];
    prop::collection::vec(op, 0..12)
}

fn fresh_builder() -> Builder<Built> {
    let constructor = Constructor::<Built>::public("new", |args| {
        Ok((args.optional(0)?, args.optional(1)?, args.optional(2)?))
    })
    .defaultable::<u8>()
    .defaultable::<u16>()
    .defaultable::<u32>();

    Builder::from_selected(ConstructorSelector::select_from("Triple", vec![constructor]).unwrap())
}

fn apply(builder: Builder<Built>, op: &Override) -> Result<Builder<Built>, BuilderError> {
    match *op {
        Override::With(0, v) => match v {
            Some(v) => builder.with(v as u8),
            None => builder.with_none::<u8>(),
        },
        Override::With(1, v) => match v {
            Some(v) => builder.with(v as u16),
            None => builder.with_none::<u16>(),
        },
        Override::With(_, v) => match v {
            Some(v) => builder.with(v),
            None => builder.with_none::<u32>(),
        },
        Override::WithOrDefault(0, v) => builder.with_or_default(v.map(|v| v as u8)),
        Override::WithOrDefault(1, v) => builder.with_or_default(v.map(|v| v as u16)),
        Override::WithOrDefault(_, v) => builder.with_or_default(v),
        Override::Unknown => builder.with(0u64),
    }
}

proptest! {
    #[test]
    fn test_overrides_follow_last_write(ops in overrides()) {
        // None = untouched, Some(None) = explicit none, Some(Some(v)) = explicit value
        let mut model: [Option<Option<u32>>; 3] = [None, None, None];
        let mut builder = fresh_builder();

        for op in &ops {
            match apply(builder, op) {
                Ok(next) => builder = next,
                Err(err) => {
                    prop_assert!(matches!(op, Override::Unknown), "only unknown types are rejected");
                    prop_assert!(matches!(err, BuilderError::UnknownDependency { .. }), "unexpected error");
                    builder = fresh_builder();
                    model = [None, None, None];
                    continue;
                }
            }
            match *op {
                Override::With(slot, v) => model[slot.min(2)] = Some(v),
                Override::WithOrDefault(slot, Some(v)) => model[slot.min(2)] = Some(Some(v)),
                _ => {}
            }
        }

        let plan = builder.resolution_plan();
        for (slot, expected) in model.iter().enumerate() {
            let state = match expected {
                None => EntryState::Unresolved,
                Some(None) => EntryState::ExplicitNone,
                Some(Some(_)) => EntryState::Explicit,
            };
            prop_assert_eq!(plan.parameters[slot].state, state);
        }

        let built = builder.build().unwrap();
        let resolve = |slot: usize| match model[slot] {
            None => Some(0u32),
            Some(v) => v,
        };
        prop_assert_eq!(built.0.map(u32::from), resolve(0).map(|v| u32::from(v as u8)));
        prop_assert_eq!(built.1.map(u32::from), resolve(1).map(|v| u32::from(v as u16)));
        prop_assert_eq!(built.2, resolve(2));
    }
}

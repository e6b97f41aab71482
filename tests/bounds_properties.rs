use egui_text_scaling::{
    Attribute, FontBounds, FontScale, Outcome, ScaleController, CATALOG_MAX, CATALOG_MIN,
};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Write {
    Minimum(i32),
    Maximum(i32),
    Default(i32),
    Current(i32),
}

fn write_strategy() -> impl Strategy<Value = Write> {
    let value = -20..140i32;
    prop_oneof![
        value.clone().prop_map(Write::Minimum),
        value.clone().prop_map(Write::Maximum),
        value.clone().prop_map(Write::Default),
        value.prop_map(Write::Current),
    ]
}

fn apply(bounds: &mut FontBounds, write: Write) -> Outcome {
    match write {
        Write::Minimum(v) => bounds.set_minimum(v),
        Write::Maximum(v) => bounds.set_maximum(v),
        Write::Default(v) => bounds.set_default(v),
        Write::Current(v) => bounds.set_current(v),
    }
}

proptest! {
    #[test]
    fn bounds_hold_after_every_write(writes in prop::collection::vec(write_strategy(), 0..64)) {
        let mut bounds = FontBounds::default();
        for write in writes {
            apply(&mut bounds, write);
            prop_assert!(bounds.minimum() <= bounds.maximum());
            prop_assert!(bounds.minimum() <= bounds.current());
            prop_assert!(bounds.current() <= bounds.maximum());
            prop_assert!(bounds.minimum() >= CATALOG_MIN);
            prop_assert!(bounds.maximum() <= CATALOG_MAX);
        }
    }

    #[test]
    fn set_current_clamps(writes in prop::collection::vec(write_strategy(), 0..16), v in any::<i32>()) {
        let mut bounds = FontBounds::default();
        for write in writes {
            apply(&mut bounds, write);
        }
        bounds.set_current(v);
        prop_assert_eq!(bounds.current(), v.clamp(bounds.minimum(), bounds.maximum()));
    }

    #[test]
    fn rejected_bounds_keep_previous_value(writes in prop::collection::vec(write_strategy(), 0..16), v in -200..200i32) {
        let mut bounds = FontBounds::default();
        for write in writes {
            apply(&mut bounds, write);
        }

        let before = bounds;
        if v > before.maximum() {
            prop_assert!(bounds.set_minimum(v).is_rejected());
            prop_assert_eq!(bounds, before);
        }
        if v < before.minimum() {
            prop_assert!(bounds.set_maximum(v).is_rejected());
            prop_assert_eq!(bounds, before);
        }
    }

    #[test]
    fn changes_match_state_diff(writes in prop::collection::vec(write_strategy(), 1..32)) {
        let mut bounds = FontBounds::default();
        for write in writes {
            let before = bounds;
            let outcome = apply(&mut bounds, write);
            for attribute in [
                Attribute::Minimum,
                Attribute::Maximum,
                Attribute::Default,
                Attribute::Current,
            ] {
                let changed = before.get(attribute) != bounds.get(attribute);
                prop_assert_eq!(outcome.change_of(attribute).is_some(), changed);
            }
        }
    }

    #[test]
    fn steps_never_leave_range(steps in prop::collection::vec(any::<bool>(), 0..120)) {
        let controller = ScaleController::new(FontScale::default());
        for up in steps {
            let before = controller.scale().current();
            let issued = if up { controller.scale_up() } else { controller.scale_down() };
            let after = controller.scale().current();
            prop_assert!((6..=40).contains(&after));
            prop_assert_eq!(issued, before != after);
        }
    }
}

use periscope_macros::privates_available;

mod widgets {
    pub struct Widget {
        pub label: String,
    }

    pub struct Registry;
}

#[privates_available(crate::widgets::Widget)]
struct MarkedStruct {
    checked: bool,
}

#[privates_available(crate::widgets::Widget)]
#[privates_available(crate::widgets::Registry)]
fn marked_fn() -> u32 {
    7
}

#[privates_available(widgets::Registry)]
mod marked_mod {
    pub fn inner() -> &'static str {
        "ok"
    }
}

#[test]
fn test_marker_passes_struct_through_unchanged() {
    let s = MarkedStruct { checked: true };
    assert!(s.checked);
}

#[test]
fn test_marker_is_repeatable_on_fn() {
    assert_eq!(marked_fn(), 7);
}

#[test]
fn test_marker_passes_module_through_unchanged() {
    assert_eq!(marked_mod::inner(), "ok");
    let w = widgets::Widget {
        label: "w".to_string(),
    };
    assert_eq!(w.label, "w");
}

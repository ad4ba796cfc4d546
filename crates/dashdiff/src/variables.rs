//! Template variable value comparison.
//!
//! A variable's selected value lives in `current` (and the `options` it was
//! picked from), except for ad-hoc filter variables whose state lives in
//! `filters`. Variables are paired across documents by `(name, type)`; the
//! first matching variable in the initial list wins and duplicates are not
//! detected. Unpaired variables are left to the structural diff.

use serde_json::{Map, Value};

use crate::equal::{deep_equal, deep_equal_opt};

/// `type` of the ad-hoc filter variable kind.
pub const ADHOC_VARIABLE_TYPE: &str = "adhoc";

/// Read-only view over one `templating.list[]` entry.
#[derive(Debug, Clone, Copy)]
pub struct VariableDescriptor<'a> {
    raw: &'a Value,
}

impl<'a> VariableDescriptor<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    pub fn kind(&self) -> Option<&'a str> {
        self.raw.get("type").and_then(Value::as_str)
    }

    pub fn current(&self) -> Option<&'a Value> {
        self.raw.get("current")
    }

    pub fn options(&self) -> Option<&'a Value> {
        self.raw.get("options")
    }

    pub fn filters(&self) -> Option<&'a Value> {
        self.raw.get("filters")
    }

    pub fn is_adhoc(&self) -> bool {
        self.kind() == Some(ADHOC_VARIABLE_TYPE)
    }

    /// Whether `other` is the same variable: equal `name` and `type`.
    pub fn same_variable(&self, other: &VariableDescriptor<'_>) -> bool {
        self.raw.get("name") == other.raw.get("name") && self.raw.get("type") == other.raw.get("type")
    }

    /// Whether the selected value differs from `original`'s.
    ///
    /// `current` is compared for every kind, `filters` additionally for
    /// ad-hoc variables.
    pub fn value_differs(&self, original: &VariableDescriptor<'_>) -> bool {
        if !deep_equal_opt(self.current(), original.current()) {
            return true;
        }
        self.is_adhoc() && !deep_equal_opt(self.filters(), original.filters())
    }
}

/// The `templating.list` of a document, empty when absent.
pub fn variables(doc: &Value) -> &[Value] {
    doc.get("templating")
        .and_then(|t| t.get("list"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn variables_mut(doc: &mut Value) -> Option<&mut Vec<Value>> {
    doc.get_mut("templating")?.get_mut("list")?.as_array_mut()
}

/// Index of the first variable in `list` paired with `variable`.
pub fn find_paired(list: &[Value], variable: &VariableDescriptor<'_>) -> Option<usize> {
    list.iter()
        .position(|candidate| variable.same_variable(&VariableDescriptor::new(candidate)))
}

/// Compare variable values between `changed` and `initial`, and unless
/// `save_variables` is set, copy the initial values back into `changed`.
///
/// Returns whether any paired variable's value differed. The dead
/// `current.selected` field is stripped from every paired initial variable
/// first, so it can neither flag a change nor leak back into `changed`.
pub fn apply_variable_changes(changed: &mut Value, initial: &mut Value, save_variables: bool) -> bool {
    let (Some(changed_list), Some(initial_list)) = (variables_mut(changed), variables_mut(initial)) else {
        return false;
    };

    let mut has_changes = false;
    for variable in changed_list.iter_mut() {
        let Some(idx) = find_paired(initial_list, &VariableDescriptor::new(variable)) else {
            continue;
        };
        let original = &mut initial_list[idx];
        strip_legacy_selected(original);
        let original = &*original;

        if VariableDescriptor::new(variable).value_differs(&VariableDescriptor::new(original)) {
            has_changes = true;
        }
        if !save_variables {
            restore_value(variable, original);
        }
    }
    has_changes
}

fn strip_legacy_selected(variable: &mut Value) {
    if let Some(Value::Object(current)) = variable.get_mut("current") {
        current.shift_remove("selected");
    }
}

fn restore_value(variable: &mut Value, original: &Value) {
    let Value::Object(target) = variable else {
        return;
    };
    if VariableDescriptor::new(original).is_adhoc() {
        restore_field(target, original, "filters");
    } else {
        restore_field(target, original, "current");
        restore_field(target, original, "options");
    }
}

/// Set `target[key]` to `source[key]`, or remove it when `source` has none.
///
/// An existing key keeps its position in `target`.
pub(crate) fn restore_field(target: &mut Map<String, Value>, source: &Value, key: &str) {
    match source.get(key) {
        Some(value) => {
            if target.get(key).is_some_and(|existing| deep_equal(existing, value)) {
                return;
            }
            target.insert(key.to_owned(), value.clone());
        }
        None => {
            target.shift_remove(key);
        }
    }
}

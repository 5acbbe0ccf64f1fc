//! Controlled-input plumbing and presence checks.

use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Trimmed value, or `None` when empty or whitespace only.
pub fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Name of the first blank field, in the order given.
pub fn first_missing<'a>(fields: &[(&'a str, &str)]) -> Option<&'a str> {
    fields
        .iter()
        .find(|(_, value)| required(value).is_none())
        .map(|(name, _)| *name)
}

/// `oninput` handler writing the element's value into `state`.
pub fn bind(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
            state.set(input.value());
        } else if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
            state.set(area.value());
        }
    })
}

/// `onchange` handler for a `<select>`.
pub fn bind_select(state: &UseStateHandle<String>) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        state.set(select.value());
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_missing() {
        assert_eq!(required(""), None);
        assert_eq!(required("   \t\n"), None);
        assert_eq!(required("  DSA "), Some("DSA".to_string()));
    }

    #[test]
    fn first_missing_follows_field_order() {
        let fields = [("name", "Ada"), ("email", " "), ("password", "")];
        assert_eq!(first_missing(&fields), Some("email"));
        assert_eq!(first_missing(&[("email", "a@b.c"), ("password", "x")]), None);
    }
}

use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// State and callbacks for one settings field that only accepts valid numbers.
#[derive(Clone)]
pub struct ValidatedInput<T: Clone + PartialEq + 'static> {
    /// What the user has typed so far.
    pub text: String,
    /// Last value that passed validation.
    pub value: T,
    pub error: Option<String>,
    pub on_text_input: Callback<InputEvent>,
    /// Validate the current text; wire to `onchange` and Enter.
    pub on_commit: Callback<()>,
    /// Reset the field to a known-good value, clearing any error.
    pub set_value: Callback<T>,
}

/// Keep a text field and its parsed value in step.
///
/// Invalid text leaves `value` at the last accepted number and reports the
/// problem through `error`.
#[hook]
pub fn use_validated_input<T: Clone + PartialEq + std::fmt::Display + 'static>(
    initial_value: T,
    parse_and_validate: Rc<dyn Fn(&str) -> Result<T, String>>,
) -> ValidatedInput<T> {
    let value_handle: UseStateHandle<T> = use_state(|| initial_value.clone());
    let text_handle: UseStateHandle<String> = use_state(|| initial_value.to_string());
    let error_handle: UseStateHandle<Option<String>> = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let text = text_handle.clone();
        let value_setter = value_handle.clone();
        let error_setter = error_handle.clone();
        let parse_fn = parse_and_validate.clone();

        Callback::from(move |_| match parse_fn(&text) {
            Ok(parsed) => {
                // canonical form, e.g. "2,50" becomes "2.5"
                text.set(parsed.to_string());
                value_setter.set(parsed);
                error_setter.set(None);
            }
            Err(msg) => error_setter.set(Some(msg)),
        })
    };

    let set_value = {
        let value_setter = value_handle.clone();
        let text_setter = text_handle.clone();
        let error_setter = error_handle.clone();
        Callback::from(move |new_val: T| {
            text_setter.set(new_val.to_string());
            value_setter.set(new_val);
            error_setter.set(None);
        })
    };

    ValidatedInput {
        text: (*text_handle).clone(),
        value: (*value_handle).clone(),
        error: (*error_handle).clone(),
        on_text_input,
        on_commit,
        set_value,
    }
}

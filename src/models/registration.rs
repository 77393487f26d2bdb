// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Registration page markup and typed handles to the nodes the engine touches.

use crate::config::FormOptions;
use crate::models::attachment::{EMPTY_INFO, EMPTY_LABEL};
use crate::models::document::{Document, InputType, Node, NodeId, Tag};

/// Class of the wrapper around one labelled field or choice group.
pub const FIELD_CLASS: &str = "inputfield";

/// Handles to the nodes wired to event handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormRefs {
    pub fname: NodeId,
    pub lname: NodeId,
    pub dob: NodeId,
    pub age: NodeId,
    pub email: NodeId,
    pub phone: NodeId,
    pub pincode: NodeId,
    pub state: NodeId,
    pub password: NodeId,
    pub confirm: NodeId,
    pub password_message: NodeId,
    pub strength_bars: Vec<NodeId>,
    pub file: NodeId,
    pub file_label: NodeId,
    pub file_info: NodeId,
    pub remove_file: NodeId,
    pub submit: NodeId,
    pub reset: NodeId,
}

/// Build the registration page and return it with its node handles.
pub fn build(options: &FormOptions) -> (Document, FormRefs) {
    let mut doc = Document::new();
    let root = doc.root();

    let fname = text_field(&mut doc, "First Name", InputType::Text, "fname");
    let lname = text_field(&mut doc, "Last Name", InputType::Text, "lname");
    let dob = text_field(&mut doc, "Date of Birth", InputType::Date, "dob");

    let age_field = field(&mut doc, "Age");
    let age = doc.append(
        age_field,
        Node::input(InputType::Number)
            .with_id("age")
            .with_name("age")
            .required()
            .readonly(),
    );

    let gender_field = field(&mut doc, "Gender");
    let gender_options = doc.append(gender_field, Node::new(Tag::Div).with_class("choices"));
    for option in ["Male", "Female", "Other"] {
        doc.append(
            gender_options,
            Node::input(InputType::Radio)
                .with_name("gender")
                .with_value(&option.to_lowercase())
                .with_text(option)
                .required(),
        );
    }

    let email = text_field(&mut doc, "Email", InputType::Email, "email");

    let phone_field = field(&mut doc, "Phone Number");
    let phone_box = doc.append(phone_field, Node::new(Tag::Div).with_class("phone-input"));
    doc.append(phone_box, Node::new(Tag::Span).with_class("prefix").with_text("+91"));
    let phone = doc.append(
        phone_box,
        Node::input(InputType::Tel)
            .with_id("phone-number")
            .with_name("phone-number")
            .required(),
    );

    let pincode = text_field(&mut doc, "Pin Code", InputType::Text, "pincode");

    let state_field = field(&mut doc, "State");
    let state_box = doc.append(state_field, Node::new(Tag::Div).with_class("custom_select"));
    let state = doc.append(
        state_box,
        Node::new(Tag::Select)
            .with_id("state")
            .with_name("state")
            .with_options(options.states.clone())
            .required(),
    );

    let password_field = field(&mut doc, "Password");
    let password = password_input(&mut doc, password_field, "password");
    let meter = doc.append(
        password_field,
        Node::new(Tag::Div).with_class("password-strength"),
    );
    let strength_bars = (0..5)
        .map(|_| {
            doc.append(
                meter,
                Node::new(Tag::Span)
                    .with_class("bar")
                    .with_attr("background-color", crate::logic::password::EMPTY_BAR_COLOR),
            )
        })
        .collect();

    let confirm_field = field(&mut doc, "Confirm Password");
    let confirm = password_input(&mut doc, confirm_field, "confirm-password");
    let password_message = doc.append(
        confirm_field,
        Node::new(Tag::Div).with_id("password-message"),
    );

    if !options.hobbies.is_empty() {
        let hobbies_field = field(&mut doc, "Hobbies");
        let hobby_options = doc.append(hobbies_field, Node::new(Tag::Div).with_class("choices"));
        for hobby in &options.hobbies {
            doc.append(
                hobby_options,
                Node::input(InputType::Checkbox)
                    .with_name("hobbies")
                    .with_value(&hobby.to_lowercase())
                    .with_text(hobby),
            );
        }
    }

    let upload_field = field(&mut doc, "Resume");
    let upload = doc.append(upload_field, Node::new(Tag::Div).with_class("file-upload"));
    let mut file_node = Node::input(InputType::File).with_id("myfile").with_name("myfile");
    if options.require_attachment {
        file_node = file_node.required();
    }
    let file = doc.append(upload, file_node);
    let label = doc.append(upload, Node::new(Tag::Label).with_class("file-label"));
    let file_label = doc.append(label, Node::new(Tag::Span).with_text(EMPTY_LABEL));
    let file_info = doc.append(
        upload,
        Node::new(Tag::Span).with_class("file-info").with_text(EMPTY_INFO),
    );
    let remove_file = doc.append(
        upload,
        Node::new(Tag::Button)
            .with_id("remove-file")
            .with_text("Remove")
            .hidden(),
    );

    let terms = doc.append(
        root,
        Node::new(Tag::Div).with_class(FIELD_CLASS).with_class("terms"),
    );
    let check = doc.append(terms, Node::new(Tag::Label).with_class("check"));
    doc.append(
        check,
        Node::input(InputType::Checkbox)
            .with_name("terms")
            .with_value("accepted")
            .with_text("I agree to the terms and conditions"),
    );

    let actions = doc.append(root, Node::new(Tag::Div).with_class("buttons"));
    let submit = doc.append(
        actions,
        Node::new(Tag::Button)
            .with_class("btn-primary")
            .with_attr("type", "submit")
            .with_text("Register"),
    );
    let reset = doc.append(
        actions,
        Node::new(Tag::Button)
            .with_class("btn-secondary")
            .with_attr("type", "reset")
            .with_text("Reset"),
    );

    let refs = FormRefs {
        fname,
        lname,
        dob,
        age,
        email,
        phone,
        pincode,
        state,
        password,
        confirm,
        password_message,
        strength_bars,
        file,
        file_label,
        file_info,
        remove_file,
        submit,
        reset,
    };
    (doc, refs)
}

/// Labelled `.inputfield` wrapper appended to the form.
fn field(doc: &mut Document, label: &str) -> NodeId {
    let root = doc.root();
    let wrapper = doc.append(root, Node::new(Tag::Div).with_class(FIELD_CLASS));
    doc.append(wrapper, Node::new(Tag::Label).with_text(label));
    wrapper
}

/// Required single-line input directly inside its wrapper.
fn text_field(doc: &mut Document, label: &str, kind: InputType, id: &str) -> NodeId {
    let wrapper = field(doc, label);
    doc.append(
        wrapper,
        Node::input(kind).with_id(id).with_name(id).required(),
    )
}

/// Password input plus visibility toggle inside a `.password-container`.
fn password_input(doc: &mut Document, wrapper: NodeId, id: &str) -> NodeId {
    let container = doc.append(wrapper, Node::new(Tag::Div).with_class("password-container"));
    let input = doc.append(
        container,
        Node::input(InputType::Password)
            .with_id(id)
            .with_name(id)
            .required(),
    );
    doc.append(
        container,
        Node::new(Tag::Icon)
            .with_class("toggle-password")
            .with_class("fa-eye")
            .with_attr("data-target", id),
    );
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_addressable_fields() {
        let (doc, refs) = build(&FormOptions::default());

        assert_eq!(doc.by_id("fname"), Some(refs.fname));
        assert_eq!(doc.by_id("phone-number"), Some(refs.phone));
        assert_eq!(doc.by_id("confirm-password"), Some(refs.confirm));
        assert_eq!(doc.by_name("gender").len(), 3);
        assert_eq!(doc.by_name("hobbies").len(), 4);
        assert_eq!(refs.strength_bars.len(), 5);
        assert!(doc.node(refs.age).readonly);
        assert!(doc.node(refs.file).required);
        assert!(doc.node(refs.remove_file).hidden);
    }

    #[test]
    fn composite_widgets_wrap_their_inputs() {
        let (doc, refs) = build(&FormOptions::default());

        assert!(doc.closest(refs.password, "password-container").is_some());
        assert!(doc.closest(refs.phone, "phone-input").is_some());
        assert!(doc.closest(refs.file, "file-upload").is_some());
        assert!(doc.closest(refs.state, "custom_select").is_some());
        assert!(doc.closest(refs.email, "password-container").is_none());
    }

    #[test]
    fn options_drop_hobbies_and_attachment_requirement() {
        let options = FormOptions {
            require_attachment: false,
            hobbies: Vec::new(),
            ..FormOptions::default()
        };
        let (doc, refs) = build(&options);

        assert!(doc.by_name("hobbies").is_empty());
        assert!(!doc.node(refs.file).required);
    }
}

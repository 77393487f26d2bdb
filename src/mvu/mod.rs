// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel: the form session, its messages, and side-effect commands.

use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::FormOptions;
use crate::logic::age::{AgeFields, on_date_blur, on_date_change};
use crate::logic::display::clear_adjacent_error;
use crate::logic::gate::{BLOCKED_NOTICE, GateFields, evaluate};
use crate::logic::password::{
    PasswordFields, check_password_match, toggle_visibility, update_strength_meter,
};
use crate::logic::reset::{ResetFields, reset_form, settle_after_reset};
use crate::logic::upload::{Selection, UploadFields, on_files_selected, remove_file};
use crate::logic::validator::validate_field;
use crate::models::attachment::FileMeta;
use crate::models::document::{Document, InputType, NodeId};
use crate::models::registration::{self, FormRefs};
use crate::models::rules::RuleTable;

/// Class added to a button for a moment after it was pressed.
pub const CLICKED_CLASS: &str = "clicked";

/// How long the pressed look stays on a button.
pub const CLICK_FLOURISH: Duration = Duration::from_millis(100);

/// Delay before the post-reset cleanup pass.
pub const RESET_SETTLE: Duration = Duration::from_millis(10);

/// The single form session owned by the UI thread.
pub struct FormModel {
    /// Page tree holding values, markers, and annotations.
    pub doc: Document,
    /// Handles to the nodes wired to handlers.
    pub refs: FormRefs,
    /// Validation rules, built once.
    pub rules: RuleTable,
    /// Blocking notice shown in a modal until dismissed.
    pub notice: Option<String>,
    /// Latest status line.
    pub status: Option<String>,
    /// Node the view should bring into view on the next frame.
    pub scroll_target: Option<NodeId>,
    /// Count of queued background commands.
    pub pending_commands: usize,
    today: fn() -> NaiveDate,
}

impl FormModel {
    pub fn new(options: &FormOptions) -> Result<Self> {
        let rules = RuleTable::registration()?;
        let (doc, refs) = registration::build(options);
        Ok(Self {
            doc,
            refs,
            rules,
            notice: None,
            status: None,
            scroll_target: None,
            pending_commands: 0,
            today: local_today,
        })
    }

    fn age_fields(&self) -> AgeFields {
        AgeFields {
            dob: self.refs.dob,
            age: self.refs.age,
        }
    }

    fn password_fields(&self) -> PasswordFields {
        PasswordFields {
            password: self.refs.password,
            confirm: self.refs.confirm,
            message: self.refs.password_message,
        }
    }

    fn upload_fields(&self) -> UploadFields {
        UploadFields {
            file: self.refs.file,
            label: self.refs.file_label,
            info: self.refs.file_info,
            remove: self.refs.remove_file,
        }
    }

    fn gate_fields(&self) -> GateFields {
        GateFields {
            password: self.refs.password,
            confirm: self.refs.confirm,
            file: self.refs.file,
        }
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Messages routed through the update function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// Keystroke-level edit of a text control.
    Input { node: NodeId, value: String },
    /// A control lost focus.
    Blur(NodeId),
    /// Committed value change (date picker, dropdown).
    Changed { node: NodeId, value: String },
    /// Radio or checkbox toggled.
    SetChecked { node: NodeId, checked: bool },
    ToggleVisibility(NodeId),
    RequestPickFile,
    FilesSelected(Vec<FileMeta>),
    FilePickFailed(String),
    RemoveFile,
    /// Submit or reset button pressed.
    ButtonClicked(NodeId),
    ClickSettled(NodeId),
    ResetSettled,
    SubmitCompleted { fields: usize },
    /// The view brought `scroll_target` into view.
    ScrolledToError,
    DismissNotice,
}

/// Commands represent side-effects executed off the UI thread.
#[derive(Debug)]
pub enum Command {
    PickFile,
    /// Deliver `msg` once `delay` elapsed.
    After { delay: Duration, msg: Box<Msg> },
    /// Hand the accepted form data onward.
    Submit(Vec<(String, String)>),
}

/// Update the form session and enqueue commands.
pub fn update(model: &mut FormModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Input { node, value } => on_input(model, node, value),
        Msg::Blur(node) => on_blur(model, node),
        Msg::Changed { node, value } => {
            model.doc.set_value(node, value);
            if node == model.refs.dob {
                let fields = model.age_fields();
                if let Some(notice) =
                    on_date_change(&mut model.doc, &model.rules, fields, (model.today)())
                {
                    model.notice = Some(notice.to_string());
                }
            }
        }
        Msg::SetChecked { node, checked } => set_checked(model, node, checked),
        Msg::ToggleVisibility(toggle) => {
            if !toggle_visibility(&mut model.doc, toggle) {
                warn!(?toggle, "visibility toggle without password target");
            }
        }
        Msg::RequestPickFile => cmds.push(Command::PickFile),
        Msg::FilesSelected(files) => {
            let fields = model.upload_fields();
            match on_files_selected(&mut model.doc, fields, files) {
                Selection::Accepted(file) => {
                    model.status = Some(format!("Attached {}", file.describe()));
                }
                Selection::Rejected(file) => {
                    model.status = Some(format!("Rejected {}", file.name));
                }
                Selection::Empty => model.status = None,
            }
        }
        Msg::FilePickFailed(err) => {
            warn!(%err, "file selection failed");
            model.status = Some(format!("Failed to read file: {err}"));
        }
        Msg::RemoveFile => {
            let fields = model.upload_fields();
            remove_file(&mut model.doc, fields);
        }
        Msg::ButtonClicked(button) => on_button(model, button, cmds),
        Msg::ClickSettled(button) => model.doc.node_mut(button).remove_class(CLICKED_CLASS),
        Msg::ResetSettled => settle_after_reset(&mut model.doc),
        Msg::SubmitCompleted { fields } => {
            model.status = Some(format!("Registration submitted ({fields} fields)."));
        }
        Msg::ScrolledToError => model.scroll_target = None,
        Msg::DismissNotice => model.notice = None,
    }
}

/// Execute a command and return the resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::PickFile => {
            let picked = rfd::FileDialog::new()
                .set_title("Select your resume")
                .pick_file();
            match picked {
                Some(path) => match FileMeta::from_path(&path) {
                    Ok(meta) => Msg::FilesSelected(vec![meta]),
                    Err(err) => Msg::FilePickFailed(format!("{err:#}")),
                },
                None => Msg::FilesSelected(Vec::new()),
            }
        }
        Command::After { delay, msg } => {
            std::thread::sleep(delay);
            *msg
        }
        Command::Submit(data) => {
            for (key, value) in &data {
                debug!(%key, len = value.len(), "submitted field");
            }
            info!(fields = data.len(), "registration submitted");
            Msg::SubmitCompleted { fields: data.len() }
        }
    }
}

fn on_input(model: &mut FormModel, node: NodeId, value: String) {
    if model.doc.node(node).readonly {
        return;
    }
    model.doc.set_value(node, value);

    let target = model.doc.node(node);
    let live_clear = target.required
        && !target.is_choice()
        && target.input_type() != Some(InputType::File);
    if live_clear {
        clear_adjacent_error(&mut model.doc, node);
    }

    let fields = model.password_fields();
    if node == model.refs.password {
        let password = model.doc.value(node).to_string();
        update_strength_meter(&mut model.doc, &model.refs.strength_bars, &password);
        if !model.doc.value(model.refs.confirm).is_empty() {
            check_password_match(&mut model.doc, fields);
        }
    } else if node == model.refs.confirm {
        check_password_match(&mut model.doc, fields);
    }
}

fn on_blur(model: &mut FormModel, node: NodeId) {
    let target = model.doc.node(node);
    if target.required && !target.is_choice() && target.input_type() != Some(InputType::File) {
        validate_field(&mut model.doc, &model.rules, node);
    }
    if node == model.refs.dob {
        let fields = model.age_fields();
        if let Some(notice) = on_date_blur(&mut model.doc, &model.rules, fields, (model.today)()) {
            model.notice = Some(notice.to_string());
        }
    }
}

fn set_checked(model: &mut FormModel, node: NodeId, checked: bool) {
    let target = model.doc.node(node);
    match target.input_type() {
        Some(InputType::Radio) => {
            if let Some(name) = target.name.clone() {
                for member in model.doc.by_name(&name) {
                    model.doc.node_mut(member).checked = false;
                }
            }
            model.doc.node_mut(node).checked = true;
        }
        Some(InputType::Checkbox) => model.doc.node_mut(node).checked = checked,
        _ => debug!(?node, "checked state on non-choice control ignored"),
    }
}

fn on_button(model: &mut FormModel, button: NodeId, cmds: &mut Vec<Command>) {
    model.doc.node_mut(button).add_class(CLICKED_CLASS);
    cmds.push(Command::After {
        delay: CLICK_FLOURISH,
        msg: Box::new(Msg::ClickSettled(button)),
    });

    if button == model.refs.submit {
        submit(model, cmds);
    } else if button == model.refs.reset {
        reset(model, cmds);
    }
}

fn submit(model: &mut FormModel, cmds: &mut Vec<Command>) {
    let fields = model.gate_fields();
    let report = evaluate(&mut model.doc, &model.rules, fields);
    if report.valid {
        model.status = Some("Submitting registration…".into());
        cmds.push(Command::Submit(model.doc.form_data()));
    } else {
        model.scroll_target = report.first_error;
        model.notice = Some(BLOCKED_NOTICE.into());
        model.status = Some(format!("{} problem(s) found.", report.failures));
    }
}

fn reset(model: &mut FormModel, cmds: &mut Vec<Command>) {
    let upload = model.upload_fields();
    reset_form(
        &mut model.doc,
        ResetFields {
            upload,
            strength_bars: &model.refs.strength_bars,
            password_message: model.refs.password_message,
        },
    );
    model.scroll_target = None;
    model.status = Some("Form reset.".into());
    cmds.push(Command::After {
        delay: RESET_SETTLE,
        msg: Box::new(Msg::ResetSettled),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::age::AGE_NOTICE;
    use crate::logic::display::{INVALID_CLASS, all_errors, error_text, show_error};
    use crate::logic::gate::SELECT_OPTION_MESSAGE;
    use crate::logic::password::{BAR_COLOR_ATTR, MISMATCH_TEXT};
    use crate::models::attachment::{MAX_FILE_BYTES, OVERSIZE_MESSAGE};
    use std::fs;
    use tempfile::TempDir;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn model() -> FormModel {
        FormModel {
            today: fixed_today,
            ..FormModel::new(&FormOptions::default()).unwrap()
        }
    }

    fn send(model: &mut FormModel, msg: Msg) -> Vec<Command> {
        let mut cmds = Vec::new();
        update(model, msg, &mut cmds);
        cmds
    }

    fn type_into(model: &mut FormModel, node: NodeId, value: &str) {
        send(
            model,
            Msg::Input {
                node,
                value: value.into(),
            },
        );
    }

    fn fill_valid(model: &mut FormModel) {
        let refs = model.refs.clone();
        type_into(model, refs.fname, "Ada");
        type_into(model, refs.lname, "Lovelace");
        send(
            model,
            Msg::Changed {
                node: refs.dob,
                value: "2000-01-01".into(),
            },
        );
        type_into(model, refs.email, "ada@example.com");
        type_into(model, refs.phone, "9876543210");
        type_into(model, refs.pincode, "560001");
        send(
            model,
            Msg::Changed {
                node: refs.state,
                value: "Kerala".into(),
            },
        );
        type_into(model, refs.password, "Str0ng!Pass");
        type_into(model, refs.confirm, "Str0ng!Pass");
        let gender = model.doc.by_name("gender")[1];
        send(model, Msg::SetChecked { node: gender, checked: true });
        let hobby = model.doc.by_name("hobbies")[0];
        send(model, Msg::SetChecked { node: hobby, checked: true });
        send(model, Msg::FilesSelected(vec![FileMeta::new("cv.pdf", 4096)]));
    }

    #[test]
    fn valid_submit_enqueues_and_completes() {
        let mut model = model();
        fill_valid(&mut model);
        let submit = model.refs.submit;

        let cmds = send(&mut model, Msg::ButtonClicked(submit));

        assert!(model.notice.is_none());
        assert!(model.doc.node(submit).has_class(CLICKED_CLASS));
        let data = cmds
            .into_iter()
            .find_map(|c| match c {
                Command::Submit(data) => Some(data),
                _ => None,
            })
            .expect("submit command");
        assert!(data.contains(&("age".to_string(), "24".to_string())));
        assert!(data.contains(&("gender".to_string(), "female".to_string())));
        assert!(data.contains(&("myfile".to_string(), "cv.pdf".to_string())));

        let msg = run_command(Command::Submit(data));
        send(&mut model, msg);
        assert!(
            model
                .status
                .as_deref()
                .is_some_and(|s| s.contains("Registration submitted"))
        );
    }

    #[test]
    fn blocked_submit_sets_notice_and_scroll_target() {
        let mut model = model();
        fill_valid(&mut model);
        for radio in model.doc.by_name("gender") {
            model.doc.node_mut(radio).checked = false;
        }
        let submit = model.refs.submit;

        let cmds = send(&mut model, Msg::ButtonClicked(submit));

        assert!(!cmds.iter().any(|c| matches!(c, Command::Submit(_))));
        assert_eq!(model.notice.as_deref(), Some(BLOCKED_NOTICE));
        let errors = all_errors(&model.doc);
        assert_eq!(errors.len(), 1);
        assert_eq!(model.doc.node(errors[0]).text, SELECT_OPTION_MESSAGE);
        assert_eq!(model.scroll_target, Some(errors[0]));

        send(&mut model, Msg::ScrolledToError);
        send(&mut model, Msg::DismissNotice);
        assert!(model.scroll_target.is_none());
        assert!(model.notice.is_none());
    }

    #[test]
    fn click_flourish_is_removed_after_delay() {
        let mut model = model();
        let reset = model.refs.reset;

        let cmds = send(&mut model, Msg::ButtonClicked(reset));
        assert!(model.doc.node(reset).has_class(CLICKED_CLASS));

        let settle = cmds
            .into_iter()
            .find(|c| matches!(c, Command::After { msg, .. } if **msg == Msg::ClickSettled(reset)))
            .expect("flourish timer");
        let msg = run_command(settle);
        send(&mut model, msg);

        assert!(!model.doc.node(reset).has_class(CLICKED_CLASS));
    }

    #[test]
    fn typing_clears_only_adjacent_annotation() {
        let mut model = model();
        let refs = model.refs.clone();
        show_error(&mut model.doc, refs.email, "Please enter a valid email address");
        show_error(&mut model.doc, refs.phone, "Phone number must start with 6-9 and have 10 digits");

        type_into(&mut model, refs.email, "a");
        type_into(&mut model, refs.phone, "9");

        assert_eq!(error_text(&model.doc, refs.email), None);
        assert!(!model.doc.node(refs.phone).has_class(INVALID_CLASS));
        assert!(error_text(&model.doc, refs.phone).is_some());
    }

    #[test]
    fn blur_validates_required_field() {
        let mut model = model();
        let pincode = model.refs.pincode;
        type_into(&mut model, pincode, "12");

        send(&mut model, Msg::Blur(pincode));

        assert_eq!(
            error_text(&model.doc, pincode),
            Some("Pin code must be a 6-digit number")
        );
    }

    #[test]
    fn picking_too_young_dob_raises_notice() {
        let mut model = model();
        let refs = model.refs.clone();

        send(
            &mut model,
            Msg::Changed {
                node: refs.dob,
                value: "2010-01-01".into(),
            },
        );

        assert_eq!(model.notice.as_deref(), Some(AGE_NOTICE));
        assert_eq!(model.doc.value(refs.age), "");
    }

    #[test]
    fn age_field_ignores_typing() {
        let mut model = model();
        let age = model.refs.age;
        type_into(&mut model, age, "42");
        assert_eq!(model.doc.value(age), "");
    }

    #[test]
    fn password_typing_drives_meter_and_match() {
        let mut model = model();
        let refs = model.refs.clone();
        type_into(&mut model, refs.confirm, "Str0ng!Pas");
        assert_eq!(model.doc.node(refs.password_message).text, MISMATCH_TEXT);

        type_into(&mut model, refs.password, "Str0ng!Pas");

        assert!(
            refs.strength_bars
                .iter()
                .all(|b| model.doc.node(*b).attr(BAR_COLOR_ATTR) == Some("#4caf50"))
        );
        assert!(!model.doc.node(refs.confirm).has_class(INVALID_CLASS));
    }

    #[test]
    fn radio_selection_is_exclusive() {
        let mut model = model();
        let radios = model.doc.by_name("gender");
        send(&mut model, Msg::SetChecked { node: radios[0], checked: true });
        send(&mut model, Msg::SetChecked { node: radios[2], checked: true });

        let checked: Vec<_> = radios.iter().map(|r| model.doc.node(*r).checked).collect();
        assert_eq!(checked, [false, false, true]);
    }

    #[test]
    fn reset_schedules_settle_pass() {
        let mut model = model();
        fill_valid(&mut model);
        let reset = model.refs.reset;

        let cmds = send(&mut model, Msg::ButtonClicked(reset));

        assert_eq!(model.doc.value(model.refs.fname), "");
        assert!(cmds.iter().any(
            |c| matches!(c, Command::After { delay, msg } if *delay == RESET_SETTLE && **msg == Msg::ResetSettled)
        ));
    }

    #[test]
    fn picked_file_from_disk_is_checked_against_limit() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("huge.pdf");
        fs::write(&path, vec![0u8; MAX_FILE_BYTES as usize + 1]).unwrap();
        let meta = FileMeta::from_path(&path).unwrap();
        let mut model = model();

        send(&mut model, Msg::FilesSelected(vec![meta]));

        assert_eq!(error_text(&model.doc, model.refs.file), Some(OVERSIZE_MESSAGE));
        assert!(model.doc.node(model.refs.file).files.is_empty());
    }

    #[test]
    fn pending_commands_track_dispatch() {
        let mut model = model();
        let cmds = send(&mut model, Msg::RequestPickFile);
        assert_eq!(cmds.len(), 1);

        model.pending_commands += cmds.len();
        send(&mut model, Msg::FilesSelected(Vec::new()));
        model.pending_commands = model.pending_commands.saturating_sub(1);

        assert_eq!(model.pending_commands, 0);
    }
}

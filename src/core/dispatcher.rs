use crate::core::command::EditorCommand;
use crate::core::file_dialog::DialogMode;
use crate::core::message_box::MessageBox;
use crate::core::shell::{ActionOutcome, EditorActions, EditorShell};

/// Result of command dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    /// Command executed
    Success,
    /// Command not handled here
    NotHandled,
    /// Exit requested
    Exit,
    /// Command needs a file chosen before completing
    NeedsFile(DialogMode),
    /// Show a modal message box
    Message(MessageBox),
    /// Open the menu bar
    OpenMenu,
}

impl From<ActionOutcome> for DispatchResult {
    fn from(outcome: ActionOutcome) -> Self {
        match outcome {
            ActionOutcome::Done => DispatchResult::Success,
            ActionOutcome::NeedsFile(mode) => DispatchResult::NeedsFile(mode),
        }
    }
}

/// Route a File or Edit menu command to the matching action
pub fn route(command: EditorCommand, actions: &mut dyn EditorActions) -> Option<ActionOutcome> {
    let outcome = match command {
        EditorCommand::NewFile => actions.new_file(),
        EditorCommand::OpenFile => actions.open_file(),
        EditorCommand::Save => actions.save(),
        EditorCommand::SaveAs => actions.save_as(),
        EditorCommand::Cut => actions.cut(),
        EditorCommand::Copy => actions.copy(),
        EditorCommand::Paste => actions.paste(),
        _ => return None,
    };
    Some(outcome)
}

/// Execute a command against the shell.
///
/// `extend` is set when Shift was held, so movement commands grow the
/// selection. `page_rows` is the visible text height used by PageUp/PageDown.
pub fn dispatch(
    shell: &mut EditorShell,
    command: EditorCommand,
    extend: bool,
    page_rows: usize,
) -> DispatchResult {
    tracing::trace!(command = %command, extend, "dispatch");

    if let Some(outcome) = route(command, shell) {
        return outcome.into();
    }

    match command {
        EditorCommand::Exit => return DispatchResult::Exit,
        EditorCommand::About => return DispatchResult::Message(MessageBox::about()),
        EditorCommand::ReleaseNotes => {
            return DispatchResult::Message(MessageBox::release_notes());
        }
        EditorCommand::OpenMenu => return DispatchResult::OpenMenu,
        EditorCommand::SelectAll => shell.select_all(),
        EditorCommand::ForwardChar => shell.move_right(extend),
        EditorCommand::BackwardChar => shell.move_left(extend),
        EditorCommand::NextLine => shell.move_down(extend),
        EditorCommand::PreviousLine => shell.move_up(extend),
        EditorCommand::LineStart => shell.line_start(extend),
        EditorCommand::LineEnd => shell.line_end(extend),
        EditorCommand::BufferStart => shell.buffer_start(extend),
        EditorCommand::BufferEnd => shell.buffer_end(extend),
        EditorCommand::PageUp => shell.page_up(page_rows, extend),
        EditorCommand::PageDown => shell.page_down(page_rows, extend),
        EditorCommand::InsertNewline => shell.insert_newline(),
        EditorCommand::InsertTab => shell.insert_tab(),
        EditorCommand::DeleteBackward => shell.delete_backward(),
        EditorCommand::DeleteForward => shell.delete_forward(),
        _ => return DispatchResult::NotHandled,
    }
    DispatchResult::Success
}

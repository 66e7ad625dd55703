use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// Blocking error dialog
pub fn show_error(title: &str, description: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}

use std::path::PathBuf;

/// Asks the operator for the root output directory
pub trait DirectoryChooser {
    /// `None` when the operator cancels
    fn choose(&mut self) -> Option<PathBuf>;
}

/// Native folder picker
#[derive(Debug, Default)]
pub struct NativeDirectoryChooser;

impl DirectoryChooser for NativeDirectoryChooser {
    fn choose(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Choose Save Directory")
            .pick_folder()
    }
}

//! Asking the user before an existing file is replaced.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Decides whether an existing output file may be overwritten.
pub trait ConfirmOverwrite {
    /// Returns `Ok(true)` to overwrite `path`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while asking.
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool>;
}

/// Prompts on a writer and reads the answer from a reader.
///
/// Reads a whole line rather than a single keystroke, so the answer needs
/// Enter. Only a reply starting with `n` or `N` declines; an empty line or
/// end of input accepts.
pub struct ConsoleConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleConfirm<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl ConsoleConfirm<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr and read from stdin, keeping stdout for the report.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> ConfirmOverwrite for ConsoleConfirm<R, W> {
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool> {
        write!(
            self.output,
            "File {} already exists. Overwrite? [Y/n] ",
            path.display()
        )?;
        self.output.flush()?;

        let mut answer: String = String::new();
        self.input.read_line(&mut answer)?;
        let declined: bool = answer.trim_start().starts_with(['n', 'N']);
        Ok(!declined)
    }
}

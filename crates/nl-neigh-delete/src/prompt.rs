//! Interactive yes/no confirmation before each deletion

use std::fmt;
use std::io::{self, ErrorKind, Read, Write};
use tracing::debug;

/// Whether the prompt is waiting for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Idle,
    AwaitingAnswer,
}

/// Synchronous confirmation prompt over a byte input and a text output
///
/// Input is consumed one byte at a time. Anything other than `y`, `n` or a
/// newline is ignored, a bare newline selects the default answer, and once a
/// `y`/`n` is seen the remainder of that line is discarded.
pub struct ConfirmationPrompt<R, W> {
    input: R,
    output: W,
    state: PromptState,
}

impl<R: Read, W: Write> ConfirmationPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            state: PromptState::Idle,
        }
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    /// Shows `entry` and blocks until the user answers
    ///
    /// Returns `Ok(true)` to delete. End of input counts as "no".
    pub fn confirm(&mut self, entry: &dyn fmt::Display, default_yes: bool) -> io::Result<bool> {
        let (yes, no) = if default_yes { ('Y', 'n') } else { ('y', 'N') };
        writeln!(self.output, "{}", entry)?;
        write!(self.output, "Delete? ({}/{}) ", yes, no)?;
        self.output.flush()?;

        self.state = PromptState::AwaitingAnswer;
        let answer = self.read_answer(default_yes);
        self.state = PromptState::Idle;
        answer
    }

    fn read_answer(&mut self, default_yes: bool) -> io::Result<bool> {
        loop {
            let Some(byte) = self.next_byte()? else {
                debug!("Input closed while waiting for an answer, declining");
                return Ok(false);
            };

            let answer = match byte.to_ascii_lowercase() {
                b'\n' => return Ok(default_yes),
                b'y' => true,
                b'n' => false,
                _ => continue,
            };

            self.discard_line()?;
            return Ok(answer);
        }
    }

    fn discard_line(&mut self) -> io::Result<()> {
        while let Some(byte) = self.next_byte()? {
            if byte == b'\n' {
                break;
            }
        }
        Ok(())
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

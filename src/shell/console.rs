use super::ShellError;
use std::io::{BufRead, Write};

/// Request/response surface the shell talks through.
pub trait Console {
    /// Presents `choices` under `message` and returns the zero-based index picked.
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, ShellError>;
    fn show(&mut self, text: &str) -> Result<(), ShellError>;
    /// Blocks until the user acknowledges the screen.
    fn pause(&mut self) -> Result<(), ShellError>;
}

/// Numbered-menu console over any line reader and writer, e.g. stdin/stdout.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
    line: String,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            line: String::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<&str, ShellError> {
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Err(ShellError::InputClosed);
        }
        Ok(self.line.trim())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, ShellError> {
        loop {
            writeln!(self.output, "\n{message}")?;
            for (idx, choice) in choices.iter().enumerate() {
                writeln!(self.output, "  {}) {}", idx + 1, choice)?;
            }
            write!(self.output, "> ")?;
            self.output.flush()?;

            let count = choices.len();
            let answer = self.read_line()?.parse::<usize>().ok();
            match answer {
                Some(n) if (1..=count).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.output, "Please enter a number between 1 and {count}.")?,
            }
        }
    }

    fn show(&mut self, text: &str) -> Result<(), ShellError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), ShellError> {
        write!(self.output, "\nPress Enter to continue...")?;
        self.output.flush()?;
        self.read_line()?;
        Ok(())
    }
}

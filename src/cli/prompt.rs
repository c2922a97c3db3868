//! Numbered-menu prompts for interactive play

use std::io::{BufRead, Write};

use anyhow::{Result, bail};

/// Show `message` and a 1-based numbered list of `options`, then read lines
/// until the user enters a valid number. Returns the 0-based index.
///
/// Fails only when the input is closed or unreadable.
pub fn prompt_choice<R, W, S>(
    input: &mut R,
    output: &mut W,
    message: &str,
    options: &[S],
) -> Result<usize>
where
    R: BufRead,
    W: Write,
    S: AsRef<str>,
{
    loop {
        writeln!(output, "{message}")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(output, "{}. {}", i + 1, option.as_ref())?;
        }
        write!(output, "Enter a number: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for a choice");
        }

        match line.trim().parse::<usize>() {
            Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(choice - 1),
            _ => writeln!(
                output,
                "Invalid option, select one of the following by typing a number and pressing enter."
            )?,
        }
    }
}

use std::io::{BufRead, Write};

use anyhow::{Context, bail};

/// Line-based integer prompts: labels go to `labels`, answers come from `input`.
pub struct Prompter<R, W> {
    input: R,
    labels: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, labels: W) -> Self {
        Self { input, labels }
    }

    /// Asks until a non-blank line arrives, then parses it as an integer.
    pub fn read_int(&mut self, label: &str) -> anyhow::Result<i64> {
        let mut line = String::new();
        loop {
            write!(self.labels, "{label} ")?;
            self.labels.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                bail!("input closed while waiting for {label:?}");
            }
            if !line.trim().is_empty() {
                break;
            }
        }

        line.trim()
            .parse()
            .with_context(|| format!("could not parse integer from {:?}", line.trim()))
    }

    /// Like [`Prompter::read_int`], but the value must not be negative.
    pub fn read_count(&mut self, label: &str) -> anyhow::Result<usize> {
        let value = self.read_int(label)?;
        usize::try_from(value)
            .with_context(|| format!("{label} must not be negative, got {value}"))
    }
}

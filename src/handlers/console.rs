//! Line-oriented terminal I/O shared by the view handlers

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use crate::utils::errors::Result;

/// Prompt/print helper over any async reader and writer
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

/// Console bound to the process stdin/stdout
pub type StdConsole = Console<BufReader<Stdin>, Stdout>;

pub fn stdio() -> StdConsole {
    Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Print text followed by a newline
    pub async fn say(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        if !text.ends_with('\n') {
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Print a prompt and read one line. `None` means end of input.
    pub async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask with a pre-filled value that a blank answer keeps
    pub async fn ask_with_default(&mut self, label: &str, default: &str) -> Result<Option<String>> {
        let prompt = if default.is_empty() {
            format!("{}: ", label)
        } else {
            format!("{} [{}]: ", label, default)
        };

        Ok(self.ask(&prompt).await?.map(|answer| {
            if answer.trim().is_empty() {
                default.to_string()
            } else {
                answer
            }
        }))
    }

    /// List numbered options and read a choice.
    ///
    /// Returns the 0-based index, or `None` for a blank answer or end of input.
    /// Out-of-range or non-numeric answers are asked again.
    pub async fn choose(&mut self, title: &str, options: &[String]) -> Result<Option<usize>> {
        let mut listing = format!("{}\n", title);
        for (index, option) in options.iter().enumerate() {
            listing.push_str(&format!("  {}) {}\n", index + 1, option));
        }
        self.say(&listing).await?;

        loop {
            let Some(answer) = self.ask("> ").await? else {
                return Ok(None);
            };
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(Some(choice - 1)),
                _ => self.say(&format!("Please enter a number between 1 and {}", options.len())).await?,
            }
        }
    }
}

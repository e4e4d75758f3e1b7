//! Text menu: pick "search" or "exit", then a subject by number.

use anyhow::Result;
use polymath_common::PolymathError;
use polymath_wiki::browser::BrowserLauncher;
use polymath_wiki::{LookupOrchestrator, Subject, SubjectId, SubjectRegistry};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainChoice {
    Search,
    Exit,
    Invalid(String),
}

pub fn parse_main_choice(input: &str) -> MainChoice {
    let trimmed = input.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "1" | "search" | "s" => MainChoice::Search,
        "2" | "exit" | "quit" | "q" => MainChoice::Exit,
        _ => MainChoice::Invalid(trimmed.to_string()),
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ChoiceError {
    #[error("`{0}` is not a number")]
    NotANumber(String),

    #[error(transparent)]
    Unknown(#[from] PolymathError),
}

pub fn parse_subject_choice<'r>(
    input: &str,
    registry: &'r SubjectRegistry,
) -> Result<&'r Subject, ChoiceError> {
    let trimmed = input.trim();
    let id: u32 = trimmed
        .parse()
        .map_err(|_| ChoiceError::NotANumber(trimmed.to_string()))?;
    Ok(registry.get(SubjectId(id))?)
}

/// Console conversation around the lookup orchestrator.
pub struct InteractionLoop<L, R, W> {
    robot_name: String,
    registry: SubjectRegistry,
    orchestrator: LookupOrchestrator<L>,
    input: Lines<R>,
    output: W,
}

impl<L, R, W> InteractionLoop<L, R, W>
where
    L: BrowserLauncher,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(
        robot_name: impl Into<String>,
        registry: SubjectRegistry,
        orchestrator: LookupOrchestrator<L>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            robot_name: robot_name.into(),
            registry,
            orchestrator,
            input: input.lines(),
            output,
        }
    }

    /// Run until the user exits or input ends. Lookup failures are reported
    /// and the menu continues; only I/O failures end the loop with an error.
    pub async fn run(mut self) -> Result<W> {
        self.say(&format!(
            "Hi, I am {}.\nI can help you find out the age of famous scientists and present you with a short intro to their lives.\n",
            self.robot_name
        ))
        .await?;

        loop {
            self.say("\nWhat would you like to do?\n  1. Search for a scientist\n  2. Exit\n> ")
                .await?;
            let Some(line) = self.input.next_line().await? else {
                debug!(target: "app.menu", "input closed");
                break;
            };
            match parse_main_choice(&line) {
                MainChoice::Search => self.search().await?,
                MainChoice::Exit => break,
                MainChoice::Invalid(raw) => {
                    self.say(&format!("`{raw}` is not an option, please pick 1 or 2.\n"))
                        .await?
                }
            }
        }

        self.say("Goodbye!\nI hope you had fun learning about famous scientists.\n")
            .await?;
        Ok(self.output)
    }

    async fn search(&mut self) -> Result<()> {
        let mut menu = String::from("\nWhich scientist would you like to learn about?\n");
        for subject in self.registry.iter() {
            menu.push_str(&format!("  {}. {}\n", subject.id, subject.name));
        }
        menu.push_str("> ");

        loop {
            self.say(&menu).await?;
            let Some(line) = self.input.next_line().await? else {
                return Ok(());
            };
            let subject = match parse_subject_choice(&line, &self.registry) {
                Ok(subject) => subject.clone(),
                Err(e) => {
                    self.say(&format!("{e}. Please pick one of the listed numbers.\n"))
                        .await?;
                    continue;
                }
            };

            info!(target: "app.menu", subject = %subject.name, "lookup requested");
            self.say(&format!("Looking up {}, this may take a moment...\n\n", subject.name))
                .await?;
            let report = match self.orchestrator.lookup(&subject).await {
                Ok(summary) => summary.to_string(),
                Err(e) => format!("Sorry, I could not look up {}: {e}\n", subject.name),
            };
            return self.say(&report).await;
        }
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

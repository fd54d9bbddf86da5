//! The interactive loop: read a command, update state, print the result.
//!
//! One request is in flight at a time. Failures are printed as alerts
//! (lines starting with `!`) and leave the list and form as they were.

use std::io;

use eventboard_core::types::DbId;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::api::EventsClient;
use crate::command::{Command, CommandError, HELP};
use crate::config::ClientConfig;
use crate::draft::{reduce, DraftState, FormAction};
use crate::model::EventItem;
use crate::view::{render_events, render_form};

const PROMPT: &str = "> ";
const CONFIRM_DELETE: &str = "Are you sure you want to delete this event? [y/N] ";

pub struct Session<R, W> {
    client: EventsClient,
    config: ClientConfig,
    events: Vec<EventItem>,
    draft: DraftState,
    input: R,
    output: W,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(client: EventsClient, config: ClientConfig, input: R, output: W) -> Self {
        Self {
            client,
            config,
            events: Vec::new(),
            draft: DraftState::default(),
            input,
            output,
        }
    }

    pub fn events(&self) -> &[EventItem] {
        &self.events
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    /// Give back the output sink, e.g. to inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Fetch the list, then process commands until `quit` or end of input.
    pub async fn run(&mut self) -> io::Result<()> {
        self.refresh().await?;

        while let Some(line) = self.prompt(PROMPT).await? {
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(e) => {
                    self.alert(&e.to_string()).await?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }
            self.execute(command).await?;
        }

        self.output.flush().await
    }

    async fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::List => self.refresh().await,
            Command::Show => self.show_form().await,
            Command::Title(title) => self.apply(FormAction::SetTitle(title)).await,
            Command::Description(text) => self.apply(FormAction::SetDescription(text)).await,
            Command::Date(date) => self.apply(FormAction::SetDate(date)).await,
            Command::Image(path) => {
                if !path.is_file() {
                    return self
                        .alert(&format!("No such file: {}", path.display()))
                        .await;
                }
                self.apply(FormAction::ChooseFile(Some(path))).await
            }
            Command::ClearImage => self.apply(FormAction::ClearImage).await,
            Command::Edit(id) => self.edit(id).await,
            Command::Delete(id) => self.delete(id).await,
            Command::Submit => self.submit().await,
            Command::Cancel => {
                self.draft = reduce(std::mem::take(&mut self.draft), FormAction::Reset);
                self.refresh().await
            }
            Command::Help => self.write(&format!("{HELP}\n")).await,
            Command::Quit => Ok(()),
        }
    }

    async fn apply(&mut self, action: FormAction) -> io::Result<()> {
        self.draft = reduce(std::mem::take(&mut self.draft), action);
        self.show_form().await
    }

    async fn show_form(&mut self) -> io::Result<()> {
        let text = render_form(&self.draft, &self.config);
        self.write(&text).await
    }

    async fn refresh(&mut self) -> io::Result<()> {
        match self.client.list().await {
            Ok(events) => {
                self.events = events;
                let text = render_events(&self.events, &self.config);
                self.write(&text).await
            }
            Err(e) => self.alert(&format!("Error fetching events: {e}")).await,
        }
    }

    async fn edit(&mut self, id: DbId) -> io::Result<()> {
        let Some(event) = self.events.iter().find(|e| e.id == id).cloned() else {
            return self.alert(&format!("No event #{id} in the list")).await;
        };
        self.apply(FormAction::Edit(event)).await
    }

    async fn submit(&mut self) -> io::Result<()> {
        let submission = match self.draft.submission() {
            Ok(submission) => submission,
            Err(e) => return self.alert(&e.to_string()).await,
        };

        match self.client.submit(&submission).await {
            Ok(event) => {
                let verb = if submission.id.is_some() { "Updated" } else { "Added" };
                self.write(&format!("{verb} event #{}\n", event.id)).await?;
                self.draft = DraftState::default();
                self.refresh().await
            }
            Err(e) => self.alert(&e.to_string()).await,
        }
    }

    async fn delete(&mut self, id: DbId) -> io::Result<()> {
        let answer = self.prompt(CONFIRM_DELETE).await?.unwrap_or_default();
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            return self.write("Delete cancelled\n").await;
        }

        match self.client.delete(id).await {
            Ok(()) => {
                if self.draft.editing_id == Some(id) {
                    self.draft = DraftState::default();
                }
                self.refresh().await
            }
            Err(e) => self.alert(&format!("Failed to delete event: {e}")).await,
        }
    }

    // -----------------------------------------------------------------------
    // I/O
    // -----------------------------------------------------------------------

    /// Print `prompt` and read one line. `None` at end of input.
    async fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.write(prompt).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn alert(&mut self, message: &str) -> io::Result<()> {
        tracing::debug!(%message, "Alert shown");
        self.write(&format!("! {message}\n")).await
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await
    }
}

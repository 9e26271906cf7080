//! Line-oriented editor shell
//!
//! Reads commands from stdin while remote effects complete in the
//! background; both feed the same runtime one event at a time.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use runpad::languages::{editor_title, LANGUAGES};
use runpad::messages::Msg;
use runpad::model::{ActionControls, AppModel, ControlState};
use runpad::routes::Route;
use runpad::Runtime;

use super::command::{LineCommand, HELP};
use super::host::TerminalHost;

enum Event {
    Line(Option<String>),
    Effect(Msg),
}

pub struct Repl {
    runtime: Runtime,
    host: Arc<TerminalHost>,
    last_controls: Option<ActionControls>,
}

impl Repl {
    pub fn new(runtime: Runtime, host: Arc<TerminalHost>) -> Self {
        Self {
            runtime,
            host,
            last_controls: None,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.print_banner();

        loop {
            let event = tokio::select! {
                line = lines.next_line() => Event::Line(line.context("Failed to read stdin")?),
                Some(msg) = self.runtime.recv() => Event::Effect(msg),
            };

            match event {
                Event::Line(None) => break,
                Event::Line(Some(line)) => {
                    if self.host.answer_prompt(&line) {
                        continue;
                    }
                    if !self.handle_line(&line).await {
                        break;
                    }
                }
                Event::Effect(msg) => {
                    self.runtime.dispatch(msg);
                    self.runtime.process_pending();
                }
            }

            self.render_changes();
        }

        tracing::info!("Shell closed");
        Ok(())
    }

    /// Returns false when the shell should exit
    async fn handle_line(&mut self, line: &str) -> bool {
        match LineCommand::parse(line) {
            LineCommand::Append(text) => {
                if self.runtime.model().is_read_only() {
                    println!("(buffer is read-only while code is being replaced)");
                    return true;
                }
                let mut code = self.runtime.model().session.code.clone();
                code.push_str(&text);
                code.push('\n');
                self.runtime.set_code(code);
            }
            LineCommand::Run => self.runtime.run(),
            LineCommand::Generate => self.runtime.generate(),
            LineCommand::Refactor => self.runtime.refactor(),
            LineCommand::Copy => self.runtime.copy(),
            LineCommand::Clear => self.runtime.clear(),
            LineCommand::Download => self.runtime.download(),
            LineCommand::Language(id) => {
                if runpad::languages::find_language(&id).is_none() {
                    println!("Unknown language '{}'", id);
                    print_languages();
                } else {
                    self.runtime.open_language(&id);
                    self.print_banner();
                }
            }
            LineCommand::Show => print_session(self.runtime.model()),
            LineCommand::Load(path) => match std::fs::read_to_string(&path) {
                Ok(code) => self.runtime.set_code(code),
                Err(e) => println!("Cannot read {}: {}", path.display(), e),
            },
            LineCommand::Open(path) => {
                let route = self.runtime.navigate(&path);
                if route == Route::NotFound {
                    println!("No page at {}", path);
                }
            }
            LineCommand::Login { email, password } => {
                match self.runtime.login(&email, &password).await {
                    Ok(ctx) => println!("Signed in as {}", ctx.username().unwrap_or("?")),
                    Err(e) => println!("{}", e),
                }
            }
            LineCommand::Register {
                username,
                email,
                password,
            } => {
                if let Err(e) = self.runtime.register(&username, &email, &password).await {
                    println!("{}", e);
                }
            }
            LineCommand::Logout => {
                if let Err(e) = self.runtime.logout() {
                    println!("{}", e);
                }
            }
            LineCommand::Width(px) => self.runtime.resize(px),
            LineCommand::Dismiss => self.runtime.dismiss_notification(),
            LineCommand::Help => {
                println!("{}", HELP);
                print_languages();
            }
            LineCommand::Quit => return false,
            LineCommand::Invalid(reason) => println!("{} (:help for commands)", reason),
        }
        true
    }

    fn print_banner(&self) {
        let model = self.runtime.model();
        let presentation = model.presentation();
        println!(
            "{} [{} profile, font {}, folding {}]",
            editor_title(model.language()),
            model.ui.device.name(),
            presentation.font_size,
            if presentation.folding { "on" } else { "off" }
        );
        match self.runtime.auth().current_username() {
            Some(name) => println!("Signed in as {}", name),
            None => println!("Not signed in (generate and refactor need :login)"),
        }
    }

    /// Print whatever changed since the last event
    fn render_changes(&mut self) {
        if self.host.take_scroll_request() {
            println!("── Output ──");
            println!("{}", self.runtime.model().session.display_output());
        }

        let controls = self.runtime.model().controls();
        if self.last_controls != Some(controls) {
            println!(
                "[{}] [{}] [{}] [{}] [{}] [{}]",
                label(controls.run),
                label(controls.clear),
                label(controls.copy),
                label(controls.download),
                label(controls.generate),
                label(controls.refactor)
            );
            self.last_controls = Some(controls);
        }
    }
}

fn label(control: ControlState) -> String {
    if control.disabled {
        format!("{} (disabled)", control.label)
    } else {
        control.label.to_string()
    }
}

fn print_session(model: &AppModel) {
    println!("── {} ──", model.language());
    for (i, line) in model.session.code.lines().enumerate() {
        println!("{:>4} │ {}", i + 1, line);
    }
    println!("── Output ──");
    println!("{}", model.session.display_output());
}

fn print_languages() {
    let names: Vec<&str> = LANGUAGES.iter().map(|l| l.id).collect();
    println!("Languages: {}", names.join(", "));
}

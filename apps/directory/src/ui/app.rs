use std::{
    io::{self, BufRead, Write},
    thread,
};

use client_core::{
    FetchRequest, NavAction, NavbarIndicator, NavigationController, NavigationError,
};
use crossbeam_channel::{Receiver, Sender};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{UiError, UiErrorContext, UiEvent},
        orchestration::dispatch_backend_command,
    },
    ui::{
        input::{parse_input, InputCommand, HELP},
        render::{render_navbar, render_view},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Unchanged,
    Quit,
}

/// Owns the navigation controller; the only place it is mutated.
pub struct DirectoryApp {
    controller: NavigationController,
    cmd_tx: Sender<BackendCommand>,
    navbar: Option<NavbarIndicator>,
    status: String,
}

impl DirectoryApp {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            controller: NavigationController::new(),
            cmd_tx,
            navbar: None,
            status: String::new(),
        }
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Kicks off the navbar check and the initial college fetch.
    pub fn start(&mut self, token: Option<String>) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::CheckSession { token },
            &mut self.status,
        );
        let request = self.controller.open_colleges();
        self.queue_fetch(request);
    }

    pub fn handle_event(&mut self, event: UiEvent) -> Flow {
        match event {
            UiEvent::Input(line) => self.handle_input(parse_input(&line)),
            UiEvent::InputClosed => Flow::Quit,
            UiEvent::Fetched { ticket, outcome } => {
                let failure = outcome
                    .as_ref()
                    .err()
                    .map(|err| UiError::from_fetch(UiErrorContext::Directory, err));
                if !self.controller.apply(ticket, outcome) {
                    return Flow::Unchanged;
                }
                if let Some(failure) = failure {
                    self.status = failure.hint();
                }
                Flow::Redraw
            }
            UiEvent::Navbar(indicator) => {
                self.navbar = Some(indicator);
                Flow::Redraw
            }
            UiEvent::Error(err) => {
                tracing::error!(
                    context = ?err.context(),
                    category = ?err.category(),
                    "{}",
                    err.message()
                );
                self.status = err.hint();
                Flow::Redraw
            }
        }
    }

    fn handle_input(&mut self, command: InputCommand) -> Flow {
        self.status.clear();
        let navigation = match command {
            InputCommand::Quit => return Flow::Quit,
            InputCommand::Redraw => return Flow::Redraw,
            InputCommand::Help => {
                self.status = HELP.to_string();
                return Flow::Redraw;
            }
            InputCommand::Unknown(line) => {
                self.status = format!("unknown command '{line}'; type :h for help");
                return Flow::Redraw;
            }
            InputCommand::Filter(text) => {
                self.controller.set_filter(&text);
                return Flow::Redraw;
            }
            InputCommand::Open(number) => self.controller.activate_card(number - 1),
            InputCommand::Crumb(number) => self.controller.activate_crumb(number - 1),
            InputCommand::Back => match self.controller.view().back {
                Some(back) => self.controller.dispatch(back.action),
                // loading and error screens show no back button
                None => self.controller.back(),
            },
            InputCommand::Colleges => self.controller.dispatch(NavAction::OpenColleges),
        };
        self.navigate(navigation)
    }

    fn navigate(&mut self, navigation: Result<FetchRequest, NavigationError>) -> Flow {
        match navigation {
            Ok(request) => self.queue_fetch(request),
            Err(err) => self.status = UiError::from_navigation(&err).hint(),
        }
        Flow::Redraw
    }

    fn queue_fetch(&mut self, request: FetchRequest) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Fetch(request),
            &mut self.status,
        );
    }

    pub fn render(&self) -> String {
        let mut screen = render_navbar(self.navbar.as_ref());
        screen.push_str("\n\n");
        screen.push_str(&render_view(&self.controller.view(), self.controller.filter()));
        if !self.status().is_empty() {
            screen.push('\n');
            screen.push_str(self.status());
            screen.push('\n');
        }
        screen
    }

    /// Drives the UI until quit or end of input. Every event is handled on
    /// this thread, one at a time.
    pub fn run(mut self, ui_rx: Receiver<UiEvent>, out: &mut impl Write) -> io::Result<()> {
        self.draw(out)?;
        while let Ok(event) = ui_rx.recv() {
            match self.handle_event(event) {
                Flow::Quit => break,
                Flow::Redraw => self.draw(out)?,
                Flow::Unchanged => {}
            }
        }
        Ok(())
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "\n{}\n> ", self.render())?;
        out.flush()
    }
}

/// Forwards stdin lines to the UI loop.
pub fn spawn_input_reader(ui_tx: Sender<UiEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if ui_tx.send(UiEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = ui_tx.send(UiEvent::InputClosed);
    })
}

#[cfg(test)]
mod tests {
    use client_core::{DirectoryPayload, FetchError, FetchTarget};
    use crossbeam_channel::{bounded, unbounded};
    use shared::domain::{AlumniRecord, Level};

    use super::*;

    fn next_fetch(cmd_rx: &Receiver<BackendCommand>) -> FetchRequest {
        loop {
            match cmd_rx.try_recv().expect("queued command") {
                BackendCommand::Fetch(request) => return request,
                BackendCommand::CheckSession { .. } => continue,
            }
        }
    }

    fn started_app() -> (DirectoryApp, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = unbounded();
        let mut app = DirectoryApp::new(cmd_tx);
        app.start(Some("token".into()));

        let request = next_fetch(&cmd_rx);
        assert_eq!(request.target, FetchTarget::Colleges);
        app.handle_event(UiEvent::Fetched {
            ticket: request.ticket,
            outcome: Ok(DirectoryPayload::Colleges(vec![
                "Deccan College of Engineering and Technology".into(),
                "Lords Institute".into(),
            ])),
        });
        (app, cmd_rx)
    }

    fn alumni_app() -> (DirectoryApp, Receiver<BackendCommand>) {
        let (mut app, cmd_rx) = started_app();
        app.handle_event(UiEvent::Input(":2".into()));
        let request = next_fetch(&cmd_rx);
        app.handle_event(UiEvent::Fetched {
            ticket: request.ticket,
            outcome: Ok(DirectoryPayload::Branches(vec!["CSE".into()])),
        });

        app.handle_event(UiEvent::Input(":1".into()));
        let request = next_fetch(&cmd_rx);
        assert_eq!(
            request.target,
            FetchTarget::Alumni {
                college: "Lords Institute".into(),
                branch: "CSE".into()
            }
        );
        app.handle_event(UiEvent::Fetched {
            ticket: request.ticket,
            outcome: Ok(DirectoryPayload::Alumni(vec![
                AlumniRecord::new("Ayesha").with_year("2019"),
                AlumniRecord::new("Bilal").with_bio("class of 2019, robotics"),
            ])),
        });
        (app, cmd_rx)
    }

    #[test]
    fn start_checks_session_before_loading_colleges() {
        let (cmd_tx, cmd_rx) = unbounded();
        let mut app = DirectoryApp::new(cmd_tx);
        app.start(None);

        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::CheckSession { token: None })
        ));
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Fetch(_))));
        assert!(app.render().contains("Loading colleges..."));
    }

    #[test]
    fn filtered_card_number_opens_the_visible_college() {
        let (mut app, cmd_rx) = started_app();

        assert_eq!(app.handle_event(UiEvent::Input("lords".into())), Flow::Redraw);
        assert!(!app.render().contains("Deccan"));

        app.handle_event(UiEvent::Input(":1".into()));
        assert_eq!(
            next_fetch(&cmd_rx).target,
            FetchTarget::Branches {
                college: "Lords Institute".into()
            }
        );
        assert_eq!(app.controller().level(), Level::Branches);
        assert!(app.render().contains("Loading branches..."));
    }

    #[test]
    fn stale_response_does_not_redraw() {
        let (mut app, cmd_rx) = started_app();

        app.handle_event(UiEvent::Input(":2".into()));
        let slow = next_fetch(&cmd_rx);
        app.handle_event(UiEvent::Input(":c".into()));
        next_fetch(&cmd_rx);

        let flow = app.handle_event(UiEvent::Fetched {
            ticket: slow.ticket,
            outcome: Ok(DirectoryPayload::Branches(vec!["CSE".into()])),
        });
        assert_eq!(flow, Flow::Unchanged);
        assert_eq!(app.controller().level(), Level::Colleges);
    }

    #[test]
    fn failed_fetch_shows_banner_and_retry_hint() {
        let (mut app, cmd_rx) = started_app();
        app.handle_event(UiEvent::Input(":2".into()));
        let request = next_fetch(&cmd_rx);

        app.handle_event(UiEvent::Fetched {
            ticket: request.ticket,
            outcome: Err(FetchError::Status {
                status: 500,
                code: None,
                detail: None,
            }),
        });
        let screen = app.render();
        assert!(screen.contains("!! Unable to load branches: HTTP error! Status: 500"));
        assert!(app.status().contains("retry"));
    }

    #[test]
    fn invalid_navigation_is_reported_in_status() {
        let (mut app, cmd_rx) = started_app();

        app.handle_event(UiEvent::Input(":b".into()));
        assert_eq!(app.status(), "already at the college list");

        app.handle_event(UiEvent::Input(":7".into()));
        assert_eq!(app.status(), "no card numbered 7 (2 on screen)");
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn numeric_text_searches_instead_of_opening_a_card() {
        let (mut app, cmd_rx) = alumni_app();

        app.handle_event(UiEvent::Input("2019".into()));
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.status(), "");
        assert_eq!(app.controller().filter(), "2019");
        assert_eq!(app.controller().view().card_titles(), vec!["Bilal"]);
    }

    #[test]
    fn breadcrumb_and_back_follow_the_view_actions() {
        let (mut app, cmd_rx) = alumni_app();

        app.handle_event(UiEvent::Input(":c3".into()));
        assert_eq!(app.status(), "that breadcrumb is the current page");
        app.handle_event(UiEvent::Input(":c9".into()));
        assert_eq!(app.status(), "no breadcrumb numbered 9 (3 on screen)");
        assert!(cmd_rx.try_recv().is_err());

        app.handle_event(UiEvent::Input(":c2".into()));
        let request = next_fetch(&cmd_rx);
        assert_eq!(
            request.target,
            FetchTarget::Branches {
                college: "Lords Institute".into()
            }
        );
        app.handle_event(UiEvent::Fetched {
            ticket: request.ticket,
            outcome: Ok(DirectoryPayload::Branches(vec!["CSE".into()])),
        });

        app.handle_event(UiEvent::Input(":b".into()));
        assert_eq!(next_fetch(&cmd_rx).target, FetchTarget::Colleges);
        assert_eq!(app.controller().level(), Level::Colleges);
    }

    #[test]
    fn back_still_works_from_an_error_screen() {
        let (mut app, cmd_rx) = started_app();
        app.handle_event(UiEvent::Input(":1".into()));
        let request = next_fetch(&cmd_rx);
        app.handle_event(UiEvent::Fetched {
            ticket: request.ticket,
            outcome: Err(FetchError::Transport("connection refused".into())),
        });
        assert!(app.controller().view().back.is_none());

        app.handle_event(UiEvent::Input(":b".into()));
        assert_eq!(next_fetch(&cmd_rx).target, FetchTarget::Colleges);
    }

    #[test]
    fn unknown_command_is_reported() {
        let (mut app, cmd_rx) = started_app();
        app.handle_event(UiEvent::Input(":zz".into()));
        assert_eq!(app.status(), "unknown command ':zz'; type :h for help");
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn navbar_event_updates_header() {
        let (mut app, _cmd_rx) = started_app();
        assert!(app.render().starts_with("[ checking session... ]"));
        app.handle_event(UiEvent::Navbar(NavbarIndicator::SignedOut));
        assert!(app.render().starts_with("[ Log in ]"));
    }

    #[test]
    fn run_stops_on_quit_and_draws_prompt() {
        let (cmd_tx, _cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let app = DirectoryApp::new(cmd_tx);

        ui_tx.send(UiEvent::Input(":q".into())).expect("send");
        let mut out = Vec::new();
        app.run(ui_rx, &mut out).expect("run");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.ends_with("> "));
    }
}

//! Main application state and logic

use arena_core::{ClockEvent, DebateSession, Phase, SessionError};
use tokio::sync::mpsc;

use crate::ui::theme::ArenaTheme;
use crate::ui::Overlay;
use crate::worker::{RequestKind, WorkerRequest, WorkerResponse};

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Insert mode - free text input
    Insert,
    /// Command mode - entering : commands
    Command,
}

/// Main application state
pub struct App {
    // Channel communication with the API worker
    pub request_tx: mpsc::Sender<WorkerRequest>,
    pub response_rx: mpsc::Receiver<WorkerResponse>,

    // Debate state
    pub session: DebateSession,

    // UI state
    pub theme: ArenaTheme,
    overlay: Option<Overlay>,

    // Transcript view
    pub transcript_scroll: usize,
    pub scroll_locked_to_bottom: bool,
    pub report_scroll: usize,

    // Input state
    pub input_mode: InputMode,
    input_buffer: String,
    cursor_position: usize,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,

    // End-of-session coordination
    close_requested: bool,
}

impl App {
    /// Create a new application wired to the worker's channel endpoints.
    pub fn new(
        request_tx: mpsc::Sender<WorkerRequest>,
        response_rx: mpsc::Receiver<WorkerResponse>,
    ) -> Self {
        Self {
            request_tx,
            response_rx,
            session: DebateSession::new(),
            theme: ArenaTheme::default(),
            overlay: None,
            transcript_scroll: 0,
            scroll_locked_to_bottom: true,
            report_scroll: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            status_message: None,
            should_quit: false,
            close_requested: false,
        }
    }

    /// Route submitted text to the right request for the current phase.
    ///
    /// Before the opening exchange completes this (re)starts the session,
    /// so a failed start can simply be resubmitted.
    pub fn dispatch_input(&mut self, input: String) {
        if input.trim().is_empty() {
            return;
        }
        match self.session.phase() {
            Phase::Idle => self.start_debate(&input),
            _ => self.send_argument(&input),
        }
    }

    /// Open the session with the player's opening statement.
    fn start_debate(&mut self, statement: &str) {
        match self.session.open(statement) {
            Ok(()) => {
                self.set_status("Summoning your opponent...");
                let request = WorkerRequest::Start(statement.trim().to_string());
                if self.request_tx.try_send(request).is_err() {
                    self.session.revert_pending();
                    self.set_status("Worker unavailable, try again");
                }
            }
            Err(SessionError::Busy) => {
                self.set_status("Still connecting...");
                self.set_input(statement);
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Submit one argument in the active session.
    fn send_argument(&mut self, input: &str) {
        match self.session.submit(input) {
            Ok(session_id) => {
                self.set_status("Waiting for the rebuttal...");
                self.scroll_to_bottom();
                let request = WorkerRequest::Argue {
                    session_id,
                    text: input.trim().to_string(),
                };
                if self.request_tx.try_send(request).is_err() {
                    if let Some(text) = self.session.revert_pending() {
                        self.set_input(text);
                    }
                    self.set_status("Worker busy, try again");
                }
            }
            // Empty input is a no-op, not an error worth announcing.
            Err(SessionError::EmptyArgument) => {}
            Err(SessionError::Busy) => {
                self.set_status("One argument at a time!");
                self.set_input(input);
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Ask the worker to close the session and fetch the report.
    ///
    /// Safe to call repeatedly; only one end request goes out. If an
    /// argument is still on the wire the close is retried once its
    /// response lands.
    pub fn request_close(&mut self) {
        if self.close_requested {
            return;
        }
        match self.session.request_close() {
            Ok(session_id) => {
                self.set_status("Generating your personality report...");
                if self
                    .request_tx
                    .try_send(WorkerRequest::End { session_id })
                    .is_ok()
                {
                    self.close_requested = true;
                } else {
                    self.set_status("Worker busy - press 'e' to retry");
                }
            }
            Err(SessionError::Busy) => {
                // An exchange is in flight; handle_response retries after
                // it lands.
            }
            Err(_) => {}
        }
    }

    /// Apply a worker response to the session.
    pub fn handle_response(&mut self, response: WorkerResponse) {
        match response {
            WorkerResponse::Started(exchange) => {
                self.session.activate(&exchange);
                self.clear_status();
                self.scroll_to_bottom();
                if self.session.phase() == Phase::Overtime {
                    self.request_close();
                }
            }
            WorkerResponse::Exchange(exchange) => {
                self.session.apply_exchange(&exchange);
                self.clear_status();
                self.scroll_to_bottom();
                if self.session.phase() == Phase::Overtime {
                    self.request_close();
                }
            }
            WorkerResponse::Ended(summary) => {
                self.session.finish(&summary);
                self.clear_status();
            }
            WorkerResponse::Failed { request, error } => self.handle_failure(request, error),
        }
    }

    /// Degrade on a failed round trip: revert the optimistic entry,
    /// restore the input, and leave everything else as it was.
    fn handle_failure(&mut self, request: RequestKind, error: String) {
        match request {
            RequestKind::Start => {
                if let Some(statement) = self.session.revert_pending() {
                    self.set_input(statement);
                    self.input_mode = InputMode::Insert;
                }
                self.set_status(format!("Couldn't reach the arena ({error}) - press Enter to retry"));
            }
            RequestKind::Argue => {
                if let Some(text) = self.session.revert_pending() {
                    self.set_input(text);
                    self.input_mode = InputMode::Insert;
                }
                self.session
                    .push_notice("Connection hiccup - your argument is back in the box.");
                self.set_status(error);
            }
            RequestKind::End => {
                self.close_requested = false;
                self.set_status(format!("Report fetch failed ({error}) - press 'e' to retry"));
            }
        }
    }

    /// Advance the session clock by one second.
    pub fn second_tick(&mut self) {
        if self.session.tick() == ClockEvent::Expired {
            self.session
                .push_notice("Time's up! Locking in the final scores...");
            self.scroll_to_bottom();
            self.request_close();
        }
    }

    // =========================================================================
    // Input buffer
    // =========================================================================

    /// Take the current input, clearing the buffer. Empty input yields
    /// `None` so submitting nothing is a no-op.
    pub fn take_input(&mut self) -> Option<String> {
        if self.input_buffer.trim().is_empty() {
            self.input_buffer.clear();
            self.cursor_position = 0;
            return None;
        }
        self.cursor_position = 0;
        Some(std::mem::take(&mut self.input_buffer))
    }

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        if self.cursor_position < self.input_buffer.chars().count() {
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Set input buffer content and move cursor to end (unicode-safe)
    pub fn set_input(&mut self, content: impl Into<String>) {
        self.input_buffer = content.into();
        self.cursor_position = self.input_buffer.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    // =========================================================================
    // Modes and commands
    // =========================================================================

    /// Enter command mode (starts with :)
    pub fn enter_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.input_buffer.clear();
        self.input_buffer.push(':');
        self.cursor_position = 1;
    }

    /// Exit to normal mode
    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        if self.input_buffer.starts_with(':') {
            self.clear_input();
        }
    }

    /// Process a colon command.
    pub fn process_command(&mut self, command: &str) {
        let cmd = command.trim_start_matches(':');
        match cmd.trim() {
            "q" | "quit" | "exit" => self.should_quit = true,
            "end" => self.request_close(),
            "help" | "h" => self.toggle_help(),
            "" => {}
            other => self.set_status(format!("Unknown command: {other}")),
        }
    }

    // =========================================================================
    // Transcript scrolling
    // =========================================================================

    /// Scroll transcript to bottom and lock to bottom
    pub fn scroll_to_bottom(&mut self) {
        // The widget caps this to the actual maximum.
        self.transcript_scroll = usize::MAX / 2;
        self.scroll_locked_to_bottom = true;
    }

    /// Conservative line estimate for capping manual scrolling,
    /// assuming ~60 chars of effective width.
    fn estimate_max_scroll(&self) -> usize {
        const ESTIMATED_WIDTH: usize = 60;
        const ESTIMATED_VISIBLE_HEIGHT: usize = 20;

        let estimated_lines: usize = self
            .session
            .transcript()
            .iter()
            .map(|message| {
                let text_lines: usize = message
                    .display_text()
                    .lines()
                    .map(|line| (line.len() / ESTIMATED_WIDTH).max(1))
                    .sum();
                // One line per citation plus the blank separator.
                text_lines + message.sources.len() + 1
            })
            .sum();

        estimated_lines.saturating_sub(ESTIMATED_VISIBLE_HEIGHT)
    }

    /// Scroll transcript up (unlocks from bottom)
    pub fn scroll_up(&mut self, lines: usize) {
        let max_scroll = self.estimate_max_scroll();
        if self.transcript_scroll > max_scroll {
            self.transcript_scroll = max_scroll;
        }
        self.transcript_scroll = self.transcript_scroll.saturating_sub(lines);
        self.scroll_locked_to_bottom = false;
    }

    /// Scroll transcript down
    pub fn scroll_down(&mut self, lines: usize) {
        self.transcript_scroll = self.transcript_scroll.saturating_add(lines);
        let max_scroll = self.estimate_max_scroll();
        self.transcript_scroll = self.transcript_scroll.min(max_scroll + 100);
    }

    // =========================================================================
    // Overlay and status
    // =========================================================================

    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argubot::ArgumentResponse;

    fn test_app() -> (
        App,
        mpsc::Receiver<WorkerRequest>,
        mpsc::Sender<WorkerResponse>,
    ) {
        let (request_tx, request_rx) = mpsc::channel(8);
        let (response_tx, response_rx) = mpsc::channel(8);
        (App::new(request_tx, response_rx), request_rx, response_tx)
    }

    fn exchange(time_remaining: u32) -> ArgumentResponse {
        ArgumentResponse {
            bot_response: "Wrong.".to_string(),
            session_id: "s-1".to_string(),
            user_score: 0,
            bot_score: 0,
            time_remaining,
            game_ended: false,
            sources: Vec::new(),
            status_update: None,
        }
    }

    fn active_app() -> (
        App,
        mpsc::Receiver<WorkerRequest>,
        mpsc::Sender<WorkerResponse>,
    ) {
        let (mut app, mut request_rx, response_tx) = test_app();
        app.dispatch_input("opening statement".to_string());
        let _ = request_rx.try_recv();
        app.handle_response(WorkerResponse::Started(exchange(300)));
        (app, request_rx, response_tx)
    }

    #[test]
    fn test_empty_input_is_a_noop() {
        let (mut app, mut request_rx, _response_tx) = test_app();

        app.set_input("   ");
        assert!(app.take_input().is_none());

        app.dispatch_input("   ".to_string());
        assert!(request_rx.try_recv().is_err());
        assert!(app.session.transcript().is_empty());
    }

    #[test]
    fn test_opening_statement_starts_session() {
        let (mut app, mut request_rx, _response_tx) = test_app();

        app.dispatch_input("cats rule".to_string());
        assert!(matches!(
            request_rx.try_recv(),
            Ok(WorkerRequest::Start(s)) if s == "cats rule"
        ));
        assert!(app.session.is_pending());
    }

    #[test]
    fn test_argument_goes_to_worker_with_session_id() {
        let (mut app, mut request_rx, _response_tx) = active_app();

        app.dispatch_input("and another thing".to_string());
        match request_rx.try_recv() {
            Ok(WorkerRequest::Argue { session_id, text }) => {
                assert_eq!(session_id, "s-1");
                assert_eq!(text, "and another thing");
            }
            other => panic!("expected Argue request, got {other:?}"),
        }
    }

    #[test]
    fn test_timer_reaching_zero_ends_the_session() {
        let (mut app, mut request_rx, _response_tx) = test_app();
        app.dispatch_input("opening".to_string());
        let _ = request_rx.try_recv();
        app.handle_response(WorkerResponse::Started(exchange(2)));

        app.second_tick();
        assert_eq!(app.session.phase(), Phase::Active);
        app.second_tick();
        assert_eq!(app.session.phase(), Phase::Overtime);

        assert!(matches!(
            request_rx.try_recv(),
            Ok(WorkerRequest::End { session_id }) if session_id == "s-1"
        ));

        // Repeated ticks don't issue another end request.
        app.second_tick();
        assert!(request_rx.try_recv().is_err());
    }

    #[test]
    fn test_submit_while_pending_keeps_input() {
        let (mut app, mut request_rx, _response_tx) = active_app();
        app.dispatch_input("first".to_string());
        let _ = request_rx.try_recv();

        app.set_input("second");
        let input = app.take_input().unwrap();
        app.dispatch_input(input);

        assert_eq!(app.input_buffer(), "second");
        assert!(request_rx.try_recv().is_err());
    }

    #[test]
    fn test_failed_argument_restores_input() {
        let (mut app, mut request_rx, _response_tx) = active_app();

        app.dispatch_input("my hot take".to_string());
        let _ = request_rx.try_recv();
        let transcript_len = app.session.transcript().len();

        app.handle_response(WorkerResponse::Failed {
            request: RequestKind::Argue,
            error: "Network error: timed out".to_string(),
        });

        assert_eq!(app.input_buffer(), "my hot take");
        // Optimistic entry reverted, system notice appended.
        assert_eq!(app.session.transcript().len(), transcript_len);
        assert!(app.status_message().is_some());
    }

    #[test]
    fn test_failed_start_allows_retry() {
        let (mut app, mut request_rx, _response_tx) = test_app();

        app.dispatch_input("opening".to_string());
        let _ = request_rx.try_recv();
        app.handle_response(WorkerResponse::Failed {
            request: RequestKind::Start,
            error: "Network error: refused".to_string(),
        });

        assert_eq!(app.session.phase(), Phase::Idle);
        assert_eq!(app.input_buffer(), "opening");

        // Pressing Enter again re-dispatches as a start.
        let input = app.take_input().unwrap();
        app.dispatch_input(input);
        assert!(matches!(request_rx.try_recv(), Ok(WorkerRequest::Start(_))));
    }

    #[test]
    fn test_failed_end_can_be_retried() {
        let (mut app, mut request_rx, _response_tx) = active_app();

        app.session.request_close().unwrap();
        app.request_close();
        assert!(matches!(request_rx.try_recv(), Ok(WorkerRequest::End { .. })));

        app.handle_response(WorkerResponse::Failed {
            request: RequestKind::End,
            error: "Network error: timed out".to_string(),
        });

        app.request_close();
        assert!(matches!(request_rx.try_recv(), Ok(WorkerRequest::End { .. })));
    }

    #[test]
    fn test_game_ended_exchange_triggers_close() {
        let (mut app, mut request_rx, _response_tx) = active_app();

        app.dispatch_input("last word".to_string());
        let _ = request_rx.try_recv();

        let mut response = exchange(0);
        response.game_ended = true;
        app.handle_response(WorkerResponse::Exchange(response));

        assert_eq!(app.session.phase(), Phase::Overtime);
        assert!(matches!(request_rx.try_recv(), Ok(WorkerRequest::End { .. })));
    }

    #[test]
    fn test_unicode_input_editing() {
        let (mut app, _request_rx, _response_tx) = test_app();

        for c in "naïve".chars() {
            app.type_char(c);
        }
        assert_eq!(app.input_buffer(), "naïve");
        app.backspace();
        app.backspace();
        assert_eq!(app.input_buffer(), "naï");
        app.cursor_home();
        app.delete();
        assert_eq!(app.input_buffer(), "aï");
    }

    #[test]
    fn test_quit_command() {
        let (mut app, _request_rx, _response_tx) = test_app();
        app.process_command(":q");
        assert!(app.should_quit);
    }
}

//! Application state and core logic

use crate::config::TuiConfig;
use crate::payment::{LogSubmitter, PaymentSubmitter};
use crate::state::{current_year, AppState, CheckoutPhase, ErrorState, Form};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// User configuration
    pub config: TuiConfig,
    /// Payment service that receives validated records
    submitter: Box<dyn PaymentSubmitter>,
    /// Source of the current year for expiry checks
    current_year: fn() -> i32,
    /// Whether the app should quit
    quit: bool,
    /// Status bar feedback message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance backed by the logging submitter
    pub fn new(config: TuiConfig) -> Self {
        Self::with_submitter(config, Box::new(LogSubmitter::new()), current_year)
    }

    /// Create an App with a specific payment service and year source
    pub fn with_submitter(
        config: TuiConfig,
        submitter: Box<dyn PaymentSubmitter>,
        current_year: fn() -> i32,
    ) -> Self {
        Self {
            state: AppState::default(),
            config,
            submitter,
            current_year,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        let on_submit_row = self.state.form.is_submit_row_active();
        let has_command_modifier = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit().await;
            }
            KeyCode::Char('v') if key.modifiers.contains(crate::platform::SHORTCUT_MODIFIER) => {
                self.paste_from_clipboard();
            }
            KeyCode::Enter if on_submit_row => self.submit().await,
            // Enter in an input moves on to the next one
            KeyCode::Enter => self.state.form.next_field(),
            KeyCode::Esc => self.quit = true,
            KeyCode::Char(c) if !has_command_modifier => {
                if self.state.form.input_char(c) {
                    self.state.mark_edited();
                }
            }
            KeyCode::Backspace => {
                if self.state.form.backspace() {
                    self.state.mark_edited();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle pasted text as one edit of the focused input
    pub fn handle_paste(&mut self, text: &str) {
        if self.state.has_errors() {
            return;
        }
        let text = text.trim_end_matches(['\r', '\n']);
        if self.state.form.input_str(text) {
            self.state.mark_edited();
        }
    }

    fn paste_from_clipboard(&mut self) {
        self.apply_clipboard(read_clipboard());
    }

    /// Paste clipboard contents, or report a failed read in the status bar
    fn apply_clipboard(&mut self, contents: Result<String>) {
        match contents {
            Ok(text) => self.handle_paste(&text),
            Err(err) => {
                tracing::warn!("Clipboard read failed: {err}");
                self.status_message = Some(format!("Clipboard unavailable: {err}"));
            }
        }
    }

    /// Validate the form and hand the record off when every rule passes
    pub async fn submit(&mut self) {
        let year = (self.current_year)();
        let record = match self.state.form.try_record(year) {
            Ok(record) => record,
            Err(errors) => {
                let failing: Vec<&str> = errors.iter().map(|(key, _)| key.id()).collect();
                tracing::info!(?failing, "Checkout form failed validation");
                self.state.field_errors = errors;
                self.state.phase = CheckoutPhase::Editing;
                return;
            }
        };

        self.state.field_errors = ErrorState::default();
        match self.submitter.submit(&record).await {
            Ok(receipt) => {
                self.status_message = Some(format!(
                    "Payment submitted (ref {})",
                    receipt.short_reference()
                ));
                self.state.phase = CheckoutPhase::Submitted(receipt);
            }
            Err(err) => {
                tracing::error!("Payment submission failed: {err}");
                self.push_error(format!("Payment submission failed: {err}"));
            }
        }
    }
}

fn read_clipboard() -> Result<String> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    Ok(clipboard.get_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::{MockPaymentSubmitter, SubmissionReceipt, SubmitError};
    use crate::state::FieldKey;

    fn year_2025() -> i32 {
        2025
    }

    fn app_with(mock: MockPaymentSubmitter) -> App {
        App::with_submitter(TuiConfig::default(), Box::new(mock), year_2025)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Fill all four inputs by typing and tabbing through the form
    async fn fill(app: &mut App, name: &str, card: &str, expiry: &str, cvv: &str) {
        for value in [name, card, expiry, cvv] {
            type_text(app, value).await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
        }
    }

    mod input {
        use super::*;

        #[tokio::test]
        async fn test_typing_fills_active_field() {
            let mut app = app_with(MockPaymentSubmitter::new());
            type_text(&mut app, "Jane Doe").await;
            assert_eq!(app.state.form.name.value(), "Jane Doe");
        }

        #[tokio::test]
        async fn test_digits_dropped_from_name() {
            let mut app = app_with(MockPaymentSubmitter::new());
            type_text(&mut app, "Ja1ne").await;
            assert_eq!(app.state.form.name.value(), "Jane");
            assert!(app.state.field_errors.is_empty());
            assert!(!app.state.has_errors());
        }

        #[tokio::test]
        async fn test_letters_dropped_from_card_number() {
            let mut app = app_with(MockPaymentSubmitter::new());
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "42a42-").await;
            assert_eq!(app.state.form.card_number.value(), "4242");
        }

        #[tokio::test]
        async fn test_expiry_keeps_digits_and_slash() {
            let mut app = app_with(MockPaymentSubmitter::new());
            app.state.form.set_active_field(2);
            type_text(&mut app, "1x2/.25").await;
            assert_eq!(app.state.form.expiry_date.value(), "12/25");
        }

        #[tokio::test]
        async fn test_backspace() {
            let mut app = app_with(MockPaymentSubmitter::new());
            type_text(&mut app, "Jan").await;
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            assert_eq!(app.state.form.name.value(), "Ja");
        }

        #[tokio::test]
        async fn test_control_chars_not_inserted() {
            let mut app = app_with(MockPaymentSubmitter::new());
            app.handle_key(ctrl('a')).await.unwrap();
            assert!(app.state.form.name.value().is_empty());
        }

        #[tokio::test]
        async fn test_enter_in_field_moves_focus() {
            let mut app = app_with(MockPaymentSubmitter::new());
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.form.active_key(), Some(FieldKey::CardNumber));
        }

        #[tokio::test]
        async fn test_up_down_navigation() {
            let mut app = app_with(MockPaymentSubmitter::new());
            app.handle_key(key(KeyCode::Up)).await.unwrap();
            assert!(app.state.form.is_submit_row_active());
            app.handle_key(key(KeyCode::Down)).await.unwrap();
            assert_eq!(app.state.form.active_key(), Some(FieldKey::Name));
        }

        #[test]
        fn test_paste_filtered_as_whole() {
            let mut app = app_with(MockPaymentSubmitter::new());
            app.state.form.set_active_field(1);
            app.handle_paste("4242 4242 4242 4242");
            assert!(app.state.form.card_number.value().is_empty());
            app.handle_paste("4242424242424242\n");
            assert_eq!(app.state.form.card_number.value(), "4242424242424242");
        }

        #[test]
        fn test_long_paste_truncated_to_field_length() {
            let mut app = app_with(MockPaymentSubmitter::new());
            app.state.form.set_active_field(1);
            app.handle_paste("12345678901234567890");
            assert_eq!(app.state.form.card_number.value(), "1234567890123456");
        }

        #[test]
        fn test_clipboard_failure_reported_in_status_bar() {
            let mut app = app_with(MockPaymentSubmitter::new());
            app.apply_clipboard(Err(anyhow::anyhow!("no display")));
            assert!(!app.state.has_errors());
            assert_eq!(
                app.status_message.as_deref(),
                Some("Clipboard unavailable: no display")
            );
        }

        #[test]
        fn test_clipboard_contents_pasted() {
            let mut app = app_with(MockPaymentSubmitter::new());
            app.apply_clipboard(Ok("Jane Doe\n".to_string()));
            assert_eq!(app.state.form.name.value(), "Jane Doe");
            assert!(app.status_message.is_none());
        }

        #[tokio::test]
        async fn test_escape_quits() {
            let mut app = app_with(MockPaymentSubmitter::new());
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(app.should_quit());
        }
    }

    mod submit {
        use super::*;

        async fn submitted_app() -> App {
            let mut mock = MockPaymentSubmitter::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Ok(SubmissionReceipt::new()));
            let mut app = app_with(mock);
            fill(&mut app, "Jane Doe", "1234567890123456", "12/99", "123").await;
            app.submit().await;
            assert!(matches!(app.state.phase, CheckoutPhase::Submitted(_)));
            app
        }

        #[tokio::test]
        async fn test_edit_after_submit_returns_to_editing() {
            let mut app = submitted_app().await;
            app.state.form.set_active_field(0);
            type_text(&mut app, "s").await;
            assert_eq!(app.state.form.name.value(), "Jane Does");
            assert_eq!(app.state.phase, CheckoutPhase::Editing);
        }

        #[tokio::test]
        async fn test_backspace_and_paste_after_submit_return_to_editing() {
            let mut app = submitted_app().await;
            app.state.form.set_active_field(3);
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            assert_eq!(app.state.phase, CheckoutPhase::Editing);

            let mut app = submitted_app().await;
            app.state.form.set_active_field(0);
            app.handle_paste(" Jr");
            assert_eq!(app.state.phase, CheckoutPhase::Editing);
        }

        #[tokio::test]
        async fn test_rejected_edit_keeps_submitted_phase() {
            let mut app = submitted_app().await;
            app.state.form.set_active_field(1);
            type_text(&mut app, "x").await;
            app.handle_paste("9");
            assert_eq!(app.state.form.card_number.value(), "1234567890123456");
            assert!(matches!(app.state.phase, CheckoutPhase::Submitted(_)));
        }

        #[tokio::test]
        async fn test_empty_form_not_submitted() {
            let mut mock = MockPaymentSubmitter::new();
            mock.expect_submit().never();
            let mut app = app_with(mock);

            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.field_errors.len(), 4);
            assert_eq!(
                app.state.field_errors.get(FieldKey::Name),
                Some("Name on card is required")
            );
            assert_eq!(app.state.phase, CheckoutPhase::Editing);
        }

        #[tokio::test]
        async fn test_valid_form_handed_off_once() {
            let mut mock = MockPaymentSubmitter::new();
            mock.expect_submit()
                .withf(|record| {
                    record.name == "Jane Doe"
                        && record.card_number == "1234567890123456"
                        && record.expiry_date == "12/99"
                        && record.cvv == "123"
                })
                .times(1)
                .returning(|_| Ok(SubmissionReceipt::new()));
            let mut app = app_with(mock);

            fill(&mut app, "Jane Doe", "1234567890123456", "12/99", "123").await;
            assert!(app.state.form.is_submit_row_active());
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert!(app.state.field_errors.is_empty());
            assert!(matches!(app.state.phase, CheckoutPhase::Submitted(_)));
            assert!(app
                .status_message
                .as_deref()
                .is_some_and(|m| m.starts_with("Payment submitted")));
        }

        #[tokio::test]
        async fn test_errors_replaced_on_each_attempt() {
            let mut mock = MockPaymentSubmitter::new();
            mock.expect_submit().never();
            let mut app = app_with(mock);

            app.submit().await;
            assert_eq!(app.state.field_errors.len(), 4);

            fill(&mut app, "Jane Doe", "12345", "12/99", "123").await;
            app.submit().await;
            assert_eq!(app.state.field_errors.len(), 1);
            assert_eq!(
                app.state.field_errors.get(FieldKey::CardNumber),
                Some("Card number must be exactly 16 digits")
            );
        }

        #[tokio::test]
        async fn test_expired_year_blocks_submission() {
            let mut mock = MockPaymentSubmitter::new();
            mock.expect_submit().never();
            let mut app = app_with(mock);

            fill(&mut app, "Jane Doe", "1234567890123456", "01/20", "123").await;
            app.submit().await;

            assert_eq!(
                app.state.field_errors.get(FieldKey::ExpiryDate),
                Some("Invalid expiry date. Use MM/YY and must be a future date.")
            );
        }

        #[tokio::test]
        async fn test_repeated_validation_is_stable() {
            let mut mock = MockPaymentSubmitter::new();
            mock.expect_submit().never();
            let mut app = app_with(mock);

            fill(&mut app, "", "42", "13/25", "1").await;
            app.submit().await;
            let first = app.state.field_errors.clone();
            app.submit().await;
            assert_eq!(first, app.state.field_errors);
        }

        #[tokio::test]
        async fn test_service_failure_shows_dialog_and_keeps_values() {
            let mut mock = MockPaymentSubmitter::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| {
                    let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
                    Err(SubmitError::Encode(json_err))
                });
            let mut app = app_with(mock);

            fill(&mut app, "Jane Doe", "1234567890123456", "12/99", "123").await;
            app.submit().await;

            assert!(app
                .state
                .current_error()
                .is_some_and(|m| m.starts_with("Payment submission failed: Failed to encode")));
            assert_eq!(app.state.phase, CheckoutPhase::Editing);
            assert_eq!(app.state.form.card_number.value(), "1234567890123456");

            // Dialog is modal until dismissed
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert!(app.state.has_errors());
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(!app.state.has_errors());
        }
    }
}

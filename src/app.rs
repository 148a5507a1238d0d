use crate::cli::AppConfig;
use crate::controller::EditController;
use crate::document::PinMode;
use crate::event::{AppEvent, Event, EventHandler};
use crate::keycode::RawKey;
use crate::serial::TokioSerialTransport;
use crate::store::LocalFileStore;
use crate::{log_debug, log_info};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use color_eyre::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Intensity change per ↑/↓ press.
pub const INTENSITY_STEP: i64 = 5;

/// Which input surface currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Pin grid navigation.
    Normal,
    /// A pin has edit focus; keys go to it.
    Editing(PinMode),
    /// The load path prompt is open.
    PathPrompt,
    /// A typed intensity value for the highlighted pin.
    IntensityEntry,
}

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Held configuration, file, focus and serial session
    pub controller: EditController,
    /// Backing store of the controller; the path prompt selects into it
    pub store: Arc<LocalFileStore>,
    /// Index of the highlighted pin
    pub selected: usize,
    /// Text of the path prompt while it is open
    pub prompt: Option<String>,
    /// Digits typed into the intensity entry while it is open
    pub intensity_entry: Option<String>,
    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(LocalFileStore::new(config.config_path.clone()));
        let transport = Arc::new(TokioSerialTransport::new(config.port.clone()));
        let controller = EditController::new(store.clone(), transport, config.serial);

        let mut app = Self::with_controller(controller, store, EventHandler::new());
        if config.load_on_start {
            app.events.send(AppEvent::Load);
        }
        app
    }

    pub fn with_controller(controller: EditController, store: Arc<LocalFileStore>, events: EventHandler) -> Self {
        Self {
            running: true,
            controller,
            store,
            selected: 0,
            prompt: None,
            intensity_entry: None,
            events,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;
        let mut serial_alive = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
                needs_redraw = false;
            }

            tokio::select! {
                event = self.events.next() => {
                    match event? {
                        Event::Tick => {}
                        Event::Crossterm(CrosstermEvent::Key(key_event)) => {
                            self.handle_key_events(key_event)?;
                            needs_redraw = true;
                        }
                        Event::Crossterm(CrosstermEvent::Resize(..)) => needs_redraw = true,
                        Event::Crossterm(_) => {}
                        Event::App(app_event) => {
                            self.handle_app_event(app_event).await;
                            needs_redraw = true;
                        }
                    }
                }
                alive = self.controller.next_serial(), if serial_alive => {
                    serial_alive = alive;
                    needs_redraw = true;
                }
            }
        }

        self.controller.shutdown().await;
        log_info!("Configurator closed");
        Ok(())
    }

    pub fn input_mode(&self) -> InputMode {
        if self.prompt.is_some() {
            return InputMode::PathPrompt;
        }
        if self.intensity_entry.is_some() {
            return InputMode::IntensityEntry;
        }
        match self.controller.focused_slot() {
            Some((_, slot)) => InputMode::Editing(slot.mode),
            None => InputMode::Normal,
        }
    }

    /// Id of the highlighted pin.
    pub fn selected_pin(&self) -> Option<String> {
        self.controller
            .document()
            .pin_at(self.selected)
            .map(|(pin, _)| pin.to_string())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> Result<()> {
        if key_event.kind == KeyEventKind::Release {
            return Ok(());
        }
        if matches!(key_event.code, KeyCode::Char('c' | 'C')) && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            self.events.send(AppEvent::Quit);
            return Ok(());
        }

        match self.input_mode() {
            InputMode::PathPrompt => self.handle_prompt_key(key_event),
            InputMode::IntensityEntry => self.handle_intensity_key(key_event),
            InputMode::Editing(PinMode::Discrete) => self.handle_capture_key(key_event),
            InputMode::Editing(PinMode::Literal) => self.handle_literal_key(key_event),
            InputMode::Normal => match key_event.code {
                KeyCode::Esc | KeyCode::Char('q') => self.events.send(AppEvent::Quit),
                KeyCode::Right => self.events.send(AppEvent::NextPin),
                KeyCode::Left => self.events.send(AppEvent::PrevPin),
                KeyCode::Enter => self.events.send(AppEvent::ToggleFocus),
                KeyCode::Char('m') => self.events.send(AppEvent::ToggleMode),
                KeyCode::Up => self.events.send(AppEvent::AdjustIntensity(INTENSITY_STEP)),
                KeyCode::Down => self.events.send(AppEvent::AdjustIntensity(-INTENSITY_STEP)),
                KeyCode::Char('i') => self.intensity_entry = Some(String::new()),
                KeyCode::Char('r') => self.events.send(AppEvent::ResetIntensity),
                KeyCode::Char('l') => {
                    let current = self.store.selection().map(|path| path.display().to_string());
                    self.prompt = Some(current.unwrap_or_default());
                }
                KeyCode::Char('s') => self.events.send(AppEvent::Save),
                KeyCode::Char('c') => self.events.send(AppEvent::ClearTerminal),
                _ => {}
            },
        }
        Ok(())
    }

    fn handle_prompt_key(&mut self, key_event: KeyEvent) {
        let Some(input) = self.prompt.as_mut() else {
            return;
        };
        match key_event.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                let path = input.trim().to_string();
                self.prompt = None;
                if path.is_empty() {
                    return;
                }
                self.store.select(PathBuf::from(path));
                self.events.send(AppEvent::Load);
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
    }

    fn handle_intensity_key(&mut self, key_event: KeyEvent) {
        let Some(input) = self.intensity_entry.as_mut() else {
            return;
        };
        match key_event.code {
            KeyCode::Esc => self.intensity_entry = None,
            KeyCode::Enter => {
                let typed = input.trim().to_string();
                self.intensity_entry = None;
                if typed.is_empty() {
                    return;
                }
                match typed.parse::<i64>() {
                    Ok(value) => self.events.send(AppEvent::EnterIntensity(value)),
                    Err(_) => self.controller.set_error("Intensity must be a whole number."),
                }
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || (c == '-' && input.is_empty()) => input.push(c),
            _ => {}
        }
    }

    fn handle_capture_key(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Esc {
            self.leave_focus();
            return;
        }
        let Some(raw) = RawKey::from_key_event(&key_event) else {
            return;
        };
        match self.controller.capture_key(&raw) {
            Ok(Some(token)) => log_debug!("Toggled {}", token),
            Ok(None) => {}
            Err(e) => self.controller.set_error(e.to_string()),
        }
    }

    fn handle_literal_key(&mut self, key_event: KeyEvent) {
        let Some((pin, slot)) = self.controller.focused_slot() else {
            return;
        };
        let pin = pin.to_string();
        let mut text = slot.literal.clone();

        match key_event.code {
            KeyCode::Esc => {
                self.leave_focus();
                return;
            }
            KeyCode::Enter => text.push_str("\\n"),
            KeyCode::Tab => text.push('\t'),
            KeyCode::Backspace => {
                // the newline escape is removed as one unit
                if text.ends_with("\\n") {
                    text.truncate(text.len() - 2);
                } else {
                    text.pop();
                }
            }
            KeyCode::Char(c) => text.push(c),
            _ => return,
        }

        if let Err(e) = self.controller.set_literal_text(&pin, text) {
            self.controller.set_error(e.to_string());
        }
    }

    fn leave_focus(&mut self) {
        if let Err(e) = self.controller.set_edit_focus(None) {
            self.controller.set_error(e.to_string());
        }
    }

    /// Applies an application event to the controller.
    pub async fn handle_app_event(&mut self, app_event: AppEvent) {
        let pins = self.controller.document().len();

        let result = match app_event {
            AppEvent::NextPin => {
                if pins > 0 {
                    self.selected = (self.selected + 1) % pins;
                }
                Ok(())
            }
            AppEvent::PrevPin => {
                if pins > 0 {
                    self.selected = (self.selected + pins - 1) % pins;
                }
                Ok(())
            }
            AppEvent::ToggleFocus => match self.selected_pin() {
                Some(pin) => self.controller.set_edit_focus(Some(&pin)),
                None => Ok(()),
            },
            AppEvent::ToggleMode => match self.selected_pin() {
                Some(pin) => self.controller.toggle_mode(&pin).map(|_| ()),
                None => Ok(()),
            },
            AppEvent::AdjustIntensity(delta) => match self.selected_pin() {
                Some(pin) => self.controller.adjust_intensity(&pin, delta).map(|_| ()),
                None => Ok(()),
            },
            AppEvent::EnterIntensity(value) => match self.selected_pin() {
                Some(pin) => self.controller.try_set_intensity(&pin, value).map(|_| ()),
                None => Ok(()),
            },
            AppEvent::ResetIntensity => match self.selected_pin() {
                Some(pin) => self.controller.reset_intensity(&pin).map(|_| ()),
                None => Ok(()),
            },
            AppEvent::Load => {
                // outcome and failures are reported through the status line
                let _ = self.controller.load_config().await;
                self.follow_focus();
                Ok(())
            }
            AppEvent::Save => {
                let _ = self.controller.save_config().await;
                Ok(())
            }
            AppEvent::ClearTerminal => {
                self.controller.clear_terminal();
                Ok(())
            }
            AppEvent::Quit => {
                self.quit();
                Ok(())
            }
        };

        if let Err(e) = result {
            self.controller.set_error(e.to_string());
        }
    }

    /// Keeps the highlighted pin in range, and on the focused pin when there is one.
    fn follow_focus(&mut self) {
        let document = self.controller.document();
        if let Some(index) = self.controller.focus().and_then(|pin| document.index_of(pin)) {
            self.selected = index;
        } else {
            self.selected = self.selected.min(document.len().saturating_sub(1));
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PinOutput;
    use crate::keycode::KeyToken;
    use crate::serial::testing::ScriptedTransport;
    use crate::serial::SerialConfig;

    fn app() -> App {
        let store = Arc::new(LocalFileStore::new(None));
        let controller = EditController::new(
            store.clone(),
            Arc::new(ScriptedTransport::default()),
            SerialConfig::default(),
        );
        App::with_controller(controller, store, EventHandler::detached())
    }

    async fn press(app: &mut App, code: KeyCode) {
        app.handle_key_events(KeyEvent::from(code)).unwrap();
        while let Some(event) = app.events.try_next() {
            if let Event::App(app_event) = event {
                app.handle_app_event(app_event).await;
            }
        }
    }

    #[tokio::test]
    async fn test_navigate_focus_and_capture() {
        let mut app = app();
        press(&mut app, KeyCode::Right).await;
        assert_eq!(app.selected_pin().as_deref(), Some("GP9"));
        press(&mut app, KeyCode::Left).await;
        press(&mut app, KeyCode::Left).await;
        assert_eq!(app.selected_pin().as_deref(), Some("GP15"));

        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.input_mode(), InputMode::Editing(PinMode::Discrete));

        // q is captured while a pin is focused, not treated as quit
        press(&mut app, KeyCode::Char('q')).await;
        press(&mut app, KeyCode::Enter).await;
        assert!(app.running);
        assert_eq!(
            app.controller.document().get("GP15").unwrap().output(),
            PinOutput::Discrete(vec![KeyToken::from("R"), KeyToken::from("Q"), KeyToken::from("ENTER")])
        );

        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.input_mode(), InputMode::Normal);
        press(&mut app, KeyCode::Char('q')).await;
        assert!(!app.running);
    }

    #[tokio::test]
    async fn test_literal_editing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('m')).await;
        assert_eq!(app.input_mode(), InputMode::Editing(PinMode::Literal));

        for c in "hi".chars() {
            press(&mut app, KeyCode::Char(c)).await;
        }
        press(&mut app, KeyCode::Enter).await;
        press(&mut app, KeyCode::Char('x')).await;
        press(&mut app, KeyCode::Backspace).await;
        for c in "bye".chars() {
            press(&mut app, KeyCode::Char(c)).await;
        }
        assert_eq!(app.controller.document().get("GP0").unwrap().literal, "hi\\nbye");

        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.input_mode(), InputMode::Normal);
    }

    #[tokio::test]
    async fn test_intensity_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Down).await;
        assert_eq!(app.controller.document().get("GP0").unwrap().intensity.value(), 20);
        press(&mut app, KeyCode::Right).await;
        press(&mut app, KeyCode::Up).await;
        assert_eq!(app.controller.document().get("GP9").unwrap().intensity.value(), 55);
    }

    #[tokio::test]
    async fn test_typed_intensity_entry() {
        let mut app = app();
        press(&mut app, KeyCode::Right).await;

        press(&mut app, KeyCode::Char('i')).await;
        assert_eq!(app.input_mode(), InputMode::IntensityEntry);
        for c in "150".chars() {
            press(&mut app, KeyCode::Char(c)).await;
        }
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.controller.document().get("GP9").unwrap().intensity.value(), 50);
        assert_eq!(app.controller.status(), Some("Intensity must be between 0 and 100."));

        press(&mut app, KeyCode::Char('i')).await;
        for c in "4x0".chars() {
            press(&mut app, KeyCode::Char(c)).await;
        }
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.controller.document().get("GP9").unwrap().intensity.value(), 40);

        press(&mut app, KeyCode::Char('i')).await;
        press(&mut app, KeyCode::Char('9')).await;
        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.controller.document().get("GP9").unwrap().intensity.value(), 40);
    }

    #[tokio::test]
    async fn test_reset_intensity_key() {
        let mut app = app();
        press(&mut app, KeyCode::Down).await;
        assert_eq!(app.controller.document().get("GP0").unwrap().intensity.value(), 20);
        press(&mut app, KeyCode::Char('r')).await;
        assert_eq!(app.controller.document().get("GP0").unwrap().intensity.value(), 100);
    }

    #[tokio::test]
    async fn test_save_without_file_reports_status() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s')).await;
        assert_eq!(
            app.controller.status(),
            Some("No configuration file loaded. Please load a file first.")
        );
    }

    #[tokio::test]
    async fn test_path_prompt_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pad.json");
        std::fs::write(&path, r#"{"button_pins": {"GP3": ["A"], "GP4": ["B"]}}"#).unwrap();

        let mut app = app();
        press(&mut app, KeyCode::Left).await;
        assert_eq!(app.selected, 3);

        press(&mut app, KeyCode::Char('l')).await;
        assert_eq!(app.input_mode(), InputMode::PathPrompt);
        for c in path.display().to_string().chars() {
            press(&mut app, KeyCode::Char(c)).await;
        }
        press(&mut app, KeyCode::Enter).await;

        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.controller.file_name().as_deref(), Some("pad.json"));
        assert_eq!(app.selected, 1);
    }
}

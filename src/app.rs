use crate::config::Config;
use crate::device::Gallery;
use crate::events::device::{Event as DeviceEvent, Handler as DeviceEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{CustomLogger, LogBuffer};
use crate::state::State;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type DeviceEventSender = std::sync::mpsc::Sender<DeviceEvent>;
type DeviceEventReceiver = std::sync::mpsc::Receiver<DeviceEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let log_buffer = LogBuffer::default();
        CustomLogger::new(log_buffer.clone(), config.log_level_filter()?).init()?;

        info!("Starting application...");
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!(
                "Unknown theme '{}', expected one of: {}",
                config.theme_name,
                Theme::available_themes().join(", ")
            );
            Theme::default()
        });
        let (tx, rx) = std::sync::mpsc::channel::<DeviceEvent>();
        let app = App {
            state: Arc::new(Mutex::new(State::new(tx, theme, log_buffer))),
            config,
        };
        app.start_device_worker(rx);
        let result = app.start_ui().await;

        app.state.lock().await.unmount();
        info!("Exiting application...");
        result
    }

    /// Start a separate thread for gallery access and image processing.
    ///
    fn start_device_worker(&self, device_receiver: DeviceEventReceiver) {
        debug!("Creating new thread for device work...");
        let cloned_state = Arc::clone(&self.state);
        let gallery = Gallery::new(
            self.config.gallery_path.clone(),
            self.config.cache_path.clone(),
        );
        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to start device runtime: {}", e);
                    return;
                }
            };
            runtime.block_on(async {
                let mut device_event_handler = DeviceEventHandler::new(&cloned_state, &gallery);
                while let Ok(device_event) = device_receiver.recv() {
                    if let Err(e) = device_event_handler.handle(device_event).await {
                        error!("Failed to handle device event: {}", e);
                    }
                }
                debug!("Device channel closed.");
            })
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. The terminal is restored even when the
    /// loop fails.
    ///
    async fn start_ui(&self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let result = self.run_loop(stdout).await;

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        result
    }

    async fn run_loop(&self, stdout: io::Stdout) -> Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        self.state.lock().await.mount();

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        terminal.show_cursor()?;
        Ok(())
    }
}

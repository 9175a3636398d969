//! Robo - keyboard teleoperation for a small wheeled robot
//!
//! Each key press drives the robot once; releasing the key stops it. The last
//! command and the board's status code are shown on the status line.

mod config;

use std::fs::{self, File};
use std::io::{self, stdout};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Context;
use crossbeam_channel::Receiver;
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use robo_engine::{
    create_channels, Controller, Outcome, RobotEvent, RobotHardware, SimulatedRobot, StatusEvent,
};
use robo_input::terminal::{normalize, ReleaseFallback};
use robo_input::{DebounceState, InputEvent};
use robo_tui::{App, HelpWidget, StatusLineWidget, TelemetryWidget, Theme};

fn main() -> anyhow::Result<()> {
    let config = Config::load();
    init_logging(&config)?;
    info!(?config, "starting robo");

    // Bring the board up before touching the terminal
    let (event_tx, event_rx) = create_channels();
    let mut robot = SimulatedRobot::new(config.simulator(), event_tx);
    robot.init().context("robot board failed to initialize")?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Key release reporting (kitty protocol). Without it, releases are
    // inferred from key silence.
    let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true))
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
            )
        )
        .is_ok();
    info!(keyboard_enhanced, "terminal ready");

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, Controller::new(robot), &event_rx, &config);

    // Cleanup
    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match &result {
        Ok(()) => info!("clean exit"),
        Err(e) => error!("fatal: {:#}", e),
    }
    result
}

/// Send tracing output to the log file; the terminal belongs to the UI
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::create(&path).with_context(|| format!("opening log {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app<H: RobotHardware>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut controller: Controller<H>,
    robot_events: &Receiver<RobotEvent>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut app = App::new();
    app.state.min_voltage = config.min_voltage;
    match Theme::by_name(&config.theme) {
        Some(theme) => app.state.theme = theme,
        None => warn!(theme = %config.theme, "unknown theme, using default"),
    }

    let mut fallback = ReleaseFallback::new(config.release_timeout());
    let frame_duration = config.tick();
    let mut last_frame = Instant::now();

    loop {
        if app.should_quit {
            break;
        }

        // Sensor notifications are only displayed and logged
        controller.hardware_mut().poll_telemetry();
        while let Ok(event) = robot_events.try_recv() {
            log_robot_event(event);
            app.state.handle_robot_event(event);
        }

        // Terminals without key-up events
        if controller.debounce_state() == DebounceState::Suppressed {
            if let Some(release) = fallback.poll(Instant::now()) {
                dispatch(&mut app, &mut controller, release)?;
            }
        }

        app.state.leds = controller.lit_leds();
        app.state.debounce = controller.debounce_state();
        app.state.native_releases = fallback.native_releases();

        terminal.draw(|frame| render_ui(frame, &app))?;

        // Handle input
        let timeout = frame_duration.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = normalize(&key) {
                    fallback.observe(input, Instant::now());
                    dispatch(&mut app, &mut controller, input)?;
                }
            }
        }

        if last_frame.elapsed() >= frame_duration {
            last_frame = Instant::now();
        }
    }

    // Leave the robot parked
    if let Err(e) = controller.hardware_mut().stop() {
        warn!("stop on exit failed: {}", e);
    }

    Ok(())
}

/// Run one input event through the controller. Board errors are fatal.
fn dispatch<H: RobotHardware>(
    app: &mut App,
    controller: &mut Controller<H>,
    input: InputEvent,
) -> anyhow::Result<()> {
    let outcome = controller
        .handle(input)
        .with_context(|| format!("robot board failed while handling {:?}", input))?;

    match outcome {
        Outcome::Dispatched(report) => {
            info!(command = ?report.command, result = report.result, "command");
            app.state.apply_report(&report);
        }
        Outcome::Swallowed => {}
        Outcome::Quit => {
            info!("quit requested");
            app.quit();
        }
    }
    Ok(())
}

fn log_robot_event(event: RobotEvent) {
    match event {
        RobotEvent::Status(StatusEvent::Init) => info!("[Status Changed] OK Init"),
        RobotEvent::Status(StatusEvent::Halt) => warn!("[Status Changed] WARN Halt"),
        RobotEvent::Voltage(volts) => info!("[Voltage Event] {} Volts", volts),
    }
}

fn render_ui(frame: &mut Frame, app: &App) {
    let state = &app.state;
    let theme = &state.theme;

    let chunks = Layout::vertical([
        Constraint::Min(3),    // Main
        Constraint::Length(1), // Telemetry
        Constraint::Length(1), // Status line
    ])
    .split(frame.area());

    if state.show_help {
        frame.render_widget(HelpWidget::new(theme), chunks[0]);
    } else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled(" ROBO ", theme.title()))
            .style(theme.normal());
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let rows = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(inner);
        let text = Paragraph::new(Line::from(Span::styled(state.status_text(), theme.title())))
            .alignment(Alignment::Center);
        frame.render_widget(text, rows[1]);
    }

    frame.render_widget(TelemetryWidget::new(state), chunks[1]);

    let status = state.status_text();
    frame.render_widget(
        StatusLineWidget::new(&status, theme)
            .message_type(state.message_type)
            .debounce(state.debounce),
        chunks[2],
    );
}

use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::{bounded, Receiver, Sender};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deck_core::{Debounce, Deck, DeckError, NavIntent, SlideController, SCROLL_SETTLE};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

mod dispatch;
mod input;
mod ui;

use dispatch::dispatch_intent;
use input::{InputAction, PointerTracker};
use ui::{TerminalSurface, ViewState};

/// Terminal rehearsal view for a course slide deck.
#[derive(Parser, Debug)]
#[command(name = "presenter")]
struct Args {
    /// Deck directory containing the slide HTML files.
    #[arg(default_value = "./deck")]
    deck_dir: PathBuf,
}

const UI_TICK: Duration = Duration::from_millis(250);
const INTENT_QUEUE_DEPTH: usize = 64;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let deck = Deck::discover(&args.deck_dir)?;

    // An empty deck already logged its warning; navigation stays unwired and
    // the presenter exits without touching the terminal.
    let controller = match SlideController::initialize(deck, TerminalSurface::default()) {
        Ok(controller) => controller,
        Err(DeckError::EmptyDeck) => return Ok(()),
        Err(err) => return Err(err.into()),
    };
    info!(slides = controller.total(), "presenting deck");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, controller);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut controller: SlideController<TerminalSurface>,
) -> Result<()> {
    let (intent_tx, intent_rx): (Sender<NavIntent>, Receiver<NavIntent>) =
        bounded(INTENT_QUEUE_DEPTH);
    let mut settle: Debounce<(f32, f32)> = Debounce::new(SCROLL_SETTLE);
    let mut tracker = PointerTracker::default();
    let mut view = ViewState::new(Instant::now());

    while !view.should_quit {
        terminal.draw(|frame| ui::draw(frame, &controller, &mut view))?;

        if event::poll(poll_timeout(&settle))? {
            let action = tracker.action_for_event(event::read()?, view.typing(), view.list);
            handle_action(action, &intent_tx, &mut settle, &mut view, &controller);
        }

        if let Some((offset, viewport)) = settle.poll(Instant::now()) {
            dispatch_intent(
                &intent_tx,
                NavIntent::ScrollSettled { offset, viewport },
                &mut view.status,
            );
        }

        // Intents are consumed sequentially, in arrival order.
        while let Ok(intent) = intent_rx.try_recv() {
            controller.apply(intent);
        }

        // A programmatic jump moves the view; snap the virtual offset to the
        // target so the next wheel event starts from where the user is.
        if let Some(target) = controller.surface_mut().take_scroll_target() {
            view.scroll_offset = target as f32 * view.viewport_rows;
        }
    }
    Ok(())
}

fn handle_action(
    action: InputAction,
    intent_tx: &Sender<NavIntent>,
    settle: &mut Debounce<(f32, f32)>,
    view: &mut ViewState,
    controller: &SlideController<TerminalSurface>,
) {
    match action {
        InputAction::Nothing => {}
        InputAction::Quit => view.should_quit = true,
        InputAction::Intent(intent) => dispatch_intent(intent_tx, intent, &mut view.status),
        InputAction::ScrollBy(rows) => {
            let max_offset = (controller.total() - 1) as f32 * view.viewport_rows;
            view.scroll_offset = (view.scroll_offset + rows).clamp(0.0, max_offset);
            settle.schedule(Instant::now(), (view.scroll_offset, view.viewport_rows));
        }
        InputAction::BeginJumpPrompt => view.jump_prompt = Some(String::new()),
        InputAction::PromptChar(c) => {
            if let Some(prompt) = &mut view.jump_prompt {
                prompt.push(c);
            }
        }
        InputAction::PromptBackspace => {
            if let Some(prompt) = &mut view.jump_prompt {
                prompt.pop();
            }
        }
        InputAction::PromptCancel => view.jump_prompt = None,
        InputAction::PromptSubmit => {
            if let Some(prompt) = view.jump_prompt.take() {
                match prompt.parse::<usize>() {
                    Ok(number) if number >= 1 => {
                        dispatch_intent(
                            intent_tx,
                            NavIntent::JumpTo(number - 1),
                            &mut view.status,
                        );
                    }
                    _ => view.status = "enter a slide number first".to_string(),
                }
            }
        }
    }
}

fn poll_timeout(settle: &Debounce<(f32, f32)>) -> Duration {
    match settle.deadline() {
        Some(deadline) => deadline
            .saturating_duration_since(Instant::now())
            .min(UI_TICK),
        None => UI_TICK,
    }
}

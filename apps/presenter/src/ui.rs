//! Terminal rendering: the [`Surface`] implementation the controller drives,
//! plus the frame layout.

use std::time::{Duration, Instant};

use deck_core::{SlideController, Surface, SCROLL_PULSE};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

/// How long the navigation hint stays up after startup.
pub const NAV_HINT_VISIBLE: Duration = Duration::from_secs(3);

/// Where the slide list landed in the last frame, for pointer hit-testing.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListGeometry {
    pub area: Rect,
    /// Index of the first visible slide row.
    pub top: usize,
}

/// View state that is not the controller's concern: the virtual scroll
/// position, the jump prompt, and transient chrome.
pub struct ViewState {
    pub scroll_offset: f32,
    pub viewport_rows: f32,
    pub jump_prompt: Option<String>,
    pub status: String,
    pub hint_until: Instant,
    pub list: ListGeometry,
    pub should_quit: bool,
}

impl ViewState {
    pub fn new(now: Instant) -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_rows: 24.0,
            jump_prompt: None,
            status: String::new(),
            hint_until: now + NAV_HINT_VISIBLE,
            list: ListGeometry::default(),
            should_quit: false,
        }
    }

    pub fn typing(&self) -> bool {
        self.jump_prompt.is_some()
    }
}

/// Render target the controller synchronizes against. Stores the derived
/// view state (progress, labels, highlight, focus, title) that the next
/// frame paints; `scroll_to` records the jump target and starts the pulse.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    progress_percent: f32,
    page_labels: Vec<String>,
    highlighted: usize,
    focused: usize,
    title: String,
    scroll_target: Option<usize>,
    pulse_until: Option<Instant>,
}

impl TerminalSurface {
    /// The jump requested by the last programmatic navigation, taken once so
    /// the event loop can snap the virtual scroll offset to it.
    pub fn take_scroll_target(&mut self) -> Option<usize> {
        self.scroll_target.take()
    }

    fn pulse_active(&self) -> bool {
        self.pulse_until.map(|t| Instant::now() < t).unwrap_or(false)
    }
}

impl Surface for TerminalSurface {
    fn set_progress(&mut self, percent: f32) {
        self.progress_percent = percent;
    }

    fn set_page_label(&mut self, slide: usize, label: &str) {
        if self.page_labels.len() <= slide {
            self.page_labels.resize(slide + 1, String::new());
        }
        self.page_labels[slide] = label.to_string();
    }

    fn set_highlight(&mut self, slide: usize) {
        self.highlighted = slide;
    }

    fn set_focus(&mut self, slide: usize) {
        self.focused = slide;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn scroll_to(&mut self, slide: usize) {
        self.scroll_target = Some(slide);
        self.pulse_until = Some(Instant::now() + SCROLL_PULSE);
    }
}

pub fn draw(frame: &mut Frame, controller: &SlideController<TerminalSurface>, view: &mut ViewState) {
    let surface = controller.surface();
    view.viewport_rows = frame.area().height.max(1) as f32;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_progress(frame, chunks[0], controller, surface);
    draw_slide_list(frame, chunks[1], controller, surface, view);
    draw_current_slide(frame, chunks[2], controller, surface);
    draw_footer(frame, chunks[3], view);
}

fn draw_progress(
    frame: &mut Frame,
    area: Rect,
    controller: &SlideController<TerminalSurface>,
    surface: &TerminalSurface,
) {
    let percent = surface.progress_percent.clamp(0.0, 100.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Red))
        .ratio(f64::from(percent) / 100.0)
        .label(format!(
            "{} / {} · {:.0}%",
            controller.index() + 1,
            controller.total(),
            percent
        ));
    frame.render_widget(gauge, area);
}

fn draw_slide_list(
    frame: &mut Frame,
    area: Rect,
    controller: &SlideController<TerminalSurface>,
    surface: &TerminalSurface,
    view: &mut ViewState,
) {
    let total = controller.total();
    let visible = area.height.saturating_sub(2).max(1) as usize;
    let top = controller
        .index()
        .saturating_sub(visible / 2)
        .min(total.saturating_sub(visible));
    view.list = ListGeometry { area, top };

    let items: Vec<ListItem> = controller
        .deck()
        .slides()
        .iter()
        .enumerate()
        .skip(top)
        .take(visible)
        .map(|(i, slide)| {
            let label = surface
                .page_labels
                .get(i)
                .map(String::as_str)
                .unwrap_or_default();
            let current = i == surface.highlighted;
            let marker = if current { "▶" } else { " " };
            let mut style = if current {
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            if current && surface.pulse_active() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let focus_mark = if i == surface.focused { "●" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} {focus_mark} "), style),
                Span::styled(format!("{label:<9}"), style),
                Span::styled(slide.title.clone(), style),
            ]))
        })
        .collect();

    let list =
        List::new(items).block(Block::default().borders(Borders::ALL).title("Slides"));
    frame.render_widget(list, area);
}

fn draw_current_slide(
    frame: &mut Frame,
    area: Rect,
    controller: &SlideController<TerminalSurface>,
    surface: &TerminalSurface,
) {
    let source = controller
        .deck()
        .get(controller.index())
        .map(|slide| slide.source.display().to_string())
        .unwrap_or_default();
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            surface.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(source, Style::default().fg(Color::DarkGray))),
    ])
    .block(Block::default().borders(Borders::ALL).title("Current"));
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &ViewState) {
    let text = if let Some(prompt) = &view.jump_prompt {
        format!("Go to slide: {prompt}_  (Enter to jump, Esc to cancel)")
    } else if Instant::now() < view.hint_until {
        "← → navigate · Space next · Home/End ends · g go to · wheel scroll · drag swipe · q quit"
            .to_string()
    } else {
        view.status.clone()
    };
    let footer =
        Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(footer, area);
}

//! Terminal player (default binary).
//!
//! Drives the same diff protocol the browser front end consumes: the
//! board reports per-tick cell mutations and this renderer applies them
//! one terminal cell at a time, never repainting the whole field.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor},
    terminal, QueueableCommand,
};

use divtris::core::{Board, CellPatch, StepDiff};
use divtris::types::{
    InputCodes, Signal, Style, CH_HORIZONTAL, CH_PAUSE, CH_SWAP, CH_VERTICAL, HEIGHT, READY_DX,
    WIDTH,
};

const TICK_MS: u64 = 50;
/// Ticks a soft-drop key press stays latched; two ticks of hold are the
/// minimum that produces a downward substep.
const DROP_LATCH_TICKS: u32 = 4;

/// Left edge of the playfield in terminal columns; each cell is two
/// characters wide.
const FIELD_LEFT: u16 = 2;
const FIELD_TOP: u16 = 1;

fn main() -> Result<()> {
    let mut term = TermView::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TermView) -> Result<()> {
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
        .wrapping_add(std::process::id());
    let mut board = Board::new(seed);

    term.draw_chrome()?;

    let mut input: InputCodes = [0; 4];
    let mut paused = false;
    let mut drop_latch = 0u32;

    let tick_duration = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();

    loop {
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Left | KeyCode::Char('a') => input[CH_HORIZONTAL] = -1,
                        KeyCode::Right | KeyCode::Char('d') => input[CH_HORIZONTAL] = 1,
                        KeyCode::Up | KeyCode::Char('w') => input[CH_VERTICAL] = 1,
                        KeyCode::Down | KeyCode::Char('s') => drop_latch = DROP_LATCH_TICKS,
                        KeyCode::Char(' ') => input[CH_SWAP] = 1,
                        KeyCode::Char('p') => paused = !paused,
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if drop_latch > 0 {
                drop_latch -= 1;
                input[CH_VERTICAL] = -1;
            }
            input[CH_PAUSE] = i8::from(paused);

            let diff = board.step(input);
            term.apply(&diff)?;

            // Presses are one-tick pulses; pause stays latched.
            input = [0, 0, 0, i8::from(paused)];
        }
    }
}

struct TermView {
    stdout: io::Stdout,
}

impl TermView {
    fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Static borders and key legend, drawn once.
    fn draw_chrome(&mut self) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        let wall = "#".repeat((WIDTH as usize + 2) * 2);
        self.stdout.queue(cursor::MoveTo(0, FIELD_TOP - 1))?;
        self.stdout.queue(Print(&wall))?;
        for y in 0..HEIGHT as u16 {
            self.stdout.queue(cursor::MoveTo(0, FIELD_TOP + y))?;
            self.stdout.queue(Print("##"))?;
            self.stdout
                .queue(cursor::MoveTo(FIELD_LEFT + WIDTH as u16 * 2, FIELD_TOP + y))?;
            self.stdout.queue(Print("##"))?;
        }
        self.stdout
            .queue(cursor::MoveTo(0, FIELD_TOP + HEIGHT as u16))?;
        self.stdout.queue(Print(&wall))?;

        self.stdout
            .queue(cursor::MoveTo(self.cell_col(READY_DX), FIELD_TOP))?;
        self.stdout.queue(Print("next"))?;
        self.stdout
            .queue(cursor::MoveTo(0, FIELD_TOP + HEIGHT as u16 + 2))?;
        self.stdout
            .queue(Print("arrows/wasd move  space swap  p pause  q quit"))?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Replay one frame's mutations.
    fn apply(&mut self, diff: &StepDiff) -> Result<()> {
        if diff.status.signal == Signal::ClearAll {
            self.wipe()?;
        }
        for patch in &diff.removed {
            self.put(patch, None)?;
        }
        for patch in diff.added.iter().chain(&diff.recolored) {
            self.put(patch, Some(patch.style))?;
        }
        if let Some(cells) = &diff.ready {
            self.wipe_preview()?;
            for patch in cells {
                self.put(patch, Some(patch.style))?;
            }
        }
        self.draw_status(diff)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn cell_col(&self, x: i16) -> u16 {
        FIELD_LEFT + (x as u16) * 2
    }

    fn put(&mut self, patch: &CellPatch, style: Option<Style>) -> Result<()> {
        if patch.y < 0 {
            return Ok(());
        }
        self.stdout
            .queue(cursor::MoveTo(self.cell_col(patch.x), FIELD_TOP + patch.y as u16))?;
        match style {
            Some(style) => {
                self.stdout.queue(SetBackgroundColor(style_color(style)))?;
                self.stdout.queue(Print("  "))?;
                self.stdout.queue(ResetColor)?;
            }
            None => {
                self.stdout.queue(Print("  "))?;
            }
        }
        Ok(())
    }

    fn wipe(&mut self) -> Result<()> {
        let blank = " ".repeat(WIDTH as usize * 2);
        for y in 0..HEIGHT as u16 {
            self.stdout.queue(cursor::MoveTo(FIELD_LEFT, FIELD_TOP + y))?;
            self.stdout.queue(Print(&blank))?;
        }
        Ok(())
    }

    fn wipe_preview(&mut self) -> Result<()> {
        let blank = " ".repeat(10);
        for y in 1..=4u16 {
            self.stdout
                .queue(cursor::MoveTo(self.cell_col(READY_DX), FIELD_TOP + y))?;
            self.stdout.queue(Print(&blank))?;
        }
        Ok(())
    }

    fn draw_status(&mut self, diff: &StepDiff) -> Result<()> {
        self.stdout
            .queue(cursor::MoveTo(self.cell_col(READY_DX), FIELD_TOP + 7))?;
        let state = match diff.status.signal {
            Signal::Paused => "paused  ",
            Signal::GameOver => "game over",
            _ => "         ",
        };
        self.stdout.queue(Print(format!(
            "lines {:<4} swap {:<2}",
            diff.status.lines, diff.status.swap_points
        )))?;
        self.stdout
            .queue(cursor::MoveTo(self.cell_col(READY_DX), FIELD_TOP + 8))?;
        self.stdout.queue(Print(state))?;
        Ok(())
    }
}

fn style_color(style: Style) -> Color {
    match style {
        0 => Color::Cyan,
        1 => Color::Yellow,
        2 => Color::Magenta,
        _ => Color::Green,
    }
}

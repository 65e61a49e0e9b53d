/// Rendering layer — all terminal I/O lives here.
///
/// The game draws into an off-screen `Raster`; this module blits it to the
/// terminal and rings the bell for sound cues. No game logic is performed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use arena_shooter::raster::{Raster, Tint};
use arena_shooter::sound::Clip;

// ── Colour palette ────────────────────────────────────────────────────────────

fn palette(tint: Tint) -> Color {
    match tint {
        Tint::Black => Color::Black,
        Tint::White => Color::White,
        Tint::Grey => Color::Grey,
        Tint::DarkGrey => Color::DarkGrey,
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Yellow => Color::Yellow,
        Tint::Blue => Color::DarkBlue,
        Tint::Magenta => Color::Magenta,
        Tint::Cyan => Color::Cyan,
    }
}

const C_HINT: Color = Color::DarkGrey;

// ── Public entry points ───────────────────────────────────────────────────────

pub fn clear<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.flush()
}

/// Blit one complete frame. Runs of equally tinted cells are printed with a
/// single colour change.
pub fn present<W: Write>(out: &mut W, raster: &Raster) -> std::io::Result<()> {
    let mut run = String::new();
    for (y, row) in raster.rows().enumerate() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        let mut current: Option<Tint> = None;
        for cell in row {
            if current != Some(cell.tint) {
                flush_run(out, &mut run, current)?;
                current = Some(cell.tint);
            }
            run.push(cell.glyph);
        }
        flush_run(out, &mut run, current)?;
    }

    draw_controls_hint(out, raster)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, raster.size().height as u16 + 1))?;
    out.flush()?;
    Ok(())
}

/// Ring the terminal bell once per cue. Fire-and-forget.
pub fn ring<W: Write>(out: &mut W, cues: &[Clip], enabled: bool) -> std::io::Result<()> {
    for clip in cues {
        log::debug!("playing {}", clip.name());
        if enabled {
            out.queue(Print('\x07'))?;
        }
    }
    if enabled && !cues.is_empty() {
        out.flush()?;
    }
    Ok(())
}

fn flush_run<W: Write>(out: &mut W, run: &mut String, tint: Option<Tint>) -> std::io::Result<()> {
    if let Some(tint) = tint {
        if !run.is_empty() {
            out.queue(style::SetForegroundColor(palette(tint)))?;
            out.queue(Print(run.as_str()))?;
        }
    }
    run.clear();
    Ok(())
}

// ── Controls hint (row under the viewport) ────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, raster: &Raster) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, raster.size().height as u16))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ / WASD : Move   SPACE : Shoot   ESC : Quit"))?;
    Ok(())
}

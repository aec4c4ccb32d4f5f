#![forbid(unsafe_code)]

//! Animated gradients: a blocking frame loop that re-renders the same
//! renderable with an advancing phase.
//!
//! Only ever entered when stdout is an interactive terminal; callers fall
//! back to a static render otherwise.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{cursor, execute, queue, terminal};

use crate::console::Console;

use super::{Renderable, VerticalAlign};

/// Delay between frames (roughly 20 fps).
const FRAME: Duration = Duration::from_millis(50);

/// Seconds for the gradient to make one full cycle.
const CYCLE_SECONDS: f64 = 3.0;

/// How an animation run behaves.
#[derive(Debug, Clone)]
pub struct AnimationOptions {
    /// Total run time in seconds.
    pub duration: f64,
    /// Clear the terminal first and place content vertically; used by the
    /// full-screen markdown animation.
    pub clear_screen: bool,
    pub vertical_align: VerticalAlign,
}

/// Runs the frame loop until the duration elapses. The cursor is hidden
/// for the run and shown again on every exit path, panics included.
pub fn run(
    console: &Console,
    renderable: &dyn Renderable,
    options: &AnimationOptions,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if options.clear_screen {
        execute!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
    }
    execute!(out, cursor::Hide)?;
    let _restore = CursorGuard;
    frame_loop(console, renderable, options, &mut out)
}

/// Shows the cursor again when dropped, whichever way the run ends.
struct CursorGuard;

impl Drop for CursorGuard {
    fn drop(&mut self) {
        // std's stdout lock is reentrant; a fresh handle cannot deadlock
        // against the loop's still-held lock.
        let _ = execute!(io::stdout(), cursor::Show);
    }
}

fn frame_loop(
    console: &Console,
    renderable: &dyn Renderable,
    options: &AnimationOptions,
    out: &mut impl Write,
) -> io::Result<()> {
    let start = Instant::now();
    let mut painted: u16 = 0;
    loop {
        let elapsed = start.elapsed().as_secs_f64();
        if elapsed >= options.duration {
            break;
        }
        let phase = (elapsed / CYCLE_SECONDS).fract() as f32;
        let mut lines = renderable.lines_at(console.width, phase);
        if options.clear_screen {
            let rows = terminal::size()
                .map(|(_, rows)| usize::from(rows))
                .unwrap_or(0);
            for _ in 0..vertical_pad(options.vertical_align, rows, lines.len()) {
                lines.insert(0, super::Line::default());
            }
        }
        if painted > 0 {
            queue!(
                out,
                cursor::MoveUp(painted),
                terminal::Clear(terminal::ClearType::FromCursorDown)
            )?;
        }
        console.write_lines(out, &lines, "\n")?;
        out.flush()?;
        painted = lines.len().min(usize::from(u16::MAX)) as u16;
        thread::sleep(FRAME);
    }
    Ok(())
}

/// Blank rows above the content for a given terminal height.
fn vertical_pad(align: VerticalAlign, rows: usize, content: usize) -> usize {
    let free = rows.saturating_sub(content);
    match align {
        VerticalAlign::Top => 0,
        VerticalAlign::Middle => free / 2,
        VerticalAlign::Bottom => free.saturating_sub(1),
    }
}

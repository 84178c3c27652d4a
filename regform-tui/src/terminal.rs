use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetForegroundColor},
    terminal,
};

use crate::config::{Rgb, Theme};
use crate::view::{Frame, Tone};

/// Owns the terminal while the form is on screen.
///
/// Raw mode and the alternate screen are restored on drop, including when
/// unwinding from an error.
pub struct Terminal {
    stdout: io::Stdout,
    theme: Theme,
}

impl Terminal {
    pub fn new(theme: Theme) -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { stdout, theme })
    }

    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            terminal::Clear(terminal::ClearType::All)
        )?;

        for (row, line) in frame.lines.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(frame.left, frame.top + row as u16))?;
            for span in &line.spans {
                let color = tone_color(&self.theme, span.tone);
                queue!(self.stdout, SetForegroundColor(color))?;
                if span.bold {
                    queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                }
                if span.reverse {
                    queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
                }
                queue!(self.stdout, Print(&span.text), SetAttribute(Attribute::Reset))?;
            }
        }

        match frame.cursor {
            Some((x, y)) => queue!(self.stdout, cursor::MoveTo(x, y), cursor::Show)?,
            None => queue!(self.stdout, cursor::Hide)?,
        }

        self.stdout.flush()
    }
}

fn tone_color(theme: &Theme, tone: Tone) -> CtColor {
    let Rgb(r, g, b) = match tone {
        Tone::Primary => theme.primary,
        Tone::Muted => theme.muted,
        Tone::Accent => theme.accent,
        Tone::Success => theme.success,
        Tone::Error => theme.error,
    };
    CtColor::Rgb { r, g, b }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

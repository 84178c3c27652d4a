//! Builds the screen contents from form state.
//!
//! Produces plain lines of styled spans so layout can be tested without a
//! terminal.

use regform_lib::{Field, InputKind, RegistrationForm};
use unicode_width::UnicodeWidthStr;

use crate::config::ErrorDisplay;
use crate::focus::{FocusState, FocusTarget};
use crate::text_input::{TextInputData, TextInputs};

const PAD_LEFT: u16 = 2;
const PAD_TOP: u16 = 1;
const INPUT_PREFIX: &str = "> ";
const MASK: char = '•';

pub const HELP: &str = "Tab/Shift+Tab move  Enter/Ctrl+S submit  Ctrl+R reset  Esc quit";

/// Semantic colour of a span, resolved against the theme when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Muted,
    Accent,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
    pub bold: bool,
    pub reverse: bool,
}

impl Span {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            bold: false,
            reverse: false,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    fn blank() -> Self {
        Self::default()
    }

    fn of(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Concatenated text, ignoring styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A full screen: lines from the top-left corner plus the cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<Line>,
    /// `(column, row)` of the text cursor, when an input is focused.
    pub cursor: Option<(u16, u16)>,
    pub left: u16,
    pub top: u16,
}

/// Message shown under the submit button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    Rejected(usize),
    Registered(String),
    ServiceFailed(String),
}

impl Status {
    fn span(&self) -> Span {
        match self {
            Self::Ready => Span::new("Fill in the form and press Enter to register", Tone::Muted),
            Self::Rejected(count) => Span::new(
                format!("Please fix {} field(s) above", count),
                Tone::Error,
            ),
            Self::Registered(username) => {
                Span::new(format!("Registered {}", username), Tone::Success).bold()
            }
            Self::ServiceFailed(message) => Span::new(message.clone(), Tone::Error),
        }
    }
}

/// Everything needed to draw one frame.
pub struct View<'a> {
    pub form: &'a RegistrationForm,
    pub inputs: &'a TextInputs,
    pub focus: &'a FocusState,
    pub status: &'a Status,
    pub error_display: ErrorDisplay,
}

impl View<'_> {
    pub fn render(&self) -> Frame {
        let mut lines = vec![
            Line::of(vec![Span::new("Register", Tone::Primary).bold()]),
            Line::blank(),
        ];
        let mut cursor = None;

        for field in Field::ALL {
            let error = self.form.error(field);
            let focused = self.focus.focused() == FocusTarget::Input(field);

            let label_tone = match (error, self.error_display) {
                (Some(_), ErrorDisplay::None) => Tone::Error,
                _ => Tone::Muted,
            };
            lines.push(Line::of(vec![Span::new(field.label(), label_tone)]));

            let data = self.inputs.get(field);
            let mut input = input_spans(field, data, focused);
            if let (Some(message), ErrorDisplay::Inline) = (error, self.error_display) {
                input.push(Span::new(format!("  {}", message), Tone::Error));
            }
            if focused {
                let col = PAD_LEFT as usize + INPUT_PREFIX.width() + cursor_offset(field, data);
                let row = PAD_TOP as usize + lines.len();
                cursor = Some((col as u16, row as u16));
            }
            lines.push(Line::of(input));

            if let (Some(message), ErrorDisplay::Below) = (error, self.error_display) {
                lines.push(Line::of(vec![Span::new(
                    format!("{}{}", " ".repeat(INPUT_PREFIX.width()), message),
                    Tone::Error,
                )]));
            }
            lines.push(Line::blank());
        }

        let button = Span::new("[ Register ]", Tone::Accent).bold();
        let button = if self.focus.focused() == FocusTarget::Submit {
            button.reverse()
        } else {
            button
        };
        lines.push(Line::of(vec![button]));
        lines.push(Line::blank());
        lines.push(Line::of(vec![self.status.span()]));
        lines.push(Line::of(vec![Span::new(HELP, Tone::Muted)]));

        Frame {
            lines,
            cursor,
            left: PAD_LEFT,
            top: PAD_TOP,
        }
    }
}

/// Text as it should appear on screen.
fn display_text(field: Field, text: &str) -> String {
    match field.kind() {
        InputKind::Password => MASK.to_string().repeat(text.chars().count()),
        InputKind::Text | InputKind::Email => text.to_string(),
    }
}

/// Display width of the input text before the cursor.
fn cursor_offset(field: Field, data: &TextInputData) -> usize {
    let before: String = data.text.chars().take(data.cursor).collect();
    display_text(field, &before).width()
}

fn input_spans(field: Field, data: &TextInputData, focused: bool) -> Vec<Span> {
    let prefix_tone = if focused { Tone::Accent } else { Tone::Muted };
    let mut spans = vec![Span::new(INPUT_PREFIX, prefix_tone)];

    if data.text.is_empty() {
        spans.push(Span::new(field.placeholder(), Tone::Muted));
        return spans;
    }

    let shown: Vec<char> = display_text(field, &data.text).chars().collect();
    match data.selection().filter(|_| focused) {
        Some((start, end)) => {
            let before: String = shown[..start].iter().collect();
            let selected: String = shown[start..end].iter().collect();
            let after: String = shown[end..].iter().collect();
            spans.push(Span::new(before, Tone::Primary));
            spans.push(Span::new(selected, Tone::Primary).reverse());
            spans.push(Span::new(after, Tone::Primary));
        }
        None => spans.push(Span::new(shown.into_iter().collect::<String>(), Tone::Primary)),
    }
    spans
}

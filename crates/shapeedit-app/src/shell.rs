//! Line-oriented command shell driving the editor.
//!
//! Each input line maps to one editor operation, the way toolbar buttons, panel
//! fields and pointer gestures would in a windowed front end.

use crate::config::AppConfig;
use crate::surface::HeadlessSurface;
use kurbo::Point;
use shapeedit_core::shapes::ParseShapeKindError;
use shapeedit_core::{Editor, PanelField, PanelInput, ParseInputError, ShapeId, ShapeKind};
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing or running a shell command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error(transparent)]
    Kind(#[from] ParseShapeKindError),
    #[error(transparent)]
    Input(#[from] ParseInputError),
    #[error("no shape #{0}")]
    UnknownShape(usize),
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(ShapeKind),
    /// Select by creation number (1-based).
    Select(usize),
    Click(Point),
    Clear,
    Set(PanelInput),
    Apply,
    Forward,
    Backward,
    Move(f64, f64),
    Resize(f64, f64),
    Show,
    List,
    Help,
    Quit,
}

fn number(raw: Option<&str>, command: &'static str) -> Result<f64, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument(command))?;
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(CommandError::Empty);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "add" => {
                let kind = parts.next().ok_or(CommandError::MissingArgument("add"))?;
                Command::Add(kind.parse()?)
            }
            "select" => {
                let raw = parts.next().ok_or(CommandError::MissingArgument("select"))?;
                let n = raw
                    .trim_start_matches('#')
                    .parse()
                    .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
                Command::Select(n)
            }
            "click" => {
                let x = number(parts.next(), "click")?;
                let y = number(parts.next(), "click")?;
                Command::Click(Point::new(x, y))
            }
            "clear" => Command::Clear,
            "set" => {
                let field: PanelField = parts
                    .next()
                    .ok_or(CommandError::MissingArgument("set"))?
                    .parse()?;
                // The rest of the line is the raw field text; may be empty.
                let value = parts.collect::<Vec<_>>().join(" ");
                Command::Set(PanelInput::parse(field, &value)?)
            }
            "apply" => Command::Apply,
            "forward" | "front" => Command::Forward,
            "backward" | "back" => Command::Backward,
            "move" => {
                let dx = number(parts.next(), "move")?;
                let dy = number(parts.next(), "move")?;
                Command::Move(dx, dy)
            }
            "resize" => {
                let width = number(parts.next(), "resize")?;
                let height = number(parts.next(), "resize")?;
                Command::Resize(width, height)
            }
            "show" => Command::Show,
            "list" | "ls" => Command::List,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

const HELP: &str = "\
add <rectangle|circle|triangle>   create and select a shape
select <n>                        select shape number n
click <x> <y>                     click the surface
clear                             clear the selection
set <field> <value>               edit a panel field (fill, stroke, stroke-width,
                                  width, height, border, layer)
apply                             commit the panel onto the shape
forward | backward                change the shape's layer
move <dx> <dy>                    drag the selected shape
resize <w> <h>                    resize the selected shape
show                              print the panel
list                              print the surface
quit                              leave
";

/// Editor plus the bookkeeping needed to address shapes by number.
#[derive(Debug)]
pub struct Shell {
    editor: Editor<HeadlessSurface>,
    /// Shape ids in creation order.
    ids: Vec<ShapeId>,
}

impl Shell {
    pub fn new(config: &AppConfig) -> Self {
        let surface = HeadlessSurface::new(config.width, config.height, &config.background_color);
        Self {
            editor: Editor::new(surface),
            ids: Vec::new(),
        }
    }

    pub fn editor(&self) -> &Editor<HeadlessSurface> {
        &self.editor
    }

    /// Creation number (1-based) of a shape.
    fn number_of(&self, id: ShapeId) -> Option<usize> {
        self.ids.iter().position(|&i| i == id).map(|p| p + 1)
    }

    /// Run one command, writing its response to `out`.
    ///
    /// Returns `Ok(false)` when the shell should stop.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<bool, CommandError> {
        match command {
            Command::Add(kind) => {
                let id = self.editor.add_shape(kind);
                self.ids.push(id);
                write_line(out, format_args!("added {} #{}", kind, self.ids.len()));
            }
            Command::Select(n) => {
                let id = n
                    .checked_sub(1)
                    .and_then(|i| self.ids.get(i))
                    .copied()
                    .ok_or(CommandError::UnknownShape(n))?;
                self.editor.select(id);
                write_line(out, format_args!("selected #{}", n));
            }
            Command::Click(point) => match self.editor.click(point) {
                Some(id) => {
                    let n = self.number_of(id).unwrap_or(0);
                    write_line(out, format_args!("selected #{}", n));
                }
                None => write_line(out, format_args!("nothing selected")),
            },
            Command::Clear => {
                self.editor.clear_selection();
                write_line(out, format_args!("nothing selected"));
            }
            Command::Set(input) => {
                if !self.editor.set_input(input) {
                    write_line(out, format_args!("nothing selected"));
                }
            }
            Command::Apply => {
                if self.editor.apply() {
                    self.show(out);
                } else {
                    write_line(out, format_args!("nothing applied"));
                }
            }
            Command::Forward => {
                let moved = self.editor.bring_forward();
                self.layer_result(moved, out);
            }
            Command::Backward => {
                let moved = self.editor.send_backward();
                self.layer_result(moved, out);
            }
            Command::Move(dx, dy) => {
                if !self.editor.move_selected(dx, dy) {
                    write_line(out, format_args!("nothing selected"));
                }
            }
            Command::Resize(width, height) => {
                if self.editor.resize_selected(width, height) {
                    self.show(out);
                } else {
                    write_line(out, format_args!("nothing selected"));
                }
            }
            Command::Show => self.show(out),
            Command::List => {
                let text = self.editor.scene().visuals().render_text();
                if text.is_empty() {
                    write_line(out, format_args!("(empty)"));
                } else {
                    write_text(out, &text);
                }
            }
            Command::Help => write_text(out, HELP),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn layer_result(&self, moved: bool, out: &mut impl Write) {
        match self.editor.draft() {
            Some(draft) if moved => write_line(out, format_args!("layer {}", draft.layer_index)),
            Some(_) => write_line(out, format_args!("already at the edge")),
            None => write_line(out, format_args!("nothing selected")),
        }
    }

    /// Print the panel's current draft.
    fn show(&self, out: &mut impl Write) {
        let Some(draft) = self.editor.draft() else {
            write_line(out, format_args!("nothing selected"));
            return;
        };
        let n = self
            .editor
            .scene()
            .selected_id()
            .and_then(|id| self.number_of(id))
            .unwrap_or(0);
        write_line(
            out,
            format_args!(
                "#{} fill {} stroke {} stroke-width {} width {} height {} border {} layer {}",
                n,
                draft.fill,
                draft.stroke,
                draft.stroke_width,
                draft.width,
                draft.height,
                draft.border_style,
                draft.layer_index,
            ),
        );
    }
}

fn write_line(out: &mut impl Write, args: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{}", args) {
        log::warn!("Failed to write shell output: {}", e);
    }
}

fn write_text(out: &mut impl Write, text: &str) {
    if let Err(e) = out.write_all(text.as_bytes()) {
        log::warn!("Failed to write shell output: {}", e);
    }
}

/// Read commands from `input` until EOF or `quit`.
///
/// Command errors are reported and skipped; only I/O errors end the loop early.
pub fn run(config: &AppConfig, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    let mut shell = Shell::new(config);
    log::info!(
        "{}: {}x{} surface, background {}",
        config.title,
        config.width,
        config.height,
        config.background_color
    );

    write!(output, "{}", config.prompt)?;
    output.flush()?;
    for line in input.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match line.parse::<Command>() {
                Ok(command) => {
                    log::debug!("Command: {:?}", command);
                    match shell.execute(command, &mut output) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(e) => {
                            log::error!("{}", e);
                            writeln!(output, "error: {}", e)?;
                        }
                    }
                }
                Err(e) => {
                    log::error!("{}", e);
                    writeln!(output, "error: {}", e)?;
                }
            }
        }
        write!(output, "{}", config.prompt)?;
        output.flush()?;
    }
    log::info!("Shell closed with {} shape(s)", shell.editor().scene().len());
    Ok(())
}

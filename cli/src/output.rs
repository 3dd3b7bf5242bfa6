use std::io::Write;

use termcolor::{self, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{event, Level};

use base::{ClockFace, KeyCode};
use pages::RegionUpdate;

fn get_colour_choice() -> termcolor::ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Writes what the programs display to standard output, in colour
/// when that is a terminal.
pub(crate) struct TerminalWriter {
    stream: StandardStream,
}

impl TerminalWriter {
    pub(crate) fn new() -> TerminalWriter {
        TerminalWriter {
            stream: StandardStream::stdout(get_colour_choice()),
        }
    }

    fn set_colour(&mut self, fg: Color, bold: bool) -> Result<(), std::io::Error> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(fg)).set_bold(bold);
        self.stream.set_color(&spec)
    }

    pub(crate) fn write_face(&mut self, face: &ClockFace) -> Result<(), std::io::Error> {
        self.set_colour(Color::Cyan, false)?;
        write!(self.stream, "{} {} {}", face.day, face.month, face.year)?;
        self.stream.reset()?;
        write!(self.stream, "  ")?;
        self.set_colour(Color::Yellow, true)?;
        write!(self.stream, "{}:{}:{}", face.hour, face.minute, face.second)?;
        self.stream.reset()?;
        writeln!(self.stream)?;
        self.stream.flush()
    }

    pub(crate) fn write_update(
        &mut self,
        code: KeyCode,
        update: &RegionUpdate,
    ) -> Result<(), std::io::Error> {
        self.set_colour(Color::Green, false)?;
        write!(self.stream, "{code:>3}")?;
        self.stream.reset()?;
        match update {
            RegionUpdate::SetTitle { text } => {
                write!(self.stream, " #{}: ", update.region())?;
                self.set_colour(Color::White, true)?;
                write!(self.stream, "{text}")?;
                self.stream.reset()?;
                writeln!(self.stream)?;
            }
            other => writeln!(self.stream, " {other}")?,
        }
        self.stream.flush()
    }

    pub(crate) fn disconnect(&mut self) {
        if let Err(e) = self.stream.reset() {
            event!(Level::ERROR, "Failed to reset terminal: {}", e);
        }
    }
}

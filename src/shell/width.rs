use std::io::{self, Write};
use std::sync::Arc;

use super::{Lesson, ShellError};
use crate::channels::{ManualViewport, TerminalViewport, Viewport, WidthReadout};

const RESIZE_USAGE: &str = "resize <cols> <rows>";

/// Window width tracked through a resize subscription that is acquired on
/// mount and released on unmount.
pub struct WidthLesson {
    viewport: Arc<dyn Viewport>,
    /// Present when resizes are simulated instead of coming from the terminal.
    manual: Option<Arc<ManualViewport>>,
    readout: Option<WidthReadout>,
}

impl WidthLesson {
    /// Follow the controlling terminal.
    pub fn terminal() -> io::Result<Self> {
        let viewport: Arc<dyn Viewport> = Arc::new(TerminalViewport::start()?);
        Ok(Self::mount(viewport, None))
    }

    /// Start at `cols x rows` and resize only through the `resize` command.
    pub fn simulated(cols: u16, rows: u16) -> Self {
        let manual = Arc::new(ManualViewport::new(cols, rows));
        let viewport: Arc<dyn Viewport> = manual.clone();
        Self::mount(viewport, Some(manual))
    }

    fn mount(viewport: Arc<dyn Viewport>, manual: Option<Arc<ManualViewport>>) -> Self {
        let readout = Some(WidthReadout::mount(viewport.as_ref()));
        Self {
            viewport,
            manual,
            readout,
        }
    }

    /// Width shown by the mounted readout.
    pub fn width(&self) -> Option<u16> {
        self.readout.as_ref().and_then(WidthReadout::width)
    }

    pub fn is_mounted(&self) -> bool {
        self.readout.is_some()
    }
}

impl Lesson for WidthLesson {
    fn title(&self) -> &'static str {
        "useEffect: window width"
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (RESIZE_USAGE, "simulate a resize (with --simulate)"),
            ("unmount", "drop the readout and its listener"),
            ("mount", "mount the readout again"),
            ("show", "print the current width"),
        ]
    }

    fn render(&mut self, out: &mut dyn Write) -> io::Result<()> {
        match &self.readout {
            Some(readout) => match readout.width() {
                Some(width) => writeln!(out, "Window width: {width}")?,
                None => writeln!(out, "Window width: unknown")?,
            },
            None => writeln!(out, "(readout unmounted)")?,
        }
        if let Some(manual) = &self.manual {
            writeln!(out, "resize listeners: {}", manual.listener_count())?;
        }
        Ok(())
    }

    fn execute(
        &mut self,
        command: &str,
        args: &[&str],
        _out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        match command {
            "resize" => {
                let Some(manual) = &self.manual else {
                    return Err(ShellError::Usage("resize needs --simulate"));
                };
                let [cols, rows] = args else {
                    return Err(ShellError::Usage(RESIZE_USAGE));
                };
                let cols = cols.parse().map_err(|_| ShellError::Usage(RESIZE_USAGE))?;
                let rows = rows.parse().map_err(|_| ShellError::Usage(RESIZE_USAGE))?;
                manual.resize(cols, rows);
            }
            "unmount" => self.readout = None,
            "mount" => {
                if self.readout.is_none() {
                    self.readout = Some(WidthReadout::mount(self.viewport.as_ref()));
                }
            }
            "show" => {}
            _ => return Err(ShellError::UnknownCommand(command.to_string())),
        }
        Ok(())
    }
}

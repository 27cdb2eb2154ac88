use super::{FormInputs, Notifier, Renderer, TriggerButton};
use crate::dispatcher::AnalysisResult;
use crate::request::ImageFile;
use anyhow::{Result, anyhow};
use std::io::{self, Write};
use std::sync::Mutex;

/// Form whose values were fixed on the command line.
pub struct StaticForm {
    name: String,
    image: Option<ImageFile>,
}

impl StaticForm {
    pub fn new(name: impl Into<String>, image: Option<ImageFile>) -> Self {
        Self {
            name: name.into(),
            image,
        }
    }
}

impl FormInputs for StaticForm {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn image(&self) -> Option<ImageFile> {
        self.image.clone()
    }
}

pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub disabled: bool,
    pub label: String,
}

/// Status line standing in for the analyze button.
///
/// The label is echoed to stderr whenever it changes while the button is
/// disabled, which is how the busy state shows up in a terminal.
pub struct StatusButton<W: Write + Send> {
    state: Mutex<ButtonState>,
    out: Mutex<W>,
}

impl StatusButton<io::Stderr> {
    pub fn stderr(label: &str) -> Self {
        Self::new(label, io::stderr())
    }
}

impl<W: Write + Send> StatusButton<W> {
    pub fn new(label: &str, out: W) -> Self {
        Self {
            state: Mutex::new(ButtonState {
                disabled: false,
                label: label.to_string(),
            }),
            out: Mutex::new(out),
        }
    }

    pub fn state(&self) -> Option<ButtonState> {
        self.state.lock().ok().map(|s| s.clone())
    }

    fn echo(&self, label: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", label);
        }
    }
}

impl<W: Write + Send> TriggerButton for StatusButton<W> {
    fn set_disabled(&self, disabled: bool) {
        let echo = match self.state.lock() {
            Ok(mut state) => {
                state.disabled = disabled;
                disabled.then(|| state.label.clone())
            }
            Err(_) => None,
        };
        if let Some(label) = echo {
            self.echo(&label);
        }
    }

    fn set_label(&self, label: &str) {
        let echo = match self.state.lock() {
            Ok(mut state) => {
                state.label = label.to_string();
                state.disabled
            }
            Err(_) => false,
        };
        if echo {
            self.echo(label);
        }
    }
}

/// Writes the title followed by the pretty-printed analysis.
pub struct JsonRenderer<W: Write + Send> {
    out: Mutex<W>,
}

impl JsonRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.out
            .into_inner()
            .map_err(|_| anyhow!("renderer output lock poisoned"))
    }
}

impl<W: Write + Send> Renderer for JsonRenderer<W> {
    fn render(&self, result: &AnalysisResult, title: &str) -> Result<()> {
        let body = serde_json::to_string_pretty(result)?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| anyhow!("renderer output lock poisoned"))?;
        writeln!(out, "{}", title)?;
        writeln!(out, "{}", body)?;
        out.flush()?;
        Ok(())
    }
}

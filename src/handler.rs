use crate::dispatcher::AnalysisSource;
use crate::logging::*;
use crate::messages::{Locale, Messages};
use crate::ui::{TriggerButton, UiHandles};


/// How a click ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Neither a name nor an image was given; nothing was sent.
    Rejected,
    /// The request or the rendering failed; the user has been told.
    Failed,
    Rendered,
}

pub fn display_title(messages: &Messages, name: &str, has_image: bool) -> String {
    match (name.is_empty(), has_image) {
        (false, true) => messages.combined_title(name),
        (true, true) => messages.image_title.to_string(),
        _ => name.to_string(),
    }
}

/// Keeps the trigger disabled while alive and restores it once on drop,
/// including when the click future is dropped mid-flight.
struct BusyGuard<'a> {
    button: &'a dyn TriggerButton,
    idle_label: &'a str,
}

impl<'a> BusyGuard<'a> {
    fn engage(button: &'a dyn TriggerButton, messages: &'a Messages) -> Self {
        button.set_label(messages.busy_label);
        button.set_disabled(true);
        BusyGuard {
            button,
            idle_label: messages.idle_label,
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.button.set_label(self.idle_label);
        self.button.set_disabled(false);
    }
}

pub struct AnalyzeHandler<S> {
    source: S,
    ui: UiHandles,
    messages: &'static Messages,
}

impl<S: AnalysisSource> AnalyzeHandler<S> {
    pub fn new(source: S, ui: UiHandles, locale: Locale) -> Self {
        Self {
            source,
            ui,
            messages: locale.messages(),
        }
    }

    pub async fn on_click(&self) -> Outcome {
        let log = DEFAULT.new(o!("function" => "on_click"));
        let name = self.ui.form.name().trim().to_string();
        let image = self.ui.form.image();

        if name.is_empty() && image.is_none() {
            info!(log, "nothing to analyze");
            self.ui.notifier.alert(self.messages.missing_input);
            return Outcome::Rejected;
        }

        let has_image = image.is_some();
        info!(log, "analyzing"; "name" => %name, "has_image" => has_image);

        let result = {
            let _busy = BusyGuard::engage(self.ui.button.as_ref(), self.messages);
            self.source.fetch_analysis_data(&name, image).await
        };

        let Some(result) = result else {
            return Outcome::Failed;
        };

        let title = display_title(self.messages, &name, has_image);
        match self.ui.renderer.render(&result, &title) {
            Ok(()) => Outcome::Rendered,
            Err(err) => {
                error!(log, "failed to render analysis"; "error" => %err);
                self.ui.notifier.alert(self.messages.render_failed);
                Outcome::Failed
            }
        }
    }
}

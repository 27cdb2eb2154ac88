use crate::dispatcher::{AnalysisResult, AnalysisSource};
use crate::request::ImageFile;
use crate::ui::{FormInputs, Notifier, Renderer, TriggerButton, UiHandles};
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonEvent {
    Disabled(bool),
    Label(String),
}

pub struct RecordingButton {
    pub events: Mutex<Vec<ButtonEvent>>,
    pub disabled: Mutex<bool>,
    pub label: Mutex<String>,
}

impl RecordingButton {
    pub fn new(label: &str) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            disabled: Mutex::new(false),
            label: Mutex::new(label.to_string()),
        }
    }

    pub fn events(&self) -> Vec<ButtonEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn snapshot(&self) -> (bool, String) {
        (
            *self.disabled.lock().unwrap(),
            self.label.lock().unwrap().clone(),
        )
    }
}

impl TriggerButton for RecordingButton {
    fn set_disabled(&self, disabled: bool) {
        *self.disabled.lock().unwrap() = disabled;
        self.events.lock().unwrap().push(ButtonEvent::Disabled(disabled));
    }

    fn set_label(&self, label: &str) {
        *self.label.lock().unwrap() = label.to_string();
        self.events
            .lock()
            .unwrap()
            .push(ButtonEvent::Label(label.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub rendered: Mutex<Vec<(AnalysisResult, String)>>,
    pub fail: bool,
}

impl RecordingRenderer {
    pub fn failing() -> Self {
        Self {
            rendered: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn rendered(&self) -> Vec<(AnalysisResult, String)> {
        self.rendered.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, result: &AnalysisResult, title: &str) -> Result<()> {
        if self.fail {
            bail!("render target is gone");
        }
        self.rendered
            .lock()
            .unwrap()
            .push((result.clone(), title.to_string()));
        Ok(())
    }
}

pub struct FixedForm {
    pub name: String,
    pub image: Option<ImageFile>,
}

impl FormInputs for FixedForm {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn image(&self) -> Option<ImageFile> {
        self.image.clone()
    }
}

/// Source that records what it was asked and the button state at that moment.
pub struct FakeSource {
    pub answer: Option<AnalysisResult>,
    pub button: Arc<RecordingButton>,
    pub calls: Mutex<Vec<(String, Option<ImageFile>, (bool, String))>>,
}

impl FakeSource {
    pub fn new(answer: Option<AnalysisResult>, button: Arc<RecordingButton>) -> Self {
        Self {
            answer,
            button,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, Option<ImageFile>, (bool, String))> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisSource for FakeSource {
    async fn fetch_analysis_data(
        &self,
        name: &str,
        image: Option<ImageFile>,
    ) -> Option<AnalysisResult> {
        let state = self.button.snapshot();
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), image, state));
        tokio::task::yield_now().await;
        self.answer.clone()
    }
}

pub struct Fixture {
    pub button: Arc<RecordingButton>,
    pub notifier: Arc<RecordingNotifier>,
    pub renderer: Arc<RecordingRenderer>,
}

impl Fixture {
    pub fn new(idle_label: &str) -> Self {
        Self::with_renderer(idle_label, RecordingRenderer::default())
    }

    pub fn with_renderer(idle_label: &str, renderer: RecordingRenderer) -> Self {
        Self {
            button: Arc::new(RecordingButton::new(idle_label)),
            notifier: Arc::new(RecordingNotifier::default()),
            renderer: Arc::new(renderer),
        }
    }

    pub fn handles(&self, name: &str, image: Option<ImageFile>) -> UiHandles {
        UiHandles {
            form: Arc::new(FixedForm {
                name: name.to_string(),
                image,
            }),
            button: self.button.clone(),
            notifier: self.notifier.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

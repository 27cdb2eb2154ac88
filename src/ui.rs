//! Handles to the page elements the click handler works with.
//!
//! The handler receives these at construction time instead of reaching for
//! globals, so any front end (terminal, browser binding, tests) can supply them.

use crate::dispatcher::AnalysisResult;
use crate::request::ImageFile;
use anyhow::Result;
use std::sync::Arc;

pub mod terminal;

pub trait FormInputs: Send + Sync {
    /// Raw text of the name input, untrimmed.
    fn name(&self) -> String;
    fn image(&self) -> Option<ImageFile>;
}

pub trait TriggerButton: Send + Sync {
    fn set_disabled(&self, disabled: bool);
    fn set_label(&self, label: &str);
}

/// Blocking user-facing alert.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

pub trait Renderer: Send + Sync {
    fn render(&self, result: &AnalysisResult, title: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct UiHandles {
    pub form: Arc<dyn FormInputs>,
    pub button: Arc<dyn TriggerButton>,
    pub notifier: Arc<dyn Notifier>,
    pub renderer: Arc<dyn Renderer>,
}

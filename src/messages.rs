//! User-facing strings in the language of the page.

use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// Persian, the default page language.
    #[default]
    Fa,
    En,
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fa" | "fa-ir" | "persian" => Ok(Locale::Fa),
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            other => Err(anyhow::anyhow!("Unsupported locale: {}", other)),
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Fa => write!(f, "fa"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::Fa => &FA,
            Locale::En => &EN,
        }
    }
}

#[derive(Debug)]
pub struct Messages {
    pub missing_input: &'static str,
    pub fetch_failed: &'static str,
    pub render_failed: &'static str,
    pub busy_label: &'static str,
    pub idle_label: &'static str,
    pub image_title: &'static str,
    combined_title_prefix: &'static str,
    combined_title_suffix: &'static str,
}

impl Messages {
    /// Title for an analysis requested with both a name and an image.
    pub fn combined_title(&self, name: &str) -> String {
        format!(
            "{}{}{}",
            self.combined_title_prefix, name, self.combined_title_suffix
        )
    }
}

static FA: Messages = Messages {
    missing_input: "لطفاً نام محصول یا موضوع را وارد کنید یا یک تصویر انتخاب نمایید.",
    fetch_failed: "خطا در دریافت اطلاعات تحلیل. لطفاً دوباره تلاش کنید.",
    render_failed: "خطا در نمایش نتیجه تحلیل.",
    busy_label: "در حال تحلیل...",
    idle_label: "تحلیل کن",
    image_title: "تحلیل تصویر محصول",
    combined_title_prefix: "تحلیل: ",
    combined_title_suffix: " (از تصویر)",
};

static EN: Messages = Messages {
    missing_input: "Please enter a product name or topic, or choose an image.",
    fetch_failed: "Failed to fetch the analysis. Please try again.",
    render_failed: "Failed to display the analysis.",
    busy_label: "Analyzing...",
    idle_label: "Analyze",
    image_title: "Product image analysis",
    combined_title_prefix: "Analysis: ",
    combined_title_suffix: " (from image)",
};

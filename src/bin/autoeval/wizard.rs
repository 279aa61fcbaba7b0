//! Interactive collection of settings that were not given on the command
//! line or in the config file.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

/// Source of answers for missing settings.
pub trait Prompter {
    /// Asks for a text value. `default` is offered when present.
    fn text(&mut self, prompt: &str, default: Option<&str>) -> anyhow::Result<String>;

    fn float(&mut self, prompt: &str, default: f32) -> anyhow::Result<f32>;
}

/// Terminal prompts.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn text(&mut self, prompt: &str, default: Option<&str>) -> anyhow::Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn float(&mut self, prompt: &str, default: f32) -> anyhow::Result<f32> {
        Ok(Input::<f32>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_text()?)
    }
}

/// Takes every default without asking; fails where there is none.
pub struct DefaultsOnly;

impl Prompter for DefaultsOnly {
    fn text(&mut self, prompt: &str, default: Option<&str>) -> anyhow::Result<String> {
        default
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("`{prompt}` is required when running non-interactively"))
    }

    fn float(&mut self, _prompt: &str, default: f32) -> anyhow::Result<f32> {
        Ok(default)
    }
}

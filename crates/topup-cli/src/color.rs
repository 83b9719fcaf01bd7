use clap::ValueEnum;
use color_eyre::eyre::Result;

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Color {
    No,
    Yes,
    Auto,
}

impl Color {
    /// Whether color output is enabled, resolving `Auto` against stdout
    pub fn is_enabled(self) -> bool {
        match self {
            Color::No => false,
            Color::Yes => true,
            Color::Auto => supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }
}

/// Installs color_eyre, with a blank theme when colors are disabled
pub fn install_color_eyre(color: Color) -> Result<()> {
    if color.is_enabled() {
        color_eyre::install()
    } else {
        // Use an empty theme to disable error coloring
        color_eyre::config::HookBuilder::new()
            .theme(color_eyre::config::Theme::new())
            .install()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_choices() {
        assert!(Color::Yes.is_enabled());
        assert!(!Color::No.is_enabled());
    }
}

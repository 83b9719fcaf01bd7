use clap::ValueEnum;

use crate::command::Cli;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::upper_case_acronyms)]
pub(crate) enum Output {
    JSON,
    YAML,
    None,
}

pub enum CommandOutput {
    Plain(String),
    Object(Box<dyn erased_serde::Serialize>),
}
pub type CommandResult = color_eyre::eyre::Result<CommandOutput>;

impl From<&str> for CommandOutput {
    fn from(text: &str) -> Self {
        CommandOutput::Plain(text.to_owned())
    }
}
impl From<String> for CommandOutput {
    fn from(text: String) -> Self {
        CommandOutput::Plain(text)
    }
}

pub struct RenderConfig {
    pub output: Output,
    pub quiet: bool,
}

impl RenderConfig {
    pub fn new(cli: &Cli) -> Self {
        Self {
            output: cli.output,
            quiet: cli.quiet,
        }
    }

    pub fn render_result(&self, result: CommandResult) -> color_eyre::eyre::Result<()> {
        if self.quiet || self.output == Output::None {
            // Errors still reach the caller
            return result.map(|_| ());
        }

        match result {
            // Errors will be passed through to the caller, and rendered by the main function
            Err(e) => Err(e),

            Ok(CommandOutput::Plain(text)) => {
                println!("{}", text);
                Ok(())
            }

            Ok(CommandOutput::Object(obj)) => {
                let text = self.serialize(&*obj)?;
                print!("{}", text);
                Ok(())
            }
        }
    }

    fn serialize(&self, obj: &dyn erased_serde::Serialize) -> color_eyre::eyre::Result<String> {
        Ok(match self.output {
            Output::JSON => {
                let mut json = serde_json::to_string_pretty(obj)?;
                // Yaml serialization adds a newline at the end, so we do the same here for
                // consistency
                json.push('\n');
                json
            }
            Output::YAML => serde_yaml::to_string(obj)?,
            Output::None => String::new(),
        })
    }
}

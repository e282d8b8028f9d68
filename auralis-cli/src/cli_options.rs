use auralis_common::pretty_util::Format;

/// Options threaded through the CLI driver into the engine call and the
/// result renderer. A thin pass-through — no engine-specific logic lives
/// here (§1: the CLI stays a thin collaborator over the core).
#[derive(Debug, Clone)]
pub struct CliOptions {
    debug: bool,
    format: Format,
}

impl CliOptions {
    pub fn new(debug: bool, format: Format) -> Self {
        CliOptions { debug, format }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions::new(false, Format::Table)
    }
}

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// 1-based card number as shown on screen.
    Open(usize),
    /// 1-based breadcrumb segment as shown on screen.
    Crumb(usize),
    /// Replaces the filter; empty clears it.
    Filter(String),
    Back,
    Colleges,
    Help,
    Redraw,
    Quit,
    Unknown(String),
}

/// Commands start with `:`. Everything else is search text, the way a
/// search box would treat it, so names, years and single letters can all
/// be searched for.
pub fn parse_input(line: &str) -> InputCommand {
    let line = line.trim();
    if line.is_empty() {
        return InputCommand::Redraw;
    }
    if let Some(text) = line.strip_prefix('/') {
        return InputCommand::Filter(text.trim().to_string());
    }
    let Some(command) = line.strip_prefix(':') else {
        return InputCommand::Filter(line.to_string());
    };

    match command.trim() {
        "q" | "quit" => InputCommand::Quit,
        "b" | "back" => InputCommand::Back,
        "c" | "colleges" => InputCommand::Colleges,
        "h" | "help" | "?" => InputCommand::Help,
        other => {
            let (crumb, digits) = match other.strip_prefix('c') {
                Some(digits) => (true, digits),
                None => (false, other),
            };
            match digits.parse::<usize>() {
                Ok(number) if number > 0 && crumb => InputCommand::Crumb(number),
                Ok(number) if number > 0 => InputCommand::Open(number),
                _ => InputCommand::Unknown(line.to_string()),
            }
        }
    }
}

pub const HELP: &str = "\
Commands:
  :<n>       open card n
  :c<n>      follow breadcrumb n
  :b         back one level
  :c         jump to the college list
  :q         quit
Any other text filters the list; / <text> does too, and a lone / clears it.";

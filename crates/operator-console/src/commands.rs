//! Console command parsing

/// One line of operator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fill the buffer with a random window
    Generate,
    /// Submit the buffer and render the result
    Predict,
    /// Render sensor trends of the buffer
    Show,
    /// Select the engine identifier
    Engine(u64),
    /// Probe gateway liveness
    Health,
    Help,
    Quit,
}

impl Command {
    /// Parse a command line, returning a usage hint on failure
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err("Type `help` for a list of commands".to_string());
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "generate" | "g" => Command::Generate,
            "predict" | "p" => Command::Predict,
            "show" | "s" => Command::Show,
            "health" => Command::Health,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            "engine" | "e" => {
                let id = parts
                    .next()
                    .ok_or_else(|| "Usage: engine <id>".to_string())?
                    .parse::<u64>()
                    .map_err(|_| "Engine ID must be a positive integer".to_string())?;
                Command::Engine(id)
            }
            other => return Err(format!("Unknown command `{}`; type `help`", other)),
        };

        if parts.next().is_some() {
            return Err(format!("Too many arguments for `{}`", name));
        }
        Ok(command)
    }

    /// Help text listing every command
    pub fn help() -> &'static str {
        "Commands:\n  \
         generate (g)     generate a random 50x17 sensor window\n  \
         show (s)         show sensor trends of the current window\n  \
         predict (p)      predict RUL for the current window\n  \
         engine <id>      select engine ID (1-999)\n  \
         health           check that the gateway is running\n  \
         help             show this help\n  \
         quit (q)         leave the console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("generate"), Ok(Command::Generate));
        assert_eq!(Command::parse("  P "), Ok(Command::Predict));
        assert_eq!(Command::parse("engine 42"), Ok(Command::Engine(42)));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("engine").is_err());
        assert!(Command::parse("engine -1").is_err());
        assert!(Command::parse("predict now").is_err());
        assert!(Command::parse("train").unwrap_err().contains("Unknown command"));
    }
}

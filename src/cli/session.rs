/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Navigate to a route fragment.
    Go(String),
    /// Click the update button.
    Update { quantity: String, address: String },
    /// Press Enter in the quantity field.
    Enter { quantity: String, address: String },
    Back,
    Cart,
    Help,
    Quit,
}

pub const HELP: &str = "\
go [fragment]             navigate: '' (index), item/<id>, summary/<id>
update <qty> [address]    submit the order form with the update button
enter <qty> [address]     submit the order form with the Enter key
back                      close the order summary
cart                      show the cart lines
help                      show this help
quit                      leave the store";

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "go" => Ok(SessionCommand::Go(rest.to_string())),
            "update" | "enter" => {
                let (quantity, address) = match rest.split_once(char::is_whitespace) {
                    Some((quantity, address)) => (quantity, address.trim()),
                    None => (rest, ""),
                };
                let quantity = quantity.to_string();
                let address = address.to_string();
                Ok(if verb == "update" {
                    SessionCommand::Update { quantity, address }
                } else {
                    SessionCommand::Enter { quantity, address }
                })
            }
            "back" => Ok(SessionCommand::Back),
            "cart" => Ok(SessionCommand::Cart),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            "" => Err("Type a command, or 'help'".to_string()),
            other => Err(format!("Unknown command '{}', type 'help'", other)),
        }
    }
}

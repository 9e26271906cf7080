//! Line commands understood by the terminal shell

use std::path::PathBuf;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    /// Plain text appended to the buffer
    Append(String),
    Run,
    Generate,
    Refactor,
    Copy,
    Clear,
    Download,
    /// `:lang <id>`
    Language(String),
    Show,
    /// `:load <file>` replaces the buffer with a file's contents
    Load(PathBuf),
    /// `:open <path>` navigates to a page
    Open(String),
    Login {
        email: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    Logout,
    Width(u32),
    Dismiss,
    Help,
    Quit,
    /// A `:` command that could not be parsed, with the reason
    Invalid(String),
}

pub const HELP: &str = "\
Plain lines are appended to the buffer. Commands:
  :run                 run the buffer
  :generate            describe code to generate (login required)
  :refactor            refactor the buffer (login required)
  :copy                copy the buffer to the clipboard
  :clear               empty code and output
  :download            save the buffer as a file
  :lang <id>           switch language
  :show                print buffer and output
  :load <file>         replace the buffer with a file
  :open <path>         navigate (/, /login, /register, /accounts, /<lang>)
  :login <email> <password>
  :register <username> <email> <password>
  :logout
  :width <px>          set viewport width
  :dismiss             dismiss the last notification
  :quit";

impl LineCommand {
    pub fn parse(line: &str) -> LineCommand {
        let Some(command) = line.strip_prefix(':') else {
            return LineCommand::Append(line.to_string());
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match (name, args.as_slice()) {
            ("run", []) => LineCommand::Run,
            ("generate", []) => LineCommand::Generate,
            ("refactor", []) => LineCommand::Refactor,
            ("copy", []) => LineCommand::Copy,
            ("clear", []) => LineCommand::Clear,
            ("download", []) => LineCommand::Download,
            ("show", []) => LineCommand::Show,
            ("logout", []) => LineCommand::Logout,
            ("dismiss", []) => LineCommand::Dismiss,
            ("help", []) => LineCommand::Help,
            ("quit" | "q", []) => LineCommand::Quit,
            ("lang", [id]) => LineCommand::Language(id.to_lowercase()),
            ("load", [path]) => LineCommand::Load(PathBuf::from(path)),
            ("open", [path]) => LineCommand::Open(path.to_string()),
            ("login", [email, password]) => LineCommand::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("register", [username, email, password]) => LineCommand::Register {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
            ("width", [px]) => match px.parse() {
                Ok(px) => LineCommand::Width(px),
                Err(_) => LineCommand::Invalid(format!("not a width: {}", px)),
            },
            ("", _) => LineCommand::Invalid("empty command".to_string()),
            (name, _) => LineCommand::Invalid(format!("unknown or malformed command :{}", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_append() {
        assert_eq!(
            LineCommand::parse("print('hi')"),
            LineCommand::Append("print('hi')".to_string())
        );
        assert_eq!(LineCommand::parse(""), LineCommand::Append(String::new()));
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(
            LineCommand::parse(":lang Rust"),
            LineCommand::Language("rust".to_string())
        );
        assert_eq!(LineCommand::parse(":width 800"), LineCommand::Width(800));
        assert_eq!(
            LineCommand::parse(":login a@b.co secret123"),
            LineCommand::Login {
                email: "a@b.co".to_string(),
                password: "secret123".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_commands() {
        assert!(matches!(LineCommand::parse(":lang"), LineCommand::Invalid(_)));
        assert!(matches!(LineCommand::parse(":width wide"), LineCommand::Invalid(_)));
        assert!(matches!(LineCommand::parse(":frobnicate"), LineCommand::Invalid(_)));
        assert!(matches!(LineCommand::parse(":"), LineCommand::Invalid(_)));
    }
}

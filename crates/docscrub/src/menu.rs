// ABOUTME: Menu tokens (0..4) accepted by the CLI and their mapping onto ProcessOptions.
// ABOUTME: Turns a set of tokens into a Plan: exit, content only, or one process call.

use std::collections::BTreeSet;
use std::fmt;

use crate::options::ProcessOptions;

/// One entry of the options menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MenuChoice {
    Clean,
    RemoveTables,
    SeparateTables,
    SaveContent,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Clean,
        MenuChoice::RemoveTables,
        MenuChoice::SeparateTables,
        MenuChoice::SaveContent,
        MenuChoice::Exit,
    ];

    pub fn token(self) -> &'static str {
        match self {
            MenuChoice::Clean => "0",
            MenuChoice::RemoveTables => "1",
            MenuChoice::SeparateTables => "2",
            MenuChoice::SaveContent => "3",
            MenuChoice::Exit => "4",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuChoice::Clean => "Just cleaned HTML content",
            MenuChoice::RemoveTables => "Remove tables",
            MenuChoice::SeparateTables => "Separate tables (also removes tables)",
            MenuChoice::SaveContent => "Save content",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.token() == token.trim())
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.token(), self.description())
    }
}

/// Printable menu listing every choice.
pub fn render_menu() -> String {
    let mut out = String::from("Available options:\n");
    for choice in MenuChoice::ALL {
        out.push_str(&choice.to_string());
        out.push('\n');
    }
    out
}

/// Tokens entered by the user, split into known choices and leftovers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub choices: BTreeSet<MenuChoice>,
    pub unknown: Vec<String>,
}

/// What the CLI should do for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Exit,
    Nothing,
    ContentOnly,
    Process(ProcessOptions),
}

/// Parses tokens; each item may itself hold several whitespace-separated tokens.
pub fn parse_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Selection {
    let mut selection = Selection::default();
    for token in tokens.into_iter().flat_map(str::split_whitespace) {
        match MenuChoice::from_token(token) {
            Some(choice) => {
                selection.choices.insert(choice);
            }
            None => selection.unknown.push(token.to_string()),
        }
    }
    selection
}

impl Selection {
    pub fn contains(&self, choice: MenuChoice) -> bool {
        self.choices.contains(&choice)
    }

    pub fn plan(&self) -> Plan {
        if self.contains(MenuChoice::Exit) {
            return Plan::Exit;
        }
        if self.choices.is_empty() {
            return Plan::Nothing;
        }
        if self.choices.len() == 1 && self.contains(MenuChoice::SaveContent) {
            return Plan::ContentOnly;
        }

        let separate_tables = self.contains(MenuChoice::SeparateTables);
        Plan::Process(ProcessOptions {
            remove_tables: self.contains(MenuChoice::RemoveTables) && !separate_tables,
            separate_tables,
            separate_content: self.contains(MenuChoice::SaveContent),
            wrap_images: self.contains(MenuChoice::Clean),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_only() {
        let plan = parse_tokens(["0"]).plan();
        assert_eq!(
            plan,
            Plan::Process(ProcessOptions {
                remove_tables: false,
                separate_tables: false,
                separate_content: false,
                wrap_images: true,
            })
        );
    }

    #[test]
    fn test_separate_wins_over_remove() {
        let Plan::Process(opts) = parse_tokens(["1 2"]).plan() else {
            panic!("expected a process plan");
        };
        assert!(opts.separate_tables);
        assert!(!opts.remove_tables);
        assert!(!opts.wrap_images);
    }

    #[test]
    fn test_table_tokens_alone_do_not_wrap_images() {
        for token in ["1", "2"] {
            let Plan::Process(opts) = parse_tokens([token]).plan() else {
                panic!("expected a process plan");
            };
            assert!(!opts.wrap_images);
        }
    }

    #[test]
    fn test_content_only() {
        assert_eq!(parse_tokens(["3"]).plan(), Plan::ContentOnly);
    }

    #[test]
    fn test_all_options_in_one_call() {
        let Plan::Process(opts) = parse_tokens(["0", "1", "2", "3"]).plan() else {
            panic!("expected a process plan");
        };
        assert!(opts.wrap_images && opts.separate_tables && opts.separate_content);
        assert!(!opts.remove_tables);
    }

    #[test]
    fn test_exit_short_circuits() {
        assert_eq!(parse_tokens(["0 3 4"]).plan(), Plan::Exit);
    }

    #[test]
    fn test_unknown_tokens_are_collected() {
        let selection = parse_tokens(["9 x 1"]);
        assert_eq!(selection.unknown, vec!["9".to_string(), "x".to_string()]);
        assert!(selection.contains(MenuChoice::RemoveTables));
        assert_eq!(parse_tokens(["", "  "]).plan(), Plan::Nothing);
    }

    #[test]
    fn test_menu_lists_every_token() {
        let menu = render_menu();
        for choice in MenuChoice::ALL {
            assert!(menu.contains(&format!("{}. ", choice.token())));
        }
    }
}

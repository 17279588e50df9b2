//! Interactive REPL over the university directory.
//!
//! Launch with `uni-directory repl`. Type `/help` for available commands,
//! Tab for completion.

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Config, Editor, Event, EventContext, EventHandler, Helper,
    KeyEvent, RepeatCount,
};

use uni_directory::UniversityDirectory;

use crate::api::{explore, ExploreParams};
use crate::render::{render_countries, render_detail, render_table};
use crate::types::ExploreResponse;

/// Available REPL commands.
const COMMANDS: &[(&str, &str)] = &[
    ("/search", "Search by name, city or program"),
    ("/show", "Show one university by slug"),
    ("/country", "Restrict to a country (or 'all')"),
    ("/gre", "GRE filter: yes, no or any"),
    ("/visa", "Visa risk filter: low, medium, high or any"),
    ("/program", "Program keyword filter (or 'any')"),
    ("/filters", "Show active filters"),
    ("/countries", "List countries with counts"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the REPL"),
];

/// REPL helper for tab completion.
struct DirectoryHelper {
    country_codes: Vec<String>,
}

impl Completer for DirectoryHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<16} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        // country code completion
        let parts: Vec<&str> = input.splitn(2, ' ').collect();
        let cmd = parts[0];
        let args = if parts.len() > 1 { parts[1] } else { "" };

        if cmd == "/country" && !args.contains(' ') {
            let prefix_start = input.len() - args.len();
            let matches: Vec<Pair> = self
                .country_codes
                .iter()
                .map(String::as_str)
                .chain(std::iter::once("all"))
                .filter(|c| c.starts_with(args))
                .map(|c| Pair {
                    display: c.to_string(),
                    replacement: format!("{c} "),
                })
                .collect();
            return Ok((prefix_start, matches));
        }

        Ok((pos, Vec::new()))
    }
}

impl Hinter for DirectoryHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for DirectoryHelper {}
impl Validator for DirectoryHelper {}
impl Helper for DirectoryHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Filters carried between commands.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplState {
    pub country: Option<String>,
    pub gre: Option<String>,
    pub visa: Option<String>,
    pub program: Option<String>,
}

impl ReplState {
    fn search_params(&self, query: &str) -> ExploreParams {
        ExploreParams {
            country: self.country.clone(),
            slug: None,
            q: Some(query.to_string()),
            gre: self.gre.clone(),
            visa: self.visa.clone(),
            program: self.program.clone(),
        }
    }
}

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    Print(String),
    Clear,
    Exit,
}

/// `any`/`all`/empty clear a filter.
fn filter_value(args: &str) -> Option<String> {
    match args {
        "" | "any" | "all" => None,
        value => Some(value.to_string()),
    }
}

/// Execute one input line.
pub fn execute_line(
    directory: &UniversityDirectory,
    state: &mut ReplState,
    line: &str,
) -> ReplAction {
    let line = line.trim();
    let input = line.strip_prefix('/').unwrap_or(line);
    if input.is_empty() {
        return ReplAction::Print(help_text());
    }

    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    match cmd {
        "exit" | "quit" => ReplAction::Exit,
        "help" | "h" | "?" => ReplAction::Print(help_text()),
        "clear" | "cls" => ReplAction::Clear,
        "search" | "s" => ReplAction::Print(cmd_search(directory, state, args)),
        "show" => ReplAction::Print(cmd_show(directory, state, args)),
        "countries" => ReplAction::Print(render_countries(&directory.countries())),
        "country" => {
            let value = filter_value(&args.to_lowercase());
            if let Some(code) = &value {
                if directory.catalog().get(code).is_none() {
                    return ReplAction::Print(format!(
                        "  Unknown country '{code}'. Try /countries."
                    ));
                }
            }
            state.country = value;
            ReplAction::Print(filters_text(state))
        }
        "gre" => {
            state.gre = filter_value(args);
            ReplAction::Print(filters_text(state))
        }
        "visa" => {
            state.visa = filter_value(args);
            ReplAction::Print(filters_text(state))
        }
        "program" => {
            state.program = filter_value(args);
            ReplAction::Print(filters_text(state))
        }
        "filters" => ReplAction::Print(filters_text(state)),
        _ => ReplAction::Print(format!(
            "  Unknown command '/{cmd}'. Type /help for commands."
        )),
    }
}

fn cmd_search(directory: &UniversityDirectory, state: &ReplState, query: &str) -> String {
    match explore(directory, &state.search_params(query)) {
        Ok(ExploreResponse::List { universities, .. }) => render_table(&universities),
        Ok(ExploreResponse::University { university }) => render_detail(&university),
        Err(e) => format!("  {}", e.public_message()),
    }
}

fn cmd_show(directory: &UniversityDirectory, state: &ReplState, args: &str) -> String {
    let words: Vec<&str> = args.split_whitespace().collect();
    let (country, slug) = match words.as_slice() {
        [country, slug] => (country.to_string(), slug.to_string()),
        [slug] => match &state.country {
            Some(country) => (country.clone(), slug.to_string()),
            None => return "  Usage: /show <country> <slug> (or set /country first)".to_string(),
        },
        _ => return "  Usage: /show <country> <slug>".to_string(),
    };

    let params = ExploreParams {
        country: Some(country),
        slug: Some(slug),
        ..ExploreParams::default()
    };

    match explore(directory, &params) {
        Ok(ExploreResponse::University { university }) => render_detail(&university),
        Ok(ExploreResponse::List { .. }) => "  Usage: /show <country> <slug>".to_string(),
        Err(e) => format!("  {}", e.public_message()),
    }
}

fn help_text() -> String {
    let mut out = String::from("\n  Commands:\n\n");
    for (cmd, desc) in COMMANDS {
        out.push_str(&format!("    {cmd:<18} {desc}\n"));
    }
    out.push_str("\n  Tip: Tab completion works for commands and country codes.\n");
    out
}

fn filters_text(state: &ReplState) -> String {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "any".to_string());
    format!(
        "  country={} gre={} visa={} program={}",
        show(&state.country),
        show(&state.gre),
        show(&state.visa),
        show(&state.program)
    )
}

/// Run the interactive REPL.
pub fn run(directory: &UniversityDirectory) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{25c9}\x1b[0m \x1b[1muni-directory v{}\x1b[0m \x1b[90m\u{2014} University Directory\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36m/\x1b[0m to browse commands, \x1b[90mTab\x1b[0m to complete, \x1b[90m/exit\x1b[0m to quit."
    );
    eprintln!();

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<DirectoryHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config)?;
    rl.set_helper(Some(DirectoryHelper {
        country_codes: directory.catalog().codes().map(str::to_string).collect(),
    }));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let hist_path = std::path::PathBuf::from(&home).join(".uni_directory_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut state = ReplState::default();
    let prompt = " \x1b[36muni>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match execute_line(directory, &mut state, &line) {
                    ReplAction::Print(text) => eprintln!("{text}"),
                    ReplAction::Clear => eprint!("\x1b[2J\x1b[H"),
                    ReplAction::Exit => {
                        eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1m/exit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(&hist_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uni_directory::CountryCatalog;

    const CANADA: &str = r#"[
        {"rank": 1, "university_name": "University of Toronto", "city": "Toronto",
         "popular_english_programs": ["MSc Computer Science"],
         "gre_required": "No (optional)", "visa_risk": "Low"},
        {"rank": 2, "university_name": "McGill University", "city": "Montreal",
         "popular_english_programs": ["MSc Data Science"],
         "gre_required": "Yes, required", "visa_risk": "Medium"}
    ]"#;

    fn directory(dir: &tempfile::TempDir) -> UniversityDirectory {
        std::fs::write(dir.path().join("Canada_uni.txt"), CANADA).unwrap();
        UniversityDirectory::new(dir.path(), CountryCatalog::builtin())
    }

    fn printed(action: ReplAction) -> String {
        match action {
            ReplAction::Print(text) => text,
            other => panic!("expected output, got {other:?}"),
        }
    }

    #[test]
    fn test_search_applies_state_filters() {
        let dir = tempfile::tempdir().unwrap();
        let directory = directory(&dir);
        let mut state = ReplState::default();

        execute_line(&directory, &mut state, "/gre no");
        let out = printed(execute_line(&directory, &mut state, "/search"));
        assert!(out.contains("University of Toronto"));
        assert!(!out.contains("McGill"));
    }

    #[test]
    fn test_country_must_be_known() {
        let dir = tempfile::tempdir().unwrap();
        let directory = directory(&dir);
        let mut state = ReplState::default();

        let out = printed(execute_line(&directory, &mut state, "/country france"));
        assert!(out.contains("Unknown country"));
        assert_eq!(state.country, None);

        execute_line(&directory, &mut state, "/country CANADA");
        assert_eq!(state.country.as_deref(), Some("canada"));

        execute_line(&directory, &mut state, "/country all");
        assert_eq!(state.country, None);
    }

    #[test]
    fn test_show_uses_current_country() {
        let dir = tempfile::tempdir().unwrap();
        let directory = directory(&dir);
        let mut state = ReplState::default();

        let out = printed(execute_line(&directory, &mut state, "/show mcgill-university"));
        assert!(out.contains("Usage"));

        execute_line(&directory, &mut state, "/country canada");
        let out = printed(execute_line(&directory, &mut state, "/show mcgill-university"));
        assert!(out.contains("McGill University"));

        let out = printed(execute_line(&directory, &mut state, "/show canada nonexistent"));
        assert!(out.contains("University not found"));
    }

    #[test]
    fn test_exit_and_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let directory = directory(&dir);
        let mut state = ReplState::default();

        assert_eq!(execute_line(&directory, &mut state, "/exit"), ReplAction::Exit);
        let out = printed(execute_line(&directory, &mut state, "/bogus"));
        assert!(out.contains("Unknown command"));
    }
}

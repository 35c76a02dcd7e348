//! REPL loop with rustyline.
//!
//! Interactive mode: prompt, history, TAB completion against the live
//! registry. Pipe mode: read lines from stdin, execute each. Both drive the
//! dispatcher one line at a time on a current-thread runtime, so no two
//! commands ever execute concurrently.

use std::cell::RefCell;
use std::io::{self, BufRead};
use std::rc::Rc;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};
use tokio::runtime::Runtime;

use snowshell_dispatch::{Dispatcher, Flow};

/// Run the interactive REPL. Returns when the user exits at top level.
pub fn run_repl(dispatcher: Rc<RefCell<Dispatcher>>, rt: &Runtime) {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let mut rl: Editor<ShellHelper, _> = match Editor::with_config(config) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("(error) {}", e);
            return;
        }
    };
    rl.set_helper(Some(ShellHelper {
        dispatcher: dispatcher.clone(),
    }));

    let history_path = history_file();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        let prompt = dispatcher.borrow().prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let reply = rt.block_on(dispatcher.borrow_mut().handle(trimmed));
                if !reply.output.is_empty() {
                    println!("{}", reply.output);
                }
                if reply.flow == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C — just show a new prompt
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D — exit
                break;
            }
            Err(err) => {
                eprintln!("(error) {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }
}

/// Run in pipe mode: one command per stdin line, `#` comments skipped.
pub fn run_pipe(dispatcher: Rc<RefCell<Dispatcher>>, rt: &Runtime) -> i32 {
    let stdin = io::stdin();
    let mut exit_code = 0;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let reply = rt.block_on(dispatcher.borrow_mut().handle(trimmed));
        if !reply.output.is_empty() {
            println!("{}", reply.output);
        }
        if reply.is_error() {
            exit_code = 1;
        }
        if reply.flow == Flow::Exit {
            break;
        }
    }

    exit_code
}

fn history_file() -> Option<String> {
    std::env::var("HOME")
        .ok()
        .map(|h| format!("{}/.snowshell_history", h))
}

struct ShellHelper {
    dispatcher: Rc<RefCell<Dispatcher>>,
}

impl Helper for ShellHelper {}
impl Validator for ShellHelper {}
impl Highlighter for ShellHelper {}
impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_pos = &line[..pos];
        let matches = self.dispatcher.borrow().complete(line_to_pos);

        // replace the partial word under the cursor
        let word_start = line_to_pos
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let candidates = matches
            .into_iter()
            .map(|m| Pair {
                display: m.clone(),
                replacement: m,
            })
            .collect();
        Ok((word_start, candidates))
    }
}

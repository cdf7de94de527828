mod highlighter;

use clap::Parser;
use highlighter::SlispHelper;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use slisp::builtins::io::{load_path, load_standard_library};
use slisp::builtins::register_builtins;
use slisp::env::Environment;
use slisp::eval::evaluate;
use slisp::parser::parse_forms;
use slisp::traversal::render_tree;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, trace};
use tracing_subscriber::filter::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A tree-walking interpreter for a small Lisp with Q-expressions
#[derive(Parser, Debug)]
#[command(name = "slisp")]
#[command(version = VERSION)]
#[command(about = "A tree-walking interpreter for a small Lisp with Q-expressions")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Skip loading the standard library
    #[arg(long = "no-stdlib")]
    no_stdlib: bool,

    /// Directory searched recursively for standard library files
    #[arg(long = "stdlib-dir", value_name = "DIR", default_value = "standard")]
    stdlib_dir: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let env = Environment::new();
    register_builtins(&env);

    if !args.no_stdlib {
        debug!(
            "discovering standard library under {}",
            args.stdlib_dir.display()
        );
        load_standard_library(&env, &args.stdlib_dir);
    }

    if let Some(script) = args.script {
        // Script mode: load the file and exit
        if let Err(e) = load_path(&env, &script.to_string_lossy()) {
            println!("Error: {}", e);
        }
        return Ok(());
    }

    run_repl(&env)
}

fn run_repl(env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl =
        Editor::with_config(config).map_err(|e| format!("Failed to initialize REPL: {}", e))?;
    rl.set_helper(Some(SlispHelper::new()));

    let history_file = ".slisp_history";
    let _ = rl.load_history(history_file);

    println!("slisp v{}", VERSION);
    println!("Press Ctrl-D or type exit to leave");

    loop {
        let readline = rl.readline("slisp> ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                // Special inputs handled before parsing
                match line {
                    "exit" => {
                        println!("Exiting");
                        break;
                    }
                    "env" => {
                        print!("{}", env.render());
                        continue;
                    }
                    _ => {}
                }

                match parse_forms(line) {
                    Ok(forms) => {
                        for form in forms {
                            trace!("parsed tree:\n{}", render_tree(&form));
                            match evaluate(env, form) {
                                Ok(result) => println!("{}", result),
                                Err(e) => println!("Error: {}", e),
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("Parse error: {}", e);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C clears the line and keeps the session alive
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Exiting");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);

    Ok(())
}

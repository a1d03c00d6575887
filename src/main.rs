use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};
use std::panic::{catch_unwind, AssertUnwindSafe};

use faro::{evaluate, Environment, Lexer, Parser, Program};

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        run_repl().map_err(|err| err.to_string())?;
    } else {
        run_script(&args[1])?;
    }
    Ok(())
}

fn run_script(filename: &str) -> Result<(), String> {
    let source = std::fs::read_to_string(filename)
        .map_err(|_| format!("{} not found. No such file or directory.", filename))?;
    let mut env = Environment::new();
    match parse_source(&source) {
        Ok(program) => {
            let result = evaluate(&program, &mut env);
            println!("{}", result.inspect());
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("{error}");
            }
            Err(format!("{} parse errors in {}", errors.len(), filename))
        }
    }
}

fn run_repl() -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    // one environment per session, so bindings persist across lines
    let mut env = Environment::new();
    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                match parse_source(&line) {
                    Ok(program) => {
                        // hard evaluation faults (e.g. division by zero) panic
                        // out of evaluate; report them and keep the session
                        match catch_unwind(AssertUnwindSafe(|| evaluate(&program, &mut env))) {
                            Ok(result) => println!("{}", result.inspect()),
                            Err(_) => println!("Error: evaluation failed"),
                        }
                    }
                    Err(errors) => {
                        println!("Parser errors:");
                        for error in errors {
                            println!("  {error}");
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn parse_source(source: &str) -> Result<Program, Vec<String>> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    if parser.errors().is_empty() {
        Ok(program)
    } else {
        Err(parser.errors().iter().map(|e| e.to_string()).collect())
    }
}

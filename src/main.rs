use std::{fs::read_to_string, path::PathBuf, process, rc::Rc, time::Instant};

use clap::Parser;
use slang::{lexer::lexer::tokenize, parser::parser::parse, render_error};

#[derive(Parser)]
#[command(name = "slang")]
#[command(about = "Tokenize and parse a slang program", version)]
struct Cli {
    /// Source file
    file: PathBuf,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the parsed tree
    #[arg(long)]
    ast: bool,
}

fn main() {
    let cli = Cli::parse();
    let file_path = cli.file;

    let file_name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.to_string_lossy().to_string());

    let file_contents = match read_to_string(&file_path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file_path.display(), err);
            process::exit(1);
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(file_contents.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            print!("{}", render_error(&error, &file_contents));
            process::exit(1);
        }
    };

    println!("Tokenized in {:?}", start.elapsed());

    if cli.tokens {
        for token in &tokens {
            token.debug();
        }
    }

    let parse_start = Instant::now();
    let (_, parsed) = parse(tokens, Rc::new(file_name));

    println!("Parsed in {:?}", parse_start.elapsed());

    let module = match parsed {
        Ok(module) => module,
        Err(error) => {
            print!("{}", render_error(&error, &file_contents));
            process::exit(1);
        }
    };

    for function in &module {
        println!(
            "{} {} ({} statements)",
            function.function_type,
            function.name,
            function.body.len()
        );
    }

    if cli.ast {
        println!("{:#?}", module);
    }

    println!("Total time: {:?}", start.elapsed());
}

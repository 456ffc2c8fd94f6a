use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::run;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "shpipe")]
#[command(version = VERSION)]
#[command(about = "Compose external commands into shell-style pipelines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a pipeline of commands, piping each stage's stdout into the next
    Run(run::RunArgs),
}

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw,
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Run(args) if args.raw => ResponseMode::Raw,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = response_mode(&cli.command);

    let result = match cli.command {
        Commands::Run(args) => run::execute(&args),
    };

    match mode {
        ResponseMode::Json => {
            let (json_result, exit_code) = output::map_cmd_result_to_json(result);
            output::print_json_result(json_result);
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
        ResponseMode::Raw => match result {
            Ok((out, exit_code)) => {
                print!("{}", out.stdout);
                if !out.stderr.is_empty() {
                    eprint!("{}", out.stderr);
                }
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                eprintln!("{}", err);
                let exit_code = output::exit_code_for_error(err.code);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        },
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

use std::env::args_os;
use std::process::ExitCode;

use color_strip::{compile_color_strip, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match compile_color_strip(&arguments) {
        Ok(summary) => {
            println!("Saved: {}", summary.output_file.display());
            println!("Frames used: {}", summary.frame_count);
            println!("Resolution: {}x{}", summary.width, summary.height);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Compiling the color strip failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}

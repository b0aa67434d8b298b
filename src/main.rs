use std::env::args_os;
use std::process::ExitCode;

use pixel_canvas::{paint_canvas, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match paint_canvas(&arguments) {
        Ok(_) => {
            println!("Canvas written successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Painting failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}

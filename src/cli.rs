use crate::color::Rgba;
use crate::image::PixelCoord;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

/// Two endpoints given as `X0,Y0:X1,Y1`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSegment {
    pub start: PixelCoord,
    pub end: PixelCoord,
}

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_output_file_argument(command);
        let command = Self::register_input_file_argument(command);
        let command = Self::register_width_argument(command);
        let command = Self::register_height_argument(command);
        let command = Self::register_color_argument(command);
        let command = Self::register_dot_argument(command);
        Self::register_line_argument(command)
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_width_argument(command: Command) -> Command {
        command.arg(Self::create_width_argument())
    }

    fn register_height_argument(command: Command) -> Command {
        command.arg(Self::create_height_argument())
    }

    fn register_color_argument(command: Command) -> Command {
        command.arg(Self::create_color_argument())
    }

    fn register_dot_argument(command: Command) -> Command {
        command.arg(Self::create_dot_argument())
    }

    fn register_line_argument(command: Command) -> Command {
        command.arg(Self::create_line_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to BMP output file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_input_file_argument() -> Arg {
        arg!(input_file: -i --input <FILE> "BMP file to paint on instead of a blank canvas")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_width_argument() -> Arg {
        arg!(width: -W --width <PIXELS> "Canvas width; resizes the input file if given")
            .required(false)
            .value_parser(value_parser!(u32))
    }

    fn create_height_argument() -> Arg {
        arg!(height: -H --height <PIXELS> "Canvas height; resizes the input file if given")
            .required(false)
            .value_parser(value_parser!(u32))
    }

    fn create_color_argument() -> Arg {
        arg!(color: -c --color <COLOR> "Paint color as #rrggbb")
            .default_value("#000000")
            .value_parser(value_parser!(Rgba))
    }

    fn create_dot_argument() -> Arg {
        arg!(dot: -d --dot <POINT> "Paint a dot at X,Y")
            .required(false)
            .action(ArgAction::Append)
            .allow_hyphen_values(true)
            .value_parser(parse_pixel_coord)
    }

    fn create_line_argument() -> Arg {
        arg!(line: -l --line <SEGMENT> "Paint a line from X0,Y0 to X1,Y1 given as X0,Y0:X1,Y1")
            .required(false)
            .action(ArgAction::Append)
            .allow_hyphen_values(true)
            .value_parser(parse_line_segment)
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            output_file: Self::extract_output_file_argument(matches),
            input_file: Self::extract_input_file_argument(matches),
            width: Self::extract_width_argument(matches),
            height: Self::extract_height_argument(matches),
            color: Self::extract_color_argument(matches),
            dots: Self::extract_dot_argument(matches),
            lines: Self::extract_line_argument(matches),
        }
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("input_file").cloned()
    }

    fn extract_width_argument(matches: &ArgMatches) -> Option<u32> {
        matches.get_one::<u32>("width").copied()
    }

    fn extract_height_argument(matches: &ArgMatches) -> Option<u32> {
        matches.get_one::<u32>("height").copied()
    }

    fn extract_color_argument(matches: &ArgMatches) -> Rgba {
        matches
            .get_one::<Rgba>("color")
            .expect("Color must be provided, but was unset.")
            .to_owned()
    }

    fn extract_dot_argument(matches: &ArgMatches) -> Vec<PixelCoord> {
        matches
            .get_many::<PixelCoord>("dot")
            .map(|dots| dots.copied().collect())
            .unwrap_or_default()
    }

    fn extract_line_argument(matches: &ArgMatches) -> Vec<LineSegment> {
        matches
            .get_many::<LineSegment>("line")
            .map(|lines| lines.copied().collect())
            .unwrap_or_default()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_pixel_coord(value: &str) -> Result<PixelCoord, String> {
    let invalid = || format!("'{}' is not a pixel of the form X,Y", value);
    let (x, y) = value.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok(PixelCoord::new(x, y))
}

fn parse_line_segment(value: &str) -> Result<LineSegment, String> {
    let (start, end) = value
        .split_once(':')
        .ok_or_else(|| format!("'{}' is not a line of the form X0,Y0:X1,Y1", value))?;
    Ok(LineSegment {
        start: parse_pixel_coord(start)?,
        end: parse_pixel_coord(end)?,
    })
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::{parse_line_segment, parse_pixel_coord, CLIParser, LineSegment};
    use crate::color::Rgba;
    use crate::image::PixelCoord;

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_output_file_argument() {
        let output_file_name = "canvas.bmp";
        let command = Command::new("test");
        let command = CLIParser::register_output_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, output_file_name]);
        let output_file = CLIParser::extract_output_file_argument(&matches);
        assert_eq!(output_file.file_name().unwrap(), output_file_name);
    }

    #[test]
    fn parse_color_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_color_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-c", "#FF0080"]);
        let color = CLIParser::extract_color_argument(&matches);
        assert_eq!(color, Rgba::opaque(0xFF, 0x00, 0x80));
    }

    #[test]
    fn parse_color_illegal_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_color_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--color", "red"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::ValueValidation);
        } else {
            panic!("Illegal value for color not detected");
        }
    }

    #[test]
    fn parse_repeated_dot_arguments() {
        let command = Command::new("test");
        let command = CLIParser::register_dot_argument(command);
        let matches =
            command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-d", "1,2", "--dot", "-3, 4"]);
        let dots = CLIParser::extract_dot_argument(&matches);
        assert_eq!(dots, vec![PixelCoord::new(1, 2), PixelCoord::new(-3, 4)]);
    }

    #[test]
    fn parse_line_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_line_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-l", "0,0:4,1"]);
        let lines = CLIParser::extract_line_argument(&matches);
        assert_eq!(
            lines,
            vec![LineSegment {
                start: PixelCoord::new(0, 0),
                end: PixelCoord::new(4, 1)
            }]
        );
    }

    #[test]
    fn reject_malformed_coordinates() {
        assert!(parse_pixel_coord("1;2").is_err());
        assert!(parse_pixel_coord("1,").is_err());
        assert!(parse_pixel_coord("x,2").is_err());
        assert!(parse_line_segment("0,0-4,1").is_err());
        assert!(parse_line_segment("0,0:4").is_err());
    }

    #[test]
    fn parse_required_arguments_only() {
        let output_file_name = "outputfile.bmp";
        let output_file_path = format!("/output_directory/{}", output_file_name);
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT, &output_file_path]);
        assert_eq!(
            arguments.output_file.file_name().unwrap(),
            output_file_name,
            "output file does not match"
        );
        assert_eq!(arguments.input_file, None, "input file does not match");
        assert_eq!(arguments.width, None, "width does not match");
        assert_eq!(arguments.height, None, "height does not match");
        assert_eq!(arguments.color, Rgba::BLACK, "color does not match");
        assert!(arguments.dots.is_empty(), "dots do not match");
        assert!(arguments.lines.is_empty(), "lines do not match");
    }
}

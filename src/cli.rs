use crate::image::reader::directory::{normalize_extension, DEFAULT_EXTENSIONS};
use crate::image::strip::{StripWidth, DEFAULT_BAR_WIDTH, DEFAULT_STRIP_HEIGHT};
use crate::Arguments;
use clap::{
    arg, crate_description, crate_name, crate_version, value_parser, Arg, ArgGroup, ArgMatches,
    Command,
};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

const STRIP_WIDTH_GROUP: &str = "strip_width";

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
        let command = Self::register_folder_name_argument(command);
        let command = Self::register_base_directory_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_height_argument(command);
        let command = Self::register_strip_width_arguments(command);
        Self::register_extensions_argument(command)
    }

    fn register_folder_name_argument(command: Command) -> Command {
        command.arg(Self::create_folder_name_argument())
    }

    fn register_base_directory_argument(command: Command) -> Command {
        command.arg(Self::create_base_directory_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_height_argument(command: Command) -> Command {
        command.arg(Self::create_height_argument())
    }

    fn register_strip_width_arguments(command: Command) -> Command {
        command
            .arg(Self::create_bar_width_argument())
            .arg(Self::create_width_argument())
            .arg(Self::create_aspect_ratio_argument())
            .group(
                ArgGroup::new(STRIP_WIDTH_GROUP)
                    .args(["bar_width", "width", "aspect_ratio"])
                    .multiple(false)
                    .required(false),
            )
    }

    fn register_extensions_argument(command: Command) -> Command {
        command.arg(Self::create_extensions_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .about(crate_description!())
    }

    fn create_folder_name_argument() -> Arg {
        Arg::new("folder_name")
            .help("Folder with the screenshots, relative to the base directory")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_base_directory_argument() -> Arg {
        arg!(base_directory: -d --base_directory <DIR> "Directory the folder name is resolved against [default: ~/Downloads]")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_output_file_argument() -> Arg {
        arg!(output_file: -o --output <FILE> "Path of the PNG output file [default: <folder>/<folder_name>_color_strip.png]")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_height_argument() -> Arg {
        arg!(height: -H --height <PX> "Height of the strip in pixels")
            .default_value(DEFAULT_STRIP_HEIGHT.to_string())
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_bar_width_argument() -> Arg {
        arg!(bar_width: -b --bar_width <PX> "Width of every bar in pixels [default: 10]")
            .required(false)
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_width_argument() -> Arg {
        arg!(width: -w --width <PX> "Total width of the strip, shared by all frames")
            .required(false)
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_aspect_ratio_argument() -> Arg {
        arg!(aspect_ratio: -a --aspect_ratio <RATIO> "Total width as a multiple of the height")
            .required(false)
            .value_parser(value_parser!(f64))
    }

    fn create_extensions_argument() -> Arg {
        Arg::new("extensions")
            .short('e')
            .long("extensions")
            .value_name("EXT")
            .help("Comma separated file extensions treated as frames")
            .value_delimiter(',')
            .default_values(DEFAULT_EXTENSIONS)
            .value_parser(value_parser!(String))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            folder_name: Self::extract_folder_name_argument(matches),
            base_directory: Self::extract_base_directory_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            strip_height: Self::extract_height_argument(matches),
            strip_width: Self::extract_strip_width_arguments(matches),
            extensions: Self::extract_extensions_argument(matches),
        }
    }

    fn extract_folder_name_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("folder_name")
            .expect("Required argument folder_name not provided")
            .clone()
    }

    fn extract_base_directory_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("base_directory")
            .cloned()
            .unwrap_or_else(default_base_directory)
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("output_file").cloned()
    }

    fn extract_height_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("height")
            .expect("Height must be provided, but was unset.")
            .to_owned()
    }

    fn extract_strip_width_arguments(matches: &ArgMatches) -> StripWidth {
        if let Some(width) = matches.get_one::<u32>("width") {
            StripWidth::Total(*width)
        } else if let Some(ratio) = matches.get_one::<f64>("aspect_ratio") {
            StripWidth::AspectRatio(*ratio)
        } else {
            let bar_width = matches
                .get_one::<u32>("bar_width")
                .copied()
                .unwrap_or(DEFAULT_BAR_WIDTH);
            StripWidth::PerFrame(bar_width)
        }
    }

    fn extract_extensions_argument(matches: &ArgMatches) -> Vec<String> {
        matches
            .get_many::<String>("extensions")
            .expect("Extensions must be provided, but were unset.")
            .map(|extension| normalize_extension(extension))
            .filter(|extension| !extension.is_empty())
            .collect()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `~/Downloads`, or the working directory when no home is known
fn default_base_directory() -> PathBuf {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join("Downloads"))
        .unwrap_or_else(|| PathBuf::from("."))
}

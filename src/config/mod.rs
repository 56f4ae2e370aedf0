//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

mod general;

pub use self::general::Layout;

use crate::config::general::General;
use crate::logger::Level;

use clap::{App, Arg, ArgMatches};
use log::info;
use serde_derive::Deserialize;

use std::path::PathBuf;
use std::process;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            general: Default::default(),
        }
    }
}

impl Config {
    /// parse command line options and return `Config`
    pub fn new() -> Config {
        let app = App::new(NAME)
            .version(VERSION)
            .about("Hash table benchmark analysis and plotting")
            .arg(
                Arg::with_name("config")
                    .long("config")
                    .value_name("FILE")
                    .help("TOML config file")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("data")
                    .long("data")
                    .value_name("FILE")
                    .help("Normalized CSV cache file")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("output")
                    .long("output")
                    .value_name("FILE")
                    .help("Output PNG file")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("layout")
                    .long("layout")
                    .value_name("NAME")
                    .help("Chart layout")
                    .possible_value("per-method")
                    .possible_value("grid")
                    .possible_value("window")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("width")
                    .long("width")
                    .value_name("Pixels")
                    .help("Canvas width")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("height")
                    .long("height")
                    .value_name("Pixels")
                    .help("Canvas height")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("caption")
                    .long("caption")
                    .value_name("TEXT")
                    .help("Chart caption")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .long("verbose")
                    .help("Increase verbosity by one level. Can be used more than once")
                    .multiple(true),
            );

        let matches = app.get_matches();

        let mut config = if let Some(file) = matches.value_of("config") {
            Config::load_from_file(file)
        } else {
            Default::default()
        };

        if let Some(data) = matches.value_of("data") {
            config.general.set_data(data.to_string());
        }

        if let Some(output) = matches.value_of("output") {
            config.general.set_output(output.to_string());
        }

        if let Some(layout) = matches.value_of("layout") {
            config.general.set_layout(match layout {
                "per-method" => Layout::PerMethod,
                "grid" => Layout::Grid,
                "window" => Layout::Window,
                _ => {
                    println!("ERROR: unknown layout: {}", layout);
                    process::exit(1);
                }
            });
        }

        if let Some(width) = parse_numeric_arg(&matches, "width") {
            config.general.set_width(width);
        }

        if let Some(height) = parse_numeric_arg(&matches, "height") {
            config.general.set_height(height);
        }

        if let Some(caption) = matches.value_of("caption") {
            config.general.set_caption(caption.to_string());
        }

        match matches.occurrences_of("verbose") {
            0 => {}
            1 => config.general.set_logging(Level::Debug),
            _ => config.general.set_logging(Level::Trace),
        }

        config
    }

    /// the normalized CSV cache path
    pub fn data(&self) -> PathBuf {
        PathBuf::from(self.general.data())
    }

    /// the output PNG path
    pub fn output(&self) -> PathBuf {
        PathBuf::from(self.general.output())
    }

    pub fn layout(&self) -> Layout {
        self.general.layout()
    }

    pub fn width(&self) -> u32 {
        self.general.width()
    }

    pub fn height(&self) -> u32 {
        self.general.height()
    }

    pub fn caption(&self) -> String {
        self.general.caption()
    }

    /// get logging level
    pub fn logging(&self) -> Level {
        self.general.logging()
    }

    fn load_from_file(file: &str) -> Config {
        let content = std::fs::read_to_string(file).unwrap_or_else(|e| {
            println!("ERROR: failed to read config file: {}: {}", file, e);
            process::exit(1);
        });
        toml::from_str(&content).unwrap_or_else(|e| {
            println!("ERROR: failed to parse config file: {}: {}", file, e);
            process::exit(1);
        })
    }

    pub fn print(&self) {
        info!("-----");
        info!("Config: Layout: {:?}", self.layout());
        info!("Config: Data: {}", self.general.data());
        info!("Config: Output: {}", self.general.output());
        info!("Config: Canvas: {}x{}", self.width(), self.height());
        info!("Config: Caption: {}", self.general.caption());
    }
}

/// a helper function to parse a numeric argument by name from `ArgMatches`
fn parse_numeric_arg(matches: &ArgMatches, key: &str) -> Option<u32> {
    matches.value_of(key).map(|f| {
        f.parse().unwrap_or_else(|_| {
            println!("ERROR: could not parse {}", key);
            process::exit(1);
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.layout(), Layout::Grid);
        assert_eq!(config.width(), 1280);
        assert_eq!(config.height(), 960);
        assert_eq!(config.logging(), Level::Info);
        assert_eq!(config.data(), PathBuf::from("normalized_perf_data.csv"));
        assert_eq!(config.output(), PathBuf::from("hashing_performance.png"));
    }

    #[test]
    fn general_section_overrides() {
        let config: Config = toml::from_str(
            "[general]\n\
             layout = \"per-method\"\n\
             data = \"timings.csv\"\n\
             logging = \"trace\"\n",
        )
        .unwrap();
        assert_eq!(config.layout(), Layout::PerMethod);
        assert_eq!(config.data(), PathBuf::from("timings.csv"));
        assert_eq!(config.logging(), Level::Trace);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<Config>("[general]\nthreads = 4\n").is_err());
        assert!(toml::from_str::<Config>("[workload]\nrate = 1\n").is_err());
    }

    #[test]
    fn bad_layout_rejected() {
        assert!(toml::from_str::<Config>("[general]\nlayout = \"spiral\"\n").is_err());
    }
}

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

use chrono::Local;
use log::{Metadata, Record, SetLoggerError};
use serde_derive::Deserialize;

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Level {
    fn to_level(self) -> log::Level {
        match self {
            Level::Error => log::Level::Error,
            Level::Warn => log::Level::Warn,
            Level::Info => log::Level::Info,
            Level::Debug => log::Level::Debug,
            Level::Trace => log::Level::Trace,
        }
    }

    fn to_level_filter(self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }
}

pub struct Logger {
    label: Option<String>,
    level: Level,
}

impl Logger {
    pub fn new() -> Logger {
        Logger {
            label: None,
            level: Level::Info,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level.to_level_filter());
        log::set_boxed_logger(Box::new(self))
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level.to_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // at debug and below, keep the module path visible
            let target = if record.level() >= log::Level::Debug {
                record.target()
            } else {
                self.label.as_deref().unwrap_or_else(|| record.target())
            };
            println!(
                "{} {:<5} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                target,
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            level: Level,
        }
        let w: Wrapper = toml::from_str("level = \"debug\"").unwrap();
        assert_eq!(w.level, Level::Debug);
        assert!(toml::from_str::<Wrapper>("level = \"loud\"").is_err());
    }

    #[test]
    fn level_ordering() {
        assert!(Level::Error < Level::Trace);
        assert!(Level::Info.to_level() <= log::Level::Debug);
    }
}

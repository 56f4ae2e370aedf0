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

#[macro_use]
mod macros;

mod config;
mod data;
mod error;
mod logger;
mod plot;

use crate::config::Config;
use crate::data::Table;
use crate::logger::Logger;

use log::info;

pub fn main() {
    let config = Config::new();

    Logger::new()
        .label("hash_perf")
        .level(config.logging())
        .init()
        .expect("Failed to initialize logger");

    info!("{} {} initializing...", config::NAME, config::VERSION);
    config.print();

    let table = match Table::load(&config.data()) {
        Ok(table) => table,
        Err(e) => fatal!("failed to load benchmark data: {}", e),
    };
    info!(
        "{} samples across {} load factors",
        table.len(),
        table.alphas().len()
    );

    if let Err(e) = plot::render(&table, &config) {
        fatal!("failed to render {}: {}", config.output().display(), e);
    }
    info!("wrote {}", config.output().display());
}

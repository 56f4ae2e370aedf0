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

use crate::logger::Level;

use serde_derive::Deserialize;

/// Which chart arrangement to render.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// 1x3: one panel per hashing method, six series each.
    PerMethod,
    /// 3x3: method x operation panels, success vs failure series.
    Grid,
    /// Like grid, restricted to the 0.5-0.7 load factor window.
    Window,
}

impl Default for Layout {
    fn default() -> Layout {
        Layout::Grid
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "default_data")]
    data: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default)]
    layout: Layout,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default = "default_caption")]
    caption: String,
    #[serde(default = "default_logging_level")]
    logging: Level,
}

impl Default for General {
    fn default() -> General {
        General {
            data: default_data(),
            output: default_output(),
            layout: Default::default(),
            width: default_width(),
            height: default_height(),
            caption: default_caption(),
            logging: default_logging_level(),
        }
    }
}

impl General {
    pub fn data(&self) -> String {
        self.data.clone()
    }

    pub fn set_data(&mut self, data: String) {
        self.data = data;
    }

    pub fn output(&self) -> String {
        self.output.clone()
    }

    pub fn set_output(&mut self, output: String) {
        self.output = output;
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    pub fn caption(&self) -> String {
        self.caption.clone()
    }

    pub fn set_caption(&mut self, caption: String) {
        self.caption = caption;
    }

    pub fn logging(&self) -> Level {
        self.logging
    }

    pub fn set_logging(&mut self, level: Level) {
        self.logging = level;
    }
}

fn default_data() -> String {
    "normalized_perf_data.csv".to_string()
}

fn default_output() -> String {
    "hashing_performance.png".to_string()
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    960
}

fn default_caption() -> String {
    "Performance Comparison of Hashing Methods".to_string()
}

fn default_logging_level() -> Level {
    Level::Info
}
